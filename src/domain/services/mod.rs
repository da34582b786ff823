//! Pure domain services: input validation, output sanitizing, prompt assembly.

mod content_policy;
mod input_validator;
mod prompt_assembler;

pub use content_policy::*;
pub use input_validator::*;
pub use prompt_assembler::*;
