mod prompt_source;
mod text_generator;

pub use prompt_source::*;
pub use text_generator::*;
