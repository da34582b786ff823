mod chat;
mod completion;
mod prompt;
mod validation;

pub use chat::*;
pub use completion::*;
pub use prompt::*;
pub use validation::*;
