mod file_prompt_source;
mod huggingface_client;

pub use file_prompt_source::*;
pub use huggingface_client::*;
