pub mod chat_controller;
pub mod config_controller;
pub mod health_controller;

pub use chat_controller::chat;
pub use config_controller::public_config;
pub use health_controller::{health, not_found};
