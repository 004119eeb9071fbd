pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod progress;
pub mod prompts;
pub mod provider;
pub mod text_validator;
