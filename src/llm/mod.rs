pub mod host;
pub mod models;
mod types;

pub use host::{display_url, OPENAI_BASE_URL};
pub use models::{ModelFetcher, ModelsState};
pub use types::LLMError;
