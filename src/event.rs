use crate::llm::LLMError;

/// Completion of a background model-list request
#[derive(Debug)]
pub struct FetchEvent {
    /// Request generation; stale generations are dropped
    pub generation: u64,
    pub result: Result<Vec<String>, LLMError>,
}
