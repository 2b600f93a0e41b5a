/// The error type for random choices made by the AI.
#[derive(Debug, PartialEq, Eq)]
pub enum AiError {
    EmptyCollection,
}

impl std::error::Error for AiError {}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::EmptyCollection => {
                write!(f, "Cannot choose random element from empty collection")
            }
        }
    }
}
