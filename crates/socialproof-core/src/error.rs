use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("invalid input: {0}")]
    Input(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ProofError {
    pub fn input(message: impl Into<String>) -> Self {
        ProofError::Input(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        ProofError::InvalidConfig(message.into())
    }

    pub fn is_input(&self) -> bool {
        matches!(self, ProofError::Input(_))
    }
}
