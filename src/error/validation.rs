use thiserror::Error as ThisError;

/// Pre-flight rejection of the idea text. Never reaches the network layer.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error(
        "Idea is too short: please enter at least {min} characters (currently {actual})."
    )]
    TooShort { min: usize, actual: usize },

    #[error("Idea is too long: please use at most {max} characters (currently {actual}).")]
    TooLong { max: usize, actual: usize },
}
