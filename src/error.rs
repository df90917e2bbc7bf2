use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Render error: {0}")]
    Render(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("could not draw {wanted} distinct usernames (got {got})")]
    PoolExhausted { wanted: usize, got: usize },

    #[error("every one of {attempts} drawn usernames was already taken ({taken} in use)")]
    UsernameCollisions { attempts: usize, taken: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
