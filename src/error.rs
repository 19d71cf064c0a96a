use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification \"{title}\" failed: {reason}")]
    Dispatch { title: String, reason: String },
}

#[derive(Debug, Error)]
pub enum MoveitError {
    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("terminal display failed: {0}")]
    Display(#[source] io::Error),

    #[error("console interaction failed: {0}")]
    Console(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, MoveitError>;
