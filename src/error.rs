use crate::coops::error::FetchError;
use crate::replay::error::ReplayError;
use crate::types::dataset::EmptyDatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidelapseError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    EmptyDataset(#[from] EmptyDatasetError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error("Terminal I/O failed")]
    Terminal(#[from] std::io::Error),

    #[error("Player task failed to complete")]
    Join(#[from] tokio::task::JoinError),
}
