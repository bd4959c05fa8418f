use std::error::Error;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("bulk voice action failed: {}", .0)]
pub enum DispatchError<E: Error + 'static> {
    Patch(#[source] E),
    Join(#[from] tokio::task::JoinError),
}
