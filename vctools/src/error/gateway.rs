use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Respond(#[from] super::core::RespondError),
    #[error(transparent)]
    Component(#[from] super::command::Error),
    #[error("error executing command `/{}`: {:?}", .name, .source)]
    CommandExecute {
        name: Box<str>,
        source: super::command::ExecuteError,
    },
}

pub type ProcessResult = Result<(), ProcessError>;
