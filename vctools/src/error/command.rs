use thiserror::Error;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum Error {
    NotInGuild(#[from] super::NotInGuild),
    Respond(#[from] super::core::RespondError),
    Settings(#[from] super::settings::StoreError),
}

pub type Result = std::result::Result<(), Error>;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error(transparent)]
    InteractionParse(#[from] twilight_interactions::error::ParseError),
    #[error(transparent)]
    Command(#[from] Error),
    #[error("unknown command: {}", .0)]
    UnknownCommand(Box<str>),
}
