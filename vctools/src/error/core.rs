use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`BOT_TOKEN` must be set: {}", .0)]
    MissingToken(#[source] dotenvy::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub enum SetGlobalCommandsError {
    TwilightHttp(#[from] twilight_http::Error),
    DeserializeBody(#[from] twilight_http::response::DeserializeBodyError),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub enum DeserialiseBodyFromHttpError {
    TwilightHttp(#[from] twilight_http::Error),
    DeserializeBody(#[from] twilight_http::response::DeserializeBodyError),
}

#[derive(Error, Debug)]
#[error("responding to an interaction failed: {}", .0)]
pub struct RespondError(#[from] pub twilight_http::Error);

pub type RespondResult = Result<(), RespondError>;
