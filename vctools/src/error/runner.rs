use thiserror::Error;

#[derive(Error, Debug)]
#[error("starting bot failed: {:?}", .0)]
pub enum StartError {
    StartRecommended(#[from] twilight_gateway::error::StartRecommendedError),
    ConnectSettings(#[from] super::settings::ConnectError),
    DeserialiseBodyFromHttp(#[from] super::core::DeserialiseBodyFromHttpError),
    SetGlobalCommands(#[from] super::core::SetGlobalCommandsError),
    WaitUntilShutdown(#[from] WaitUntilShutdownError),
}

#[derive(Error, Debug)]
pub enum WaitForSignalError {
    #[error("unable to register handler: {:?}", .0)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub enum WaitUntilShutdownError {
    WaitForSignal(#[from] WaitForSignalError),
}
