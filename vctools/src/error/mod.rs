pub mod command;
pub mod core;
pub mod gateway;
pub mod runner;
pub mod settings;
pub mod voice;

use std::sync::Arc;

use thiserror::Error;

pub use command::Result as CommandResult;

#[derive(Error, Debug)]
#[error("not in a guild")]
pub struct NotInGuild;

#[derive(Error, Debug)]
#[error("installing the default crypto provider failed: {:?}", .0)]
pub struct InstallDefaultCryptoProvider(pub Arc<rustls::crypto::CryptoProvider>);

#[derive(Error, Debug)]
#[error("error running the bot starter: {}", .0)]
pub enum Run {
    ColorEyre(#[from] color_eyre::Report),
    Dotenvy(#[from] dotenvy::Error),
    InstallDefaultCryptoProvider(#[from] InstallDefaultCryptoProvider),
    Config(#[from] core::ConfigError),
    Start(#[from] runner::StartError),
}
