mod client;
mod command;
mod component;
mod core;
mod error;
mod gateway;
mod runner;
mod settings;
mod voice;

#[tokio::main]
async fn main() -> Result<(), error::Run> {
    client::run().await
}
