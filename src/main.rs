use clap::Parser;
use cli::Cli;

use crate::app::App;

mod app;
mod cli;
mod components;
mod config;
mod errors;
mod framework;
mod logging;
mod reactive;
mod tui;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    crate::errors::init()?;
    crate::logging::init()?;

    let args = Cli::parse();
    let mut app = App::new(args.tick_rate, args.frame_rate, args.mouse)?;
    app.run().await?;
    Ok(())
}
