//! Binary Pomodoro - a terminal pomodoro timer with a binary Christmas tree
//!
//! Entry point: parses the command line, sets up logging and runs the widget
//! full-screen until it is closed.

use binary_pomodoro::{
    config::Config,
    logging,
    widget::{self, Model, Options},
    Error,
};
use bubbletea_rs::{MouseMotion, Program};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(&config)?;

    log::info!("Starting binary-pomodoro v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Configuration: minutes={}, mouse={}",
        config.clamped_minutes(),
        !config.no_mouse
    );

    widget::configure(Options {
        minutes: config.clamped_minutes(),
    });

    let mut builder = Program::<Model>::builder().alt_screen(true);
    if !config.no_mouse {
        // All motion, not just drags, so the close button can show hover.
        builder = builder.mouse_motion(MouseMotion::All);
    }
    let program = builder.build().map_err(Error::from)?;
    program.run().await.map_err(Error::from)?;

    log::info!("Widget closed");
    Ok(())
}
