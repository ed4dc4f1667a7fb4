#![warn(missing_docs)]

//! # binary-pomodoro
//!
//! A pomodoro timer for the terminal that shows its duration as a binary
//! number growing on a Christmas tree, built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is split into a headless core and a thin terminal shell:
//!
//! - [`timer`]: the countdown state machine (idle, running, completed)
//! - [`tree`]: leaf geometry, bottom-up reveal order and the binary row
//! - [`canvas`]: the owned drawing surface the tree is painted on
//! - [`widget`]: the bubbletea-rs model tying them together with key and
//!   mouse handling, the 1 Hz tick and the completion flash
//! - [`key`] and [`help`]: key bindings and the help line
//! - [`config`], [`logging`], [`error`]: command line, log file and errors
//!
//! ## Driving the widget headless
//!
//! Every interaction is a [`widget::Command`], so the widget runs without a
//! terminal:
//!
//! ```rust
//! use binary_pomodoro::prelude::*;
//!
//! let mut widget = PomodoroWidget::new(1);
//! widget.dispatch(Command::Toggle);
//! for _ in 0..30 {
//!     widget.dispatch(Command::Tick);
//! }
//!
//! assert_eq!(widget.timer().display_time(), "00:30");
//! assert_eq!(widget.timer().progress_percent(), 50.0);
//! // Half the countdown elapsed, so half of the 36 leaves are out.
//! assert_eq!(widget.glyphs().len(), 18);
//! ```
//!
//! ## Running it in a terminal
//!
//! ```rust,ignore
//! use binary_pomodoro::widget::{configure, Model, Options};
//! use bubbletea_rs::Program;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     configure(Options { minutes: 25 });
//!     let program = Program::<Model>::builder().alt_screen(true).build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod help;
pub mod key;
pub mod logging;
pub mod timer;
pub mod tree;
pub mod widget;

pub use config::Config;
pub use error::{Error, Result};

/// Commonly used types.
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::timer::{TimerModel, TimerState};
    pub use crate::tree::{Glyph, TreeRenderer};
    pub use crate::widget::{Command, Model as PomodoroWidget, Outcome};
}
