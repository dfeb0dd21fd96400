//! # CLI Behavior
//!
//! This is **one possible UI client** for cheatdeck, not the application
//! itself. It exposes collection maintenance: listing and searching, tag
//! clean-up, language migrations and catalog checks.
//!
//! ### Naked Execution (`cheatdeck`)
//!
//! Running `cheatdeck` with no arguments lists every cheatsheet, filtered by
//! the configured `current_tag`.
//!
//! ### Output
//!
//! Text output is styled with `console` and degrades to plain text when piped.
//! `--json` switches record-returning commands to pretty JSON. Diagnostics go
//! to stderr through `tracing` (see `logging`).
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch from parsed arguments to library calls
//! - `logging`: `tracing-subscriber` setup
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
