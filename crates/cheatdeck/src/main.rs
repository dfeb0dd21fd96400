//! # Cheatdeck CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/cheatdeckapp/`: UI-agnostic library (repository, catalog, config)
//! - `crates/cheatdeck/`: this CLI, a client of the library
//!
//! Everything in the library takes normal Rust values and returns normal Rust
//! types. The CLI owns all user-facing concerns: argument parsing, config
//! loading, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
