// src/logging.rs
// Structured logging to stderr. RUST_LOG overrides the default "info" level,
// e.g. RUST_LOG=seed_harvest=debug to see every request as it starts.
// Colour only when stderr is a terminal.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(wants_ansi(&std::io::stderr()))
        .with_target(false)
        .init();
}

// Escape codes only make sense on a terminal; redirected logs stay plain
fn wants_ansi(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}
