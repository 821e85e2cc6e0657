//! Logging to stderr using env_logger
//!
//! Stdout carries the rendered diff, so log records never go there.
//! The level defaults to `warn` and follows `RUST_LOG` when set.

use env_logger::{Builder, Env, Target};

pub fn init() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .format_timestamp(None)
        .init();
}
