// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Terminal logging for binaries and tests built on this crate.
//!
//! The library logs through the `log` facade only. Callers that want the
//! per-stack `debug!` and `trace!` output install a backend, for example
//! with [`init_logging`].

pub use simplelog::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Install a stderr logger at `level`.
///
/// Returns false if a logger was already installed, leaving it in place.
pub fn init_logging(level: LevelFilter) -> bool {
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_no_op() {
        init_logging(LevelFilter::Warn);
        assert!(!init_logging(LevelFilter::Trace));
    }
}
