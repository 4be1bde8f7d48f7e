use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Parse the command line, install telemetry, and resolve the action to run.
///
/// # Errors
/// Returns an error if telemetry setup or argument dispatch fails.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_one::<u8>("verbosity").copied().unwrap_or(0);
    telemetry::init(verbosity_level(verbosity))?;

    dispatch::handler(&matches)
}

/// `-v` count to tracing level; zero means the ERROR default applies.
const fn verbosity_level(count: u8) -> Option<tracing::Level> {
    match count {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_increasing_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some(tracing::Level::WARN));
        assert_eq!(verbosity_level(2), Some(tracing::Level::INFO));
        assert_eq!(verbosity_level(3), Some(tracing::Level::DEBUG));
        assert_eq!(verbosity_level(4), Some(tracing::Level::TRACE));
        assert_eq!(verbosity_level(u8::MAX), Some(tracing::Level::TRACE));
    }
}
