use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::errors::MockError;

/// Install a global fmt subscriber filtered by `filter` (`RUST_LOG` syntax).
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(filter: &str) -> Result<(), MockError> {
    let filter = EnvFilter::try_new(filter).map_err(|err| MockError::Logging(err.to_string()))?;
    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| MockError::Logging(err.to_string()))?;

    Ok(())
}
