use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::formatter::TickFormatter;

static SUBSCRIBER_INIT: Once = Once::new();

/// Configure and initialize logging for the application.
///
/// Lines go to the configured log file because the terminal belongs to the renderer.
/// `RUST_LOG` overrides the configured filter.
pub fn setup_logging(config: &GameConfig) -> GameResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(&config.log_file)?;

    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .event_format(TickFormatter);

        // A subscriber may already be installed (e.g. by a test harness)
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .with(ErrorLayer::default())
            .try_init();
    });
    Ok(())
}
