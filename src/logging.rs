use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::formatter::CustomFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Configure and initialize logging for the application.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        // Allow RUST_LOG to override levels; default to info for our crate and warn elsewhere
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().event_format(CustomFormatter).with_writer(std::io::stderr))
            .with(ErrorLayer::default())
            .try_init();

        if let Err(error) = installed {
            eprintln!("Could not install the tracing subscriber: {error}");
        }
    });
}
