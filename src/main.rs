//! docextract - extract a document into a JSON report.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docextract::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "docextract=info"
    } else {
        "docextract=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::run()
}
