//! # Settings Inspector
//!
//! Resolves the deployment configuration the same way the hosting
//! application would and dumps it as JSON, for checking what a given
//! environment and `.env` file actually produce.

use anyhow::Result;
use tracing::info;

use layered_settings::Settings;

fn main() -> Result<()> {
    layered_settings::telemetry::init_tracing();

    let settings = Settings::load()?;
    info!(
        environment = %settings.environment,
        debug = settings.debug,
        "Configuration loaded"
    );

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
