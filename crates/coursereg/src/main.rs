use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use coursereg::{RegistrarConfig, RegistrationContext};

const CONFIG_ENV: &str = "COURSEREG_CONFIG";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .map(PathBuf::from)
        .with_context(|| format!("usage: coursereg <config.json> (or set {CONFIG_ENV})"))?;

    let config = RegistrarConfig::load_from_file(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    let context = RegistrationContext::new(&config).context("invalid registration config")?;

    for course in context.catalog().iter() {
        info!(
            course = %course.key(),
            open_seats = course.roll().open_seats(),
            cap = course.roll().enrollment_cap(),
            "Catalog entry"
        );
    }

    let summaries = context.catalog().summaries();
    println!(
        "{}",
        serde_json::to_string_pretty(&summaries).context("failed to render catalog")?
    );
    Ok(())
}
