mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_runtime::console::LineConsole;
use bikeshare_runtime::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));

    let cities = settings.city_table().context("loading city table")?;
    tracing::info!(
        "Data directory: {}, cities: {}",
        settings.data_dir.display(),
        cities.names().collect::<Vec<_>>().join(", ")
    );

    let mut session = Session::new(LineConsole::stdio(), cities, settings.data_dir.clone());
    session.run()?;

    Ok(())
}
