#![windows_subsystem = "windows"]

use anyhow::Result;
use txadmin::{config::Config, gui, user_settings::UserSettings};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Persisted settings win over TXADMIN_* environment values
    let settings = UserSettings::load();
    let config = Config::from_env()?.with_settings(&settings)?;
    gui::launch(config, settings)?;

    Ok(())
}
