mod app;
mod config;
mod logging;

use std::io::stdout;

use app::EggTimer;
use config::Config;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};

const DIR_NAME: &str = "EggTimer";

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to default config");
        Config::default()
    });
    tracing::info!(
        tick_rate = config.tick_rate,
        bell = config.bell,
        "egg timer starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnableMouseCapture)?;

    let mut terminal = ratatui::init();

    let app_result = EggTimer::new(config).run(&mut terminal);

    // Restore terminal settings, best effort so the screen always comes back
    if let Err(err) = execute!(stdout, DisableMouseCapture) {
        tracing::warn!(%err, "failed to disable mouse capture");
    }
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }
    ratatui::restore();

    if let Err(err) = &app_result {
        tracing::error!(%err, "egg timer stopped on a terminal error");
    }
    Ok(app_result?)
}
