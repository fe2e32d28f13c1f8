use std::{
    io::{self, stdin},
    path::PathBuf,
};

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use focusguard::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, FixedTicker, FocusEvent, Runner, CLOCK_TICK, REFRESH_TICK},
    session_log::SessionLog,
    theme::ThemeKind,
    ui::screen::draw,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// terminal focus timer: focused time against active time, with a session log
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Start the clock while you study, stop it when you drift. FocusGuard keeps counting the time the app is open, turns the two into a focus score and saves sessions to a CSV log you can summarize later."
)]
pub struct Cli {
    /// session log to append to and summarize
    #[clap(short = 'l', long)]
    log_file: Option<PathBuf>,

    /// starting color theme
    #[clap(short = 't', long, value_enum)]
    theme: Option<ThemeKind>,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        config
    }
}

fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let dir = AppDirs::state_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("focusguard={}", config.log_level).into());

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "focusguard.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let _log_guard = init_logging(&config);

    let log = config
        .log_file
        .as_ref()
        .map(SessionLog::with_path)
        .unwrap_or_default();
    tracing::info!(path = %log.path().display(), theme = %config.theme, "starting");

    let mut app = App::new(log, config).with_config_store(Box::new(store));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(CLOCK_TICK),
        FixedTicker::new(REFRESH_TICK),
    );

    terminal.draw(|f| draw(app, f))?;

    while let Some(event) = runner.step() {
        match event {
            FocusEvent::ClockTick => app.on_clock_tick(),
            FocusEvent::RefreshTick => app.on_refresh_tick(),
            FocusEvent::Resize => {}
            FocusEvent::Key(key) => {
                if let Some(command) = app.command_for_key(key) {
                    if app.dispatch(command) == Flow::Quit {
                        runner.cancel();
                        continue;
                    }
                }
            }
        }
        terminal.draw(|f| draw(app, f))?;
    }

    tracing::info!(
        focused_seconds = app.clock.focused_seconds(),
        active_seconds = app.clock.active_seconds(),
        "exiting"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["focusguard"]);
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.theme, None);
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["focusguard", "--log-file", "/tmp/s.csv", "--theme", "dark"]);
        let config = cli.apply(Config::default());
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/s.csv")));
        assert_eq!(config.theme, ThemeKind::Dark);
    }

    #[test]
    fn test_cli_keeps_config_when_flags_absent() {
        let stored = Config {
            theme: ThemeKind::Dark,
            log_file: Some(PathBuf::from("/data/log.csv")),
            log_level: "debug".to_string(),
        };
        let cli = Cli::parse_from(["focusguard"]);
        assert_eq!(cli.apply(stored.clone()), stored);
    }

    #[test]
    fn test_cli_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["focusguard", "--theme", "solarized"]).is_err());
    }
}
