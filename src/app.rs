use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::clock::SessionClock;
use crate::config::{Config, ConfigStore};
use crate::session_log::{Analytics, SessionLog, SessionLogError, SessionRecord};
use crate::theme::Theme;
use crate::util::format_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Timer,
    Analytics,
}

/// User actions, one per key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    SaveSession,
    ViewAnalytics,
    ToggleTheme,
    Back,
    Quit,
}

/// Whether the event loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug)]
pub struct App {
    pub clock: SessionClock,
    pub log: SessionLog,
    pub theme: Theme,
    pub state: AppState,
    pub focus_label: String,
    pub analytics: Option<Analytics>,
    pub status: Option<Status>,
    config: Config,
    config_store: Option<Box<dyn ConfigStore>>,
}

impl App {
    pub fn new(log: SessionLog, config: Config) -> Self {
        let clock = SessionClock::new();
        Self {
            focus_label: clock.focus_label(),
            clock,
            log,
            theme: Theme::from_kind(config.theme),
            state: AppState::Timer,
            analytics: None,
            status: None,
            config,
            config_store: None,
        }
    }

    /// Persist theme changes through `store`
    pub fn with_config_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    pub fn on_clock_tick(&mut self) {
        self.clock.tick();
    }

    pub fn on_refresh_tick(&mut self) {
        self.focus_label = self.clock.focus_label();
    }

    pub fn command_for_key(&self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        match (self.state, key.code) {
            (AppState::Analytics, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b')) => {
                Some(Command::Back)
            }
            (_, KeyCode::Esc | KeyCode::Char('q')) => Some(Command::Quit),
            (_, KeyCode::Char('s')) => Some(Command::Start),
            (_, KeyCode::Char('x')) => Some(Command::Stop),
            (_, KeyCode::Char('r')) => Some(Command::Reset),
            (_, KeyCode::Char('w')) => Some(Command::SaveSession),
            (_, KeyCode::Char('a')) => Some(Command::ViewAnalytics),
            (_, KeyCode::Char('t')) => Some(Command::ToggleTheme),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Start => self.clock.start(),
            Command::Stop => self.clock.stop(),
            Command::Reset => self.clock.reset(),
            Command::SaveSession => match self.save_session() {
                Ok(record) => {
                    self.status = Some(Status::Info(format!(
                        "Saved {} ({}%)",
                        record.date,
                        format_percent(Some(record.focus_score))
                    )));
                }
                Err(e) => {
                    tracing::error!(error = %e, path = %self.log.path().display(), "save failed");
                    self.status = Some(Status::Error(format!("Save failed: {e}")));
                }
            },
            Command::ViewAnalytics => self.view_analytics(),
            Command::ToggleTheme => self.toggle_theme(),
            Command::Back => self.state = AppState::Timer,
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn save_session(&mut self) -> Result<SessionRecord, SessionLogError> {
        self.save_session_on(Local::now().date_naive())
    }

    pub fn save_session_on(&mut self, date: NaiveDate) -> Result<SessionRecord, SessionLogError> {
        let record = SessionRecord::snapshot(&self.clock, date);
        self.log.append(&record)?;
        Ok(record)
    }

    pub fn view_analytics(&mut self) {
        self.analytics = Some(self.log.aggregate());
        self.state = AppState::Analytics;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.config.theme = self.theme.kind;

        if let Some(store) = &self.config_store {
            if let Err(e) = store.save(&self.config) {
                tracing::warn!(error = %e, "could not persist theme");
            }
        }
    }
}
