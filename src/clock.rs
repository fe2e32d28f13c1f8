use crate::util::format_hms;

/// Counters owned by the clock for the life of the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// seconds counted while running
    pub focused_seconds: u64,
    /// seconds counted while the program is open, running or not
    pub active_seconds: u64,
    pub running: bool,
}

/// Tracks focused time against active time, advanced once per clock tick
#[derive(Debug, Default)]
pub struct SessionClock {
    state: SessionState,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn focused_seconds(&self) -> u64 {
        self.state.focused_seconds
    }

    pub fn active_seconds(&self) -> u64 {
        self.state.active_seconds
    }

    /// Advance one second. Returns the new timer text when focused time accrued.
    pub fn tick(&mut self) -> Option<String> {
        self.state.active_seconds += 1;

        if self.state.running {
            self.state.focused_seconds += 1;
            Some(self.timer_text())
        } else {
            None
        }
    }

    pub fn start(&mut self) {
        self.state.running = true;
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }

    /// Clears focused time only; active time keeps counting as the score denominator.
    pub fn reset(&mut self) {
        self.state.running = false;
        self.state.focused_seconds = 0;
    }

    /// Percentage of active time spent focused, unrounded
    pub fn focus_score(&self) -> f64 {
        if self.state.active_seconds == 0 {
            return 0.0;
        }
        (self.state.focused_seconds as f64 / self.state.active_seconds as f64) * 100.0
    }

    pub fn timer_text(&self) -> String {
        format_hms(self.state.focused_seconds)
    }

    pub fn focus_label(&self) -> String {
        format!("Today's Focus Score: {:.1}%", self.focus_score())
    }
}
