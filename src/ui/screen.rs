use ratatui::Frame;

use crate::{
    app::{App, AppState},
    ui::analytics::render_analytics,
};

/// A UI Screen boundary: responsible for rendering one application state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Timer screen - renders the clock using the App widget
pub struct TimerScreen;

impl Screen for TimerScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Analytics screen - uses dedicated renderer
pub struct AnalyticsScreen;

impl Screen for AnalyticsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_analytics(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Timer => Box::new(TimerScreen),
        AppState::Analytics => Box::new(AnalyticsScreen),
    }
}

/// Draw whichever screen matches the app state
pub fn draw(app: &App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}
