// Library surface for headless/integration tests and reuse.
// The binary only wires terminal setup, logging and the event loop.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod runtime;
pub mod session_log;
pub mod theme;
pub mod ui;
pub mod util;
