pub mod components;
pub mod screens;

pub use components::terminal::TerminalGuard;
pub use screens::dashboard::run_dashboard;
