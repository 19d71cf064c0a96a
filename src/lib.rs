// Library surface for headless/integration tests and reuse.
// Terminal setup, logging and CLI parsing stay in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod exercise;
pub mod notify;
pub mod phase;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;
