//! Platform shell: terminal event loop, effect execution, storage, rendering.
mod app;
mod commands;
mod effects;
mod logging;
mod persistence;
mod storage;
mod ui;

pub use app::run_app;
