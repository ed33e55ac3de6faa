pub mod app;
pub mod capture;
mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod mode;
pub mod notification;
pub mod region;
pub mod selection;
pub mod storage;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting Peek");

    let mut app = app::App::new();
    app.start()?;

    tracing::info!(shutting_down = app.is_shutting_down(), "gtk runtime exited");
    Ok(())
}
