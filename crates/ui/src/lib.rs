pub mod app;
pub mod context;
pub mod routes;
pub mod vm;
pub mod views;

pub use app::App;
pub use context::{AppContext, UiApp, UiSession, build_app_context};
pub use routes::{NavTarget, Route};
