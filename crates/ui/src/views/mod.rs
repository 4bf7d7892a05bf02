mod admin;
mod auth;
mod home;
mod lecture;
mod levels;
mod not_found;
mod state;
mod subject;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use auth::AuthView;
pub use home::HomeView;
pub use lecture::LectureView;
pub use levels::{LevelView, LevelsView};
pub use not_found::NotFoundView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use subject::SubjectView;
