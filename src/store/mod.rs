//! In-memory job store and application state.

mod jobs;
mod state;

pub use jobs::JobStore;
pub use state::AppState;
