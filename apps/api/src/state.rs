//! Shared application state.

use busline_db::Database;

/// State shared by all request handlers.
///
/// `Database` is a pool handle, so cloning this per-request is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
