pub mod format;
pub mod json;
pub mod placeholders;
mod state;

pub use json::{ApiJson, ApiPath, ApiQuery, MessageResponse, required, required_text};
pub use state::AppState;
