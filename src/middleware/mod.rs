pub mod guard;
pub mod response;

pub use guard::{protected_path, session_guard, SESSION_COOKIE};
pub use response::{ApiResponse, ApiResult};
