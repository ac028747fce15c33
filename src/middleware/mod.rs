pub mod auth;
pub mod version;

pub use auth::{admin_auth_middleware, AdminUser};
pub use version::require_v1;
