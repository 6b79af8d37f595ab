//! Authentication collaborators
//!
//! The banking core trusts the verified user id this module injects.
//! Registration and session management as product features live elsewhere;
//! what is kept here is the JWT verification boundary, the password hashing
//! utility and the role gate for the admin endpoints.

pub mod middleware;
pub mod password;
pub mod service;

pub use middleware::{CurrentUser, jwt_auth_middleware};
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Claims};
