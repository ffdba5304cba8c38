pub mod auth;
pub mod gate;

pub use auth::{admin_auth_middleware, AdminContext};
pub use gate::maintenance_gate_middleware;
