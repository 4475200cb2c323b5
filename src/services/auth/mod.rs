pub mod claims;
pub mod error;
pub mod factory;
pub mod gate;
pub mod jwks;

pub use claims::ClaimSet;
pub use error::{AuthError, GateError};
pub use factory::build_access_gate;
pub use gate::AccessGate;
