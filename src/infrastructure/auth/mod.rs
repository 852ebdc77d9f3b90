//! Authentication infrastructure module
//!
//! Bearer token validation for callers authenticated by the external
//! credential service.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenValidator};
