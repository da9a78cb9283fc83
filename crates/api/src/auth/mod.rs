//! Authentication primitives.
//!
//! Tokens are issued by an external identity provider; this service only
//! validates them. [`jwt::generate_access_token`] exists for tooling and
//! tests that need a signed token.

pub mod jwt;
