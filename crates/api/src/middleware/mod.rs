//! Request extractors for authentication and caller identity.
//!
//! - [`auth::AuthUser`] -- the username carried by a JWT Bearer token.
//! - [`auth::CurrentIdentity`] -- the username plus its group memberships,
//!   loaded from the database for permission checks.

pub mod auth;
