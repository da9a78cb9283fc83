//! Domain logic for the task management service.
//!
//! Everything in this crate is pure: no database access, no HTTP. The
//! repository and API crates feed it rows and render its results.

pub mod error;
pub mod html;
pub mod identity;
pub mod managers;
pub mod project_tree;
pub mod space_roles;
pub mod statuses;
pub mod types;
