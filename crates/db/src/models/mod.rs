//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create DTOs for inserts, where the entity is writable

pub mod label;
pub mod membership;
pub mod project;
pub mod space;
pub mod status;
pub mod task;
pub mod user;
