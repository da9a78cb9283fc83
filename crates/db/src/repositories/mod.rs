//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or `&mut PgConnection` when the call must join a
//! caller-owned transaction) as the first argument.

pub mod label_repo;
pub mod label_task_mapping_repo;
pub mod membership_repo;
pub mod project_repo;
pub mod space_repo;
pub mod status_repo;
pub mod task_repo;
pub mod user_repo;

pub use label_repo::LabelRepo;
pub use label_task_mapping_repo::LabelTaskMappingRepo;
pub use membership_repo::MembershipRepo;
pub use project_repo::ProjectRepo;
pub use space_repo::SpaceRepo;
pub use status_repo::StatusRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
