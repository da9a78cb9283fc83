pub mod label;
pub mod project;
pub mod status;
pub mod user;
