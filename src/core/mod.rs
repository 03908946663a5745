//! Consistency engine: placement uniqueness, cascading deletes and derived
//! device status, plus the CRUD around them.

pub mod cascade;
pub mod devices;
pub mod hierarchy;
pub mod log;
pub mod placement;
pub mod problems;
pub mod status;
pub mod users;

pub use cascade::{CascadeCoordinator, CascadeReport};
pub use devices::DeviceRegistry;
pub use hierarchy::Hierarchy;
pub use placement::PlacementRegistry;
pub use problems::ProblemStore;
pub use status::{StatusChange, StatusDrift};
pub use users::UserDirectory;
