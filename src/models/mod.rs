//! Row models for the campus hierarchy and the ticket tables.

pub mod campus;
pub mod classroom;
pub mod device;
pub mod place;
pub mod problem;
pub mod user;
