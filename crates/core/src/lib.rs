//! Domain core for the course enrollment service.
//!
//! Holds the rules that must survive any change of framework or storage:
//! validation constants, enrollment and review checks, the search query
//! builder, and the dashboard tally. Nothing in this crate performs I/O.

pub mod course;
pub mod enrollment;
pub mod error;
pub mod query;
pub mod review;
pub mod roles;
pub mod stats;
pub mod types;
pub mod user;
