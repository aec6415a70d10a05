//! Subnet processing logic.
//!
//! - [`partition`] - Splitting a parent network into equal subnets
//! - [`classify`] - Matching hosts to those subnets

mod classify;
mod partition;

// Re-export public functions
pub use classify::{classify, find_subnet, Classification};
pub use partition::{partition, subnet_count, subnets, Subnets};
