//! Backend test support utilities
//!
//! Helpers shared by the backend's unit and integration tests: Problem
//! Details assertions, unique test data generation, and logging setup.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

pub use problem_details::{assert_problem_details_from_parts, ProblemBody};
pub use unique_helpers::{unique_email, unique_str};
