//! Step definitions for task board workflow scenarios.

pub mod when;
