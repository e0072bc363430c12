//! Helper functions shared by the filtering modules.

/// Some basic math functions used elsewhere in the project
pub mod math;
