//! Platform implementations

pub mod native;
