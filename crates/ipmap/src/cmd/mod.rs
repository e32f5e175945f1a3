//! Command implementations for the ipmap CLI

pub mod build;
pub mod reduce;
