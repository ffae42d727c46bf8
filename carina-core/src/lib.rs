//! Carina Core
//!
//! Core library for an infrastructure management tool that treats side effects as values

pub mod provider;
pub mod resource;
pub mod schema;
