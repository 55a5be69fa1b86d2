//! Route handlers organized by resource

pub mod dropoffs;
pub mod health;
