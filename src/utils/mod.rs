//! Shared helpers for percentages and console formatting

pub mod currency;
pub mod math;
