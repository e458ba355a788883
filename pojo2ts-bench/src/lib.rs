//! # pojo2ts Bench
//!
//! Synthetic class models for benchmarking pojo2ts.

pub mod fixtures;
