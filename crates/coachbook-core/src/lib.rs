//! Core types and trait definitions for Coachbook, a coaching-practice
//! tracker.
//!
//! This crate is free of HTTP dependencies. It owns the domain model, the
//! [`store::PracticeStore`] abstraction with its in-memory implementation,
//! and the dashboard aggregator.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod balance;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod legacy;
pub mod memory;
pub mod money;
pub mod navigation;
pub mod payment;
pub mod session;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
