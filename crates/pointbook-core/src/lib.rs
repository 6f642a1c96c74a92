//! Core types and trait definitions for the pointbook game tracker.
//!
//! No HTTP or database dependencies. Every other crate depends on this one;
//! the scoring and clip-link logic here is pure and synchronous.

// Native `async fn` in traits; the store trait spells out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod clip;
pub mod error;
pub mod game;
pub mod point;
pub mod score;
pub mod squad;
pub mod store;
pub mod view;

pub use error::{Error, Result};
