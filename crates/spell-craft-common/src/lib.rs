//! Common utilities shared across spell-craft crates.
//!
//! Provides terminal color handling and tracing setup.

#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod color;
pub mod telemetry;

pub use color::Colors;
pub use color::Hue;
pub use color::init as color_init;
