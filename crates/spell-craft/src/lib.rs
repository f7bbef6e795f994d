//! spell-craft: build command-line interfaces from declarative plugin folders.
//!
//! A plugin is a directory holding `commands.txt` (`name:template` lines) and
//! `commands.{json,yaml,yml}` (per-command argument descriptions). Each line
//! compiles into a command whose `{{ placeholder }}` template is rendered with
//! the supplied flags and run through a shell.

#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod app;
pub mod domain;
pub mod infra;
pub mod usecases;

pub use app::Application;
