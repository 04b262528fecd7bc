#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

//! Aegisd library - shared types for testing and API

pub mod api;
pub mod config;
pub mod error;
pub mod state;
