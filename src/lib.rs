// src/lib.rs
// tonecheck - comment sentiment classification over a chat completion provider

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod llm;
pub mod sentiment;
pub mod web;

pub use error::{ClassifyError, Result};
