//! Scuderia Showroom library.
//!
//! This crate provides the showroom functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod sync;
