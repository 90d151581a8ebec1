//! Ostap — tab-session core of a minimal desktop browser shell.
//!
//! The tab store owns the ordered tabs and the active tab; the surface
//! coordinator keeps one host rendering surface in step with the active tab.
//! This library crate exposes all modules for the binaries and integration tests.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
