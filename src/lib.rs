//! Terminal client for the JATS task tracker.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod ui;
pub mod utils;
