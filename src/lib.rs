//! Client core for the Yi-Vote e-voting platform: the list pipeline behind
//! the admin screens, the backend client, sessions, and the public voting
//! and live-results flows.

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod listview;
pub mod models;
pub mod ports;
pub mod provider;
pub mod screens;
pub mod session;
pub mod tasks;
pub mod voting;

pub use error::{Error, Result};
