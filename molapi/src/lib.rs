//! Music Assistant HTTP client for the Molette remote
//!
//! This crate provides:
//! - Typed models for the server's library and player endpoints
//! - A blocking [`MusicClient`] with an absorbing failure policy
//!   (log and return empty/default data, never raise to the UI)
//! - A cooperative [`StatePoller`] driven by the host loop

pub mod client;
pub mod error;
pub mod models;
pub mod poller;

pub use client::{DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, MusicClient, MusicClientBuilder};
pub use error::{Error, Result};
pub use models::{DEFAULT_VOLUME, PlayerState, Playlist, Track};
pub use poller::{StateCallback, StatePoller};
