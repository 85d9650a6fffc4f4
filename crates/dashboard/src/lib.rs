//! Headless incident review dashboard.
//!
//! Talks to the MandlacX HTTP API through [`client::IncidentApi`] and holds
//! everything the screen needs: the list and selection state machine
//! ([`view`]), the incident list and player view models, and the
//! drag-to-scrub day [`timeline`].

pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod player;
pub mod selection;
pub mod timeline;
pub mod types;
pub mod view;
