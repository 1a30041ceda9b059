//! Core library for the `cityweather` widget.
//!
//! This crate defines:
//! - The weather client and its failure taxonomy
//! - The display state machine and the UI port it renders through
//! - The persisted last-city slot
//! - The controller that wires user triggers to all of the above
//!
//! It is used by `cityweather-cli`, but any host that can implement
//! [`UiPort`] can embed the widget.

pub mod client;
pub mod config;
pub mod controller;
pub mod display;
pub mod messages;
pub mod model;
pub mod store;

pub use client::{FetchError, OpenWeatherClient, WeatherClient};
pub use config::Config;
pub use controller::{Controller, Key, KeyOutcome};
pub use display::{Display, DisplayState, Node, UiPort, View};
pub use messages::MessagePolicy;
pub use model::WeatherResult;
pub use store::{FileStore, LastCityStore, MemoryStore};
