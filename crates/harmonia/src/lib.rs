//! Chart analysis core: aspects, sonic signals, attunement, transit fidelity
//! and prescription selection over a pluggable ephemeris provider.

pub mod angular;
pub mod aspects;
pub mod attunement;
pub mod body;
pub mod chart;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod fidelity;
pub mod prescription;
pub mod sonic;
pub mod zodiac;

pub use body::CelestialBody;
pub use chart::{compute_chart, ChartSnapshot};
pub use engine::HarmoniaEngine;
pub use error::{HarmoniaError, Result};
pub use ephemeris::{GeoLocation, Position};
