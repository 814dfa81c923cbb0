pub mod adapter;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{parse_moment, positions_at, AscendantProvider, EphemerisProvider};
pub use types::{GeoLocation, Position};
