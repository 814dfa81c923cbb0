pub mod mapper;
pub mod timbre;

pub use mapper::{chart_signals, compute_signal, pan_offset, SonicSignal};
pub use timbre::{house_timbre, FilterType, HouseTimbre};
