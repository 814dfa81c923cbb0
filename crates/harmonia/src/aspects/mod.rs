pub mod analyzer;
pub mod types;

pub use analyzer::{score_aspect, AspectAnalyzer};
pub use types::{Aspect, AspectNature, AspectTier, AspectType, MAJOR_ORB, MINOR_ORB};
