pub mod classifier;
pub mod digest;
pub mod formatter;

pub use classifier::{
    alignment_score, classify_gap, AttunementClassifier, AttunementEntry, AttunementReport,
    AttunementStatus,
};
pub use digest::{DaySummary, WeeklyDigest};
pub use formatter::{house_theme, InsightContext, InsightFormatter, TemplateFormatter};
