//! Seven-day roll-up of attunement scores.

use crate::attunement::classifier::AttunementReport;
use crate::body::CelestialBody;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most frequent gap bodies reported in a digest
pub const COMMON_GAP_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: NaiveDate,
    pub score: i32,
    pub gap_bodies: Vec<CelestialBody>,
}

impl DaySummary {
    pub fn from_report(day: NaiveDate, report: &AttunementReport) -> Self {
        Self {
            day,
            score: report.alignment_score,
            gap_bodies: report.gap_bodies(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDigest {
    pub days: Vec<DaySummary>,
    /// Integer mean of the daily scores (floor division)
    pub average: i32,
    pub best: DaySummary,
    pub worst: DaySummary,
    pub common_gaps: Vec<CelestialBody>,
}

impl WeeklyDigest {
    /// Aggregate per-day summaries. Returns `None` when `days` is empty.
    ///
    /// Ties for best/worst go to the earliest day; ties in gap frequency go to
    /// the body that appeared first.
    pub fn from_days(days: Vec<DaySummary>) -> Option<Self> {
        let first = days.first()?;
        let mut best = first;
        let mut worst = first;
        for day in &days[1..] {
            if day.score > best.score {
                best = day;
            }
            if day.score < worst.score {
                worst = day;
            }
        }

        let total: i64 = days.iter().map(|d| d.score as i64).sum();
        let average = total.div_euclid(days.len() as i64) as i32;

        let mut order: Vec<CelestialBody> = Vec::new();
        let mut counts: HashMap<CelestialBody, usize> = HashMap::new();
        for body in days.iter().flat_map(|d| d.gap_bodies.iter().copied()) {
            let count = counts.entry(body).or_insert(0);
            if *count == 0 {
                order.push(body);
            }
            *count += 1;
        }
        // Stable sort keeps first-appearance order among equal counts
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order.truncate(COMMON_GAP_LIMIT);

        let best = best.clone();
        let worst = worst.clone();
        Some(Self {
            best,
            worst,
            average,
            common_gaps: order,
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::CelestialBody::*;

    fn day(offset: u32, score: i32, gaps: &[CelestialBody]) -> DaySummary {
        DaySummary {
            day: NaiveDate::from_ymd_opt(2024, 6, 1 + offset).unwrap(),
            score,
            gap_bodies: gaps.to_vec(),
        }
    }

    #[test]
    fn test_weekly_scores() {
        let scores = [80, 60, 50, 40, 90, 70, 65];
        let days = scores.iter().enumerate().map(|(i, &s)| day(i as u32, s, &[])).collect();
        let digest = WeeklyDigest::from_days(days).unwrap();
        assert_eq!(digest.average, 65);
        assert_eq!(digest.best.score, 90);
        assert_eq!(digest.best.day, NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(digest.worst.score, 40);
        assert!(digest.common_gaps.is_empty());
    }

    #[test]
    fn test_average_floors() {
        let days = (0..7).map(|i| day(i, if i == 0 { 56 } else { 50 }, &[])).collect();
        // 356 / 7 = 50.857
        assert_eq!(WeeklyDigest::from_days(days).unwrap().average, 50);
    }

    #[test]
    fn test_common_gaps_ranked_by_frequency() {
        let days = vec![
            day(0, 50, &[Moon, Mars]),
            day(1, 50, &[Venus]),
            day(2, 50, &[Mars, Venus]),
            day(3, 50, &[Mercury, Mars]),
            day(4, 50, &[Sun]),
            day(5, 50, &[]),
            day(6, 50, &[Moon]),
        ];
        let digest = WeeklyDigest::from_days(days).unwrap();
        assert_eq!(digest.common_gaps, vec![Mars, Moon, Venus]);
    }

    #[test]
    fn test_ties_go_to_earliest_day() {
        let days = (0..7).map(|i| day(i, 70, &[])).collect();
        let digest = WeeklyDigest::from_days(days).unwrap();
        assert_eq!(digest.best.day, digest.worst.day);
        assert_eq!(digest.best.day, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_empty_week() {
        assert!(WeeklyDigest::from_days(Vec::new()).is_none());
    }
}
