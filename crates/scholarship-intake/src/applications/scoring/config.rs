use serde::{Deserialize, Serialize};

use super::super::domain::AcademicRank;

/// Rubric weights for the eligibility score. The default is the published rubric, which
/// sums to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub gpa_scale: f64,
    pub gpa_max_points: f64,
    pub rank_points: RankPoints,
    /// Monthly income bands, checked in order; the first band the income falls below wins.
    pub income_bands: Vec<IncomeBand>,
    pub income_floor_points: f64,
    pub situation: CountedItem,
    pub achievement: CountedItem,
    pub evidence: CountedItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankPoints {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub average: f64,
}

impl RankPoints {
    pub fn for_rank(&self, rank: AcademicRank) -> f64 {
        match rank {
            AcademicRank::Excellent => self.excellent,
            AcademicRank::Good => self.good,
            AcademicRank::Fair => self.fair,
            AcademicRank::Average => self.average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeBand {
    pub below: i64,
    pub points: f64,
}

/// Points per item, capped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountedItem {
    pub points_each: f64,
    pub cap: f64,
}

impl CountedItem {
    pub fn points_for(&self, count: usize) -> f64 {
        (count as f64 * self.points_each).min(self.cap)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gpa_scale: 4.0,
            gpa_max_points: 40.0,
            rank_points: RankPoints {
                excellent: 10.0,
                good: 7.0,
                fair: 5.0,
                average: 3.0,
            },
            income_bands: vec![
                IncomeBand {
                    below: 3_000_000,
                    points: 15.0,
                },
                IncomeBand {
                    below: 5_000_000,
                    points: 10.0,
                },
                IncomeBand {
                    below: 8_000_000,
                    points: 5.0,
                },
            ],
            income_floor_points: 2.0,
            situation: CountedItem {
                points_each: 2.0,
                cap: 10.0,
            },
            achievement: CountedItem {
                points_each: 3.0,
                cap: 15.0,
            },
            evidence: CountedItem {
                points_each: 2.0,
                cap: 10.0,
            },
        }
    }
}
