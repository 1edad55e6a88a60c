mod config;
mod policy;
mod rules;

pub use config::{CountedItem, IncomeBand, RankPoints, ScoringConfig};
pub use policy::EligibilityTier;

use super::domain::ApplicationRecord;
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the rubric configuration to a record.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Components are summed unrounded; the total is rounded once and kept within 0..=100.
    pub fn score(&self, record: &ApplicationRecord) -> ScoreOutcome {
        let (components, raw_total) = rules::score_record(record, &self.config);
        let total = raw_total.round().clamp(0.0, 100.0) as u8;

        ScoreOutcome {
            total,
            tier: EligibilityTier::from_score(total),
            components,
        }
    }
}

/// Score a record against the default rubric.
pub fn score(record: &ApplicationRecord) -> u8 {
    ScoringEngine::default().score(record).total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Gpa,
    AcademicRank,
    FamilyIncome,
    SpecialSituations,
    Achievements,
    EvidenceLinks,
}

/// Discrete contribution to the score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub total: u8,
    pub tier: EligibilityTier,
    pub components: Vec<ScoreComponent>,
}

impl ScoreOutcome {
    pub fn component(&self, factor: ScoreFactor) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
    }
}
