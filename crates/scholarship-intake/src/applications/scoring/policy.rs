use serde::{Deserialize, Serialize};

/// Eligibility band shown to the applicant after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityTier {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl EligibilityTier {
    pub const fn from_score(score: u8) -> Self {
        match score {
            85.. => Self::Excellent,
            70..=84 => Self::Good,
            55..=69 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityTier::Excellent => "excellent",
            EligibilityTier::Good => "good",
            EligibilityTier::Fair => "fair",
            EligibilityTier::NeedsImprovement => "needs_improvement",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            EligibilityTier::Excellent => "🎉 Xuất sắc! Bạn có khả năng cao được nhận học bổng.",
            EligibilityTier::Good => "👍 Tốt! Hồ sơ của bạn đạt yêu cầu xét học bổng.",
            EligibilityTier::Fair => "📝 Khá! Bạn có cơ hội được xét học bổng.",
            EligibilityTier::NeedsImprovement => {
                "💪 Hồ sơ cần cải thiện để tăng cơ hội nhận học bổng."
            }
        }
    }
}
