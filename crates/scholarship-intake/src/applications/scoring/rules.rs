use super::super::domain::{AcademicRank, ApplicationRecord, GPA_FIELD, INCOME_FIELD, RANK_FIELD};
use super::super::numeric::{float_value, int_value};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

/// Score each rubric component independently. Returns the components and their unrounded sum.
pub(crate) fn score_record(
    record: &ApplicationRecord,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(6);

    let gpa = record.answer(GPA_FIELD).and_then(float_value).unwrap_or(0.0);
    let gpa_points = if config.gpa_scale > 0.0 {
        (gpa / config.gpa_scale * config.gpa_max_points)
            .min(config.gpa_max_points)
            .max(0.0)
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Gpa,
        points: gpa_points,
        notes: format!("gpa {gpa:.2} of {:.2}", config.gpa_scale),
    });

    let rank = record
        .answer_text(RANK_FIELD)
        .and_then(AcademicRank::from_answer);
    components.push(match rank {
        Some(rank) => ScoreComponent {
            factor: ScoreFactor::AcademicRank,
            points: config.rank_points.for_rank(rank),
            notes: format!("academic rank {}", rank.label()),
        },
        None => ScoreComponent {
            factor: ScoreFactor::AcademicRank,
            points: 0.0,
            notes: "academic rank not recognised".to_string(),
        },
    });

    let income = record.answer(INCOME_FIELD).and_then(int_value).unwrap_or(0);
    let income_points = config
        .income_bands
        .iter()
        .find(|band| income < band.below)
        .map(|band| band.points)
        .unwrap_or(config.income_floor_points);
    components.push(ScoreComponent {
        factor: ScoreFactor::FamilyIncome,
        points: income_points,
        notes: format!("monthly family income {income}"),
    });

    let situations = record
        .situations
        .iter()
        .filter(|situation| !situation.trim().is_empty())
        .count();
    components.push(ScoreComponent {
        factor: ScoreFactor::SpecialSituations,
        points: config.situation.points_for(situations),
        notes: format!("{situations} special situation(s)"),
    });

    let achievements = count_filled(&record.achievements);
    components.push(ScoreComponent {
        factor: ScoreFactor::Achievements,
        points: config.achievement.points_for(achievements),
        notes: format!("{achievements} achievement(s)"),
    });

    let evidences = count_filled(&record.evidences);
    components.push(ScoreComponent {
        factor: ScoreFactor::EvidenceLinks,
        points: config.evidence.points_for(evidences),
        notes: format!("{evidences} evidence link(s)"),
    });

    let total = components.iter().map(|component| component.points).sum();
    (components, total)
}

fn count_filled(entries: &[String]) -> usize {
    entries
        .iter()
        .filter(|entry| !entry.trim().is_empty())
        .count()
}
