use std::collections::BTreeMap;

use super::catalog::CareerCatalog;
use super::domain::{CareerMatch, PersonalityProfile, QuizAnswer};
use super::matching::{match_percentage, reasoning, MatchingConfig};

/// Collapse answers to the question-id -> raw-score map the matcher
/// consumes. Later answers for the same question win, mirroring the
/// archived-answer map shape.
pub fn answers_by_question(answers: &[QuizAnswer]) -> BTreeMap<u32, u8> {
    answers
        .iter()
        .map(|answer| (answer.question_id, answer.score))
        .collect()
}

/// Rank every active career against the answer set.
///
/// Output is sorted by match percentage descending; careers with equal
/// percentages keep their catalog order (the sort is stable). At most
/// `config.max_recommendations` entries are returned. An empty catalog
/// yields an empty list.
pub fn recommend(
    answers: &[QuizAnswer],
    profile: &PersonalityProfile,
    catalog: &CareerCatalog,
    config: &MatchingConfig,
) -> Vec<CareerMatch> {
    let raw = answers_by_question(answers);

    let mut matches: Vec<CareerMatch> = catalog
        .active()
        .map(|career| CareerMatch {
            career_id: career.id.clone(),
            match_percentage: match_percentage(&raw, &config.weights_for(&career.id)),
            reasoning: reasoning(profile, &career.id, config),
        })
        .collect();

    matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    matches.truncate(config.max_recommendations);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::guidance::domain::{CareerDefinition, CareerId, TraitCategory};
    use crate::workflows::guidance::profile::score_answers;

    fn answer(question_id: u32, score: u8, category: TraitCategory) -> QuizAnswer {
        QuizAnswer {
            question_id,
            score,
            category,
        }
    }

    fn full_assessment() -> Vec<QuizAnswer> {
        TraitCategory::ALL
            .iter()
            .enumerate()
            .map(|(index, category)| answer(index as u32 + 1, 4, *category))
            .collect()
    }

    #[test]
    fn output_is_sorted_descending_and_capped_at_six() {
        let answers = full_assessment();
        let profile = score_answers(&answers);
        let catalog = CareerCatalog::standard();
        let config = MatchingConfig::standard();

        let ranked = recommend(&answers, &profile, &catalog, &config);
        assert!(ranked.len() <= 6);
        assert!(!ranked.is_empty());
        for window in ranked.windows(2) {
            assert!(window[0].match_percentage >= window[1].match_percentage);
        }
    }

    #[test]
    fn ties_preserve_catalog_order() {
        // Two careers sharing one weight table must tie, and the one
        // listed first in the catalog must rank first.
        let mut config = MatchingConfig::standard();
        let weights = config.weights_for(&CareerId("data-scientist".to_string()));
        config
            .trait_weights
            .insert(CareerId("cybersecurity-analyst".to_string()), weights);

        let answers = full_assessment();
        let profile = score_answers(&answers);
        let catalog = CareerCatalog::standard();

        let ranked = recommend(&answers, &profile, &catalog, &config);
        let ds = ranked
            .iter()
            .position(|m| m.career_id.0 == "data-scientist")
            .expect("data-scientist ranked");
        let cyber = ranked
            .iter()
            .position(|m| m.career_id.0 == "cybersecurity-analyst")
            .expect("cybersecurity-analyst ranked");
        assert_eq!(
            ranked[ds].match_percentage,
            ranked[cyber].match_percentage
        );
        assert!(ds < cyber, "catalog order must break the tie");
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let answers = full_assessment();
        let profile = score_answers(&answers);
        let catalog = CareerCatalog::new(Vec::new());
        let config = MatchingConfig::standard();
        assert!(recommend(&answers, &profile, &catalog, &config).is_empty());
    }

    #[test]
    fn inactive_careers_are_skipped() {
        let definition = CareerDefinition {
            id: CareerId("data-scientist".to_string()),
            name: "Data Scientist".to_string(),
            description: String::new(),
            skills: Vec::new(),
            roadmap: Vec::new(),
            total_xp: 950,
            active: false,
        };
        let catalog = CareerCatalog::new(vec![definition]);

        let answers = full_assessment();
        let profile = score_answers(&answers);
        let config = MatchingConfig::standard();
        assert!(recommend(&answers, &profile, &catalog, &config).is_empty());
    }
}
