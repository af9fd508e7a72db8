use super::domain::{PersonalityProfile, QuizAnswer, TraitCategory};

/// Clamp a raw answer onto the documented 1-5 scale.
pub(crate) fn clamp_score(score: u8) -> u8 {
    score.clamp(1, 5)
}

/// Reduce a set of answers to the per-category average profile.
///
/// Order of the input is irrelevant. Averages are rounded to one
/// decimal place; categories with no answers stay at 0. An empty
/// input yields the all-zero profile.
pub fn score_answers(answers: &[QuizAnswer]) -> PersonalityProfile {
    let mut sums = [0u32; TraitCategory::ALL.len()];
    let mut counts = [0u32; TraitCategory::ALL.len()];

    for answer in answers {
        let index = TraitCategory::ALL
            .iter()
            .position(|category| *category == answer.category)
            .unwrap_or_default();
        sums[index] += u32::from(clamp_score(answer.score));
        counts[index] += 1;
    }

    let mut profile = PersonalityProfile::default();
    for (index, category) in TraitCategory::ALL.iter().enumerate() {
        if counts[index] > 0 {
            let average = sums[index] as f32 / counts[index] as f32;
            profile.set(*category, (average * 10.0).round() / 10.0);
        }
    }

    profile
}
