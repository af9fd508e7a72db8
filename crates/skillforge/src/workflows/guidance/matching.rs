use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::{CareerId, PersonalityProfile, TraitCategory};
use super::profile::clamp_score;

/// Per-career weighting of the four matcher dimensions, each on a 1-5
/// scale. Careers missing from the table fall back to [`Self::neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitWeights {
    pub analytical: u8,
    pub technical: u8,
    pub creative: u8,
    pub social: u8,
}

impl TraitWeights {
    pub const fn neutral() -> Self {
        Self {
            analytical: 3,
            technical: 3,
            creative: 3,
            social: 3,
        }
    }

    fn sum(&self) -> u16 {
        u16::from(self.analytical)
            + u16::from(self.technical)
            + u16::from(self.creative)
            + u16::from(self.social)
    }
}

/// One reasoning trigger: when the profile value for `category` is
/// strictly above `threshold`, `phrase` is appended to the rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningRule {
    pub category: TraitCategory,
    pub threshold: f32,
    pub phrase: String,
}

/// Data-driven matcher tables keyed by career slug.
///
/// Shipped as configuration rather than per-career branches so new
/// careers can be added without code changes; loadable from JSON via
/// [`Self::from_json_reader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub trait_weights: BTreeMap<CareerId, TraitWeights>,
    pub reasoning_rules: BTreeMap<CareerId, Vec<ReasoningRule>>,
    pub fallback_reason: String,
    pub max_recommendations: usize,
}

impl MatchingConfig {
    /// The built-in tables covering the six launch careers.
    pub fn standard() -> Self {
        let mut trait_weights = BTreeMap::new();
        let mut reasoning_rules = BTreeMap::new();

        let mut career = |slug: &str, weights: TraitWeights, rules: Vec<ReasoningRule>| {
            let id = CareerId(slug.to_string());
            trait_weights.insert(id.clone(), weights);
            reasoning_rules.insert(id, rules);
        };

        career(
            "data-scientist",
            TraitWeights {
                analytical: 5,
                technical: 5,
                creative: 3,
                social: 2,
            },
            vec![
                rule(TraitCategory::Analytical, 4.0, "Strong analytical thinking"),
                rule(
                    TraitCategory::Creativity,
                    3.0,
                    "Creative problem-solving skills",
                ),
            ],
        );
        career(
            "ux-designer",
            TraitWeights {
                analytical: 3,
                technical: 3,
                creative: 5,
                social: 4,
            },
            vec![
                rule(TraitCategory::Creativity, 4.0, "High creativity"),
                rule(TraitCategory::Helping, 3.0, "User-focused mindset"),
            ],
        );
        career(
            "software-engineer",
            TraitWeights {
                analytical: 4,
                technical: 5,
                creative: 3,
                social: 2,
            },
            vec![
                rule(TraitCategory::Analytical, 3.0, "Logical thinking"),
                rule(
                    TraitCategory::WorkStyle,
                    3.0,
                    "Structured approach to work",
                ),
            ],
        );
        career(
            "digital-marketing",
            TraitWeights {
                analytical: 3,
                technical: 2,
                creative: 4,
                social: 5,
            },
            vec![
                rule(TraitCategory::Creativity, 3.0, "Creative thinking"),
                rule(TraitCategory::Teamwork, 3.0, "Collaborative nature"),
            ],
        );
        career(
            "cybersecurity-analyst",
            TraitWeights {
                analytical: 5,
                technical: 5,
                creative: 2,
                social: 2,
            },
            vec![
                rule(TraitCategory::Analytical, 4.0, "Strong analytical skills"),
                rule(
                    TraitCategory::Security,
                    3.0,
                    "Security-conscious mindset",
                ),
            ],
        );
        career(
            "product-manager",
            TraitWeights {
                analytical: 4,
                technical: 3,
                creative: 4,
                social: 5,
            },
            vec![
                rule(TraitCategory::Leadership, 3.0, "Leadership potential"),
                rule(TraitCategory::Teamwork, 3.0, "Team collaboration skills"),
            ],
        );

        Self {
            trait_weights,
            reasoning_rules,
            fallback_reason: "Good overall match based on your responses".to_string(),
            max_recommendations: 6,
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn weights_for(&self, career_id: &CareerId) -> TraitWeights {
        self.trait_weights
            .get(career_id)
            .copied()
            .unwrap_or_else(TraitWeights::neutral)
    }

    pub fn rules_for(&self, career_id: &CareerId) -> &[ReasoningRule] {
        self.reasoning_rules
            .get(career_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn rule(category: TraitCategory, threshold: f32, phrase: &str) -> ReasoningRule {
    ReasoningRule {
        category,
        threshold,
        phrase: phrase.to_string(),
    }
}

/// Fit score for one career against the raw answer map.
///
/// The base signal is deliberately coarse: every answered question
/// contributes its raw score regardless of category, normalized onto
/// [0, 100], and the career's trait table adds a fixed bonus of
/// roughly [0, 12]. The result is clamped to [0, 100]. An empty
/// answer map contributes a base of 0 and returns just the bonus.
pub fn match_percentage(answers_by_question: &BTreeMap<u32, u8>, weights: &TraitWeights) -> u8 {
    let count = answers_by_question.len() as u32;
    let raw_sum: u32 = answers_by_question
        .values()
        .map(|score| u32::from(clamp_score(*score)))
        .sum();

    let base = if count == 0 {
        0.0
    } else {
        (raw_sum as f32 / (count * 5) as f32 * 100.0).round()
    };

    let adjustment = (f32::from(weights.sum()) / 4.0 / 4.0 * 10.0).round();

    (base + adjustment).clamp(0.0, 100.0) as u8
}

/// Human-readable rationale for a career, from the rule table.
pub fn reasoning(
    profile: &PersonalityProfile,
    career_id: &CareerId,
    config: &MatchingConfig,
) -> String {
    let triggered: Vec<&str> = config
        .rules_for(career_id)
        .iter()
        .filter(|rule| profile.get(rule.category) > rule.threshold)
        .map(|rule| rule.phrase.as_str())
        .collect();

    if triggered.is_empty() {
        config.fallback_reason.clone()
    } else {
        triggered.join(", ")
    }
}
