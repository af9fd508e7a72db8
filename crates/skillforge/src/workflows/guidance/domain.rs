use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for learners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Slug identifier for a career definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CareerId(pub String);

/// The twelve personality dimensions an assessment question can probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraitCategory {
    Motivation,
    Teamwork,
    Lifestyle,
    Leadership,
    RiskTolerance,
    Analytical,
    Creativity,
    Helping,
    StressManagement,
    WorkStyle,
    Security,
    Growth,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 12] = [
        TraitCategory::Motivation,
        TraitCategory::Teamwork,
        TraitCategory::Lifestyle,
        TraitCategory::Leadership,
        TraitCategory::RiskTolerance,
        TraitCategory::Analytical,
        TraitCategory::Creativity,
        TraitCategory::Helping,
        TraitCategory::StressManagement,
        TraitCategory::WorkStyle,
        TraitCategory::Security,
        TraitCategory::Growth,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            TraitCategory::Motivation => "motivation",
            TraitCategory::Teamwork => "teamwork",
            TraitCategory::Lifestyle => "lifestyle",
            TraitCategory::Leadership => "leadership",
            TraitCategory::RiskTolerance => "risk-tolerance",
            TraitCategory::Analytical => "analytical",
            TraitCategory::Creativity => "creativity",
            TraitCategory::Helping => "helping",
            TraitCategory::StressManagement => "stress-management",
            TraitCategory::WorkStyle => "work-style",
            TraitCategory::Security => "security",
            TraitCategory::Growth => "growth",
        }
    }
}

/// A single answered assessment question. Immutable once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: u32,
    /// Raw agreement score on the 1-5 scale.
    pub score: u8,
    pub category: TraitCategory,
}

/// Per-category average of a learner's answers, one decimal place.
///
/// Categories without a single answer stay at 0. Derived data: always
/// recomputed from the answers, never treated as a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub motivation: f32,
    pub teamwork: f32,
    pub lifestyle: f32,
    pub leadership: f32,
    pub risk_tolerance: f32,
    pub analytical: f32,
    pub creativity: f32,
    pub helping: f32,
    pub stress_management: f32,
    pub work_style: f32,
    pub security: f32,
    pub growth: f32,
}

impl PersonalityProfile {
    pub fn get(&self, category: TraitCategory) -> f32 {
        match category {
            TraitCategory::Motivation => self.motivation,
            TraitCategory::Teamwork => self.teamwork,
            TraitCategory::Lifestyle => self.lifestyle,
            TraitCategory::Leadership => self.leadership,
            TraitCategory::RiskTolerance => self.risk_tolerance,
            TraitCategory::Analytical => self.analytical,
            TraitCategory::Creativity => self.creativity,
            TraitCategory::Helping => self.helping,
            TraitCategory::StressManagement => self.stress_management,
            TraitCategory::WorkStyle => self.work_style,
            TraitCategory::Security => self.security,
            TraitCategory::Growth => self.growth,
        }
    }

    pub(crate) fn set(&mut self, category: TraitCategory, value: f32) {
        match category {
            TraitCategory::Motivation => self.motivation = value,
            TraitCategory::Teamwork => self.teamwork = value,
            TraitCategory::Lifestyle => self.lifestyle = value,
            TraitCategory::Leadership => self.leadership = value,
            TraitCategory::RiskTolerance => self.risk_tolerance = value,
            TraitCategory::Analytical => self.analytical = value,
            TraitCategory::Creativity => self.creativity = value,
            TraitCategory::Helping => self.helping = value,
            TraitCategory::StressManagement => self.stress_management = value,
            TraitCategory::WorkStyle => self.work_style = value,
            TraitCategory::Security => self.security = value,
            TraitCategory::Growth => self.growth = value,
        }
    }
}

/// Administrator-authored career definition. Read-only to the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDefinition {
    pub id: CareerId,
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub roadmap: Vec<String>,
    pub total_xp: u32,
    pub active: bool,
}

/// One ranked recommendation. Ephemeral: recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career_id: CareerId,
    /// Fit score clamped to [0, 100].
    pub match_percentage: u8,
    pub reasoning: String,
}

/// A learner's archived assessment, kept so the authenticated
/// recommendations path can recompute without a fresh quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAssessment {
    pub user_id: UserId,
    pub answers: Vec<QuizAnswer>,
    pub completed_at: DateTime<Utc>,
}
