//! Personality assessment scoring, career matching, and ranking.
//!
//! The scorer and matcher are pure free functions over explicit
//! parameters; the per-career weight and reasoning tables live in
//! [`MatchingConfig`] rather than code so they can be extended as
//! configuration.

pub mod catalog;
pub mod domain;
pub(crate) mod intake;
pub mod matching;
pub mod profile;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;

pub use catalog::CareerCatalog;
pub use domain::{
    CareerDefinition, CareerId, CareerMatch, PersonalityProfile, QuizAnswer, StoredAssessment,
    TraitCategory, UserId,
};
pub use intake::QuizIntakeError;
pub use matching::{match_percentage, reasoning, MatchingConfig, ReasoningRule, TraitWeights};
pub use profile::score_answers;
pub use ranking::{answers_by_question, recommend};
pub use repository::{AnswerArchive, ArchiveError};
pub use router::guidance_router;
pub use service::{GuidanceError, GuidanceService, QuizOutcome, QuizSubmission};
