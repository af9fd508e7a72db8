use crate::infra::{InMemoryAnswerArchive, InMemoryProgressionLedger, InMemorySubmissionRepository};
use clap::Args;
use skillforge::error::AppError;
use skillforge::workflows::guidance::{
    CareerCatalog, GuidanceService, MatchingConfig, QuizAnswer, QuizOutcome, QuizSubmission,
    TraitCategory, UserId,
};
use skillforge::workflows::progression::{
    ActorRole, ProjectCatalog, ProjectId, QualityMetrics, ReviewDisposition, ReviewRequest,
    SubmissionRequest, SubmissionWorkflow,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Learner id used throughout the demo
    #[arg(long, default_value = "demo-learner")]
    pub(crate) learner: String,
    /// Project slug for the submission portion of the demo
    #[arg(long, default_value = "basic-analysis")]
    pub(crate) project: String,
    /// Review score handed down by the demo mentor
    #[arg(long, default_value_t = 85)]
    pub(crate) score: u8,
    /// Skip the project submission and review portion of the demo
    #[arg(long)]
    pub(crate) skip_progression: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        learner,
        project,
        score,
        skip_progression,
    } = args;
    let learner = UserId(learner);

    println!("Skillforge guidance demo");

    let catalog = Arc::new(CareerCatalog::standard());
    let guidance = GuidanceService::new(
        catalog.clone(),
        Arc::new(MatchingConfig::standard()),
        Arc::new(InMemoryAnswerArchive::default()),
    );

    let outcome = match guidance.submit_quiz(QuizSubmission {
        user_id: Some(learner.clone()),
        answers: demo_assessment(),
    }) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Quiz rejected: {}", err);
            return Ok(());
        }
    };
    render_quiz_outcome(&outcome, &catalog);

    if skip_progression {
        return Ok(());
    }

    println!("\nProject submission demo");
    let workflow = SubmissionWorkflow::new(
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(InMemoryProgressionLedger::default()),
        Arc::new(ProjectCatalog::standard()),
    );

    let submitted = match workflow.submit(
        &ProjectId(project),
        SubmissionRequest {
            student_id: learner.clone(),
            title: "Exploring the city bikeshare dataset".to_string(),
            description: "Cleaning, visualizing, and narrating weekday commute patterns."
                .to_string(),
            github_url: Some("https://github.com/demo-learner/bikeshare".to_string()),
            demo_url: None,
            files: Vec::new(),
        },
    ) {
        Ok(submission) => submission,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Received submission {} for project {} -> status {}",
        submitted.id.0,
        submitted.project_id.0,
        submitted.status.label()
    );

    let mentor = UserId("demo-mentor".to_string());
    let in_review = match workflow.begin_review(&submitted.id, mentor.clone(), ActorRole::Mentor) {
        Ok(submission) => submission,
        Err(err) => {
            println!("  Could not start review: {}", err);
            return Ok(());
        }
    };
    println!("- Review started -> status {}", in_review.status.label());

    let verdict = ReviewRequest {
        reviewer_id: mentor,
        reviewer_role: ActorRole::Mentor,
        status: ReviewDisposition::Approved,
        score: Some(score),
        feedback: Some("Clear narrative and reproducible notebook".to_string()),
        mentor_notes: None,
        quality_metrics: Some(QualityMetrics {
            code_quality: Some(4),
            documentation: Some(4),
            creativity: Some(3),
            problem_solving: Some(4),
        }),
    };
    let review = match workflow.review(&submitted.id, verdict) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Review rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Verdict: {} (score {})",
        review.submission.status.label(),
        score
    );
    if review.xp_awarded > 0 {
        println!("  XP awarded: {}", review.xp_awarded);
    } else {
        println!("  XP awarded: none (score below the award threshold)");
    }

    match workflow.progress(&learner) {
        Ok(summary) => {
            println!(
                "- Progress: {} XP, level {}, {} submissions ({} approved, {} in review)",
                summary.total_xp,
                summary.level,
                summary.submissions,
                summary.approved,
                summary.in_review
            );
        }
        Err(err) => println!("  Progress unavailable: {}", err),
    }

    Ok(())
}

fn render_quiz_outcome(outcome: &QuizOutcome, catalog: &CareerCatalog) {
    println!("\nPersonality profile");
    for category in TraitCategory::ALL {
        let value = outcome.personality_profile.get(category);
        if value > 0.0 {
            println!("- {}: {:.1}", category.label(), value);
        }
    }

    println!(
        "\nCareer recommendations ({} active careers considered)",
        outcome.total_careers
    );
    for (rank, recommendation) in outcome.recommendations.iter().enumerate() {
        let name = catalog
            .get(&recommendation.career_id)
            .map(|career| career.name.as_str())
            .unwrap_or(recommendation.career_id.0.as_str());
        println!(
            "{}. {} ({}% match)",
            rank + 1,
            name,
            recommendation.match_percentage
        );
        println!("   {}", recommendation.reasoning);
    }
}

/// A hand-authored assessment leaning analytical and security-minded,
/// with enough spread to trigger several reasoning rules.
fn demo_assessment() -> Vec<QuizAnswer> {
    let scores = [
        (TraitCategory::Motivation, 4),
        (TraitCategory::Teamwork, 4),
        (TraitCategory::Lifestyle, 3),
        (TraitCategory::Leadership, 4),
        (TraitCategory::RiskTolerance, 2),
        (TraitCategory::Analytical, 5),
        (TraitCategory::Creativity, 4),
        (TraitCategory::Helping, 3),
        (TraitCategory::StressManagement, 4),
        (TraitCategory::WorkStyle, 4),
        (TraitCategory::Security, 5),
        (TraitCategory::Growth, 5),
    ];

    scores
        .iter()
        .enumerate()
        .map(|(index, (category, score))| QuizAnswer {
            question_id: index as u32 + 1,
            score: *score,
            category: *category,
        })
        .collect()
}
