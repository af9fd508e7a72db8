use super::domain::QuizAnswer;

/// Validation errors raised before any scoring or archiving happens.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuizIntakeError {
    #[error("answers must contain at least one entry")]
    EmptyAnswers,
    #[error("question {question_id}: id must be a positive integer")]
    InvalidQuestionId { question_id: u32 },
    #[error("question {question_id}: score {score} is outside the 1-5 range")]
    ScoreOutOfRange { question_id: u32, score: u8 },
}

/// Reject malformed submissions up front so the scorer and matcher
/// only ever see validated data and can degrade gracefully.
pub fn validate_answers(answers: &[QuizAnswer]) -> Result<(), QuizIntakeError> {
    if answers.is_empty() {
        return Err(QuizIntakeError::EmptyAnswers);
    }

    for answer in answers {
        if answer.question_id == 0 {
            return Err(QuizIntakeError::InvalidQuestionId {
                question_id: answer.question_id,
            });
        }
        if !(1..=5).contains(&answer.score) {
            return Err(QuizIntakeError::ScoreOutOfRange {
                question_id: answer.question_id,
                score: answer.score,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::guidance::domain::TraitCategory;

    #[test]
    fn empty_submission_is_rejected() {
        assert_eq!(validate_answers(&[]), Err(QuizIntakeError::EmptyAnswers));
    }

    #[test]
    fn out_of_range_score_names_the_question() {
        let answers = [QuizAnswer {
            question_id: 7,
            score: 6,
            category: TraitCategory::Creativity,
        }];
        assert_eq!(
            validate_answers(&answers),
            Err(QuizIntakeError::ScoreOutOfRange {
                question_id: 7,
                score: 6
            })
        );
    }

    #[test]
    fn valid_answers_pass() {
        let answers = [QuizAnswer {
            question_id: 1,
            score: 3,
            category: TraitCategory::Motivation,
        }];
        assert_eq!(validate_answers(&answers), Ok(()));
    }
}
