use std::collections::HashMap;

use crate::error::ServiceError;
use crate::models::Question;

/// Grades an answer map against the test's questions and returns the score
/// on a 10-point scale together with the number of correct answers.
///
/// Answer keys are question ids in string form; values are compared to the
/// correct letter case-insensitively. Keys that match no question and
/// questions with no answer both count as wrong, never as errors.
pub fn score_answers(
    questions: &[Question],
    answers: &HashMap<String, String>,
) -> Result<(f32, usize), ServiceError> {
    if questions.is_empty() {
        return Err(ServiceError::EmptyTest);
    }
    let correct = questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id.to_string())
                .is_some_and(|a| a.eq_ignore_ascii_case(&q.correct))
        })
        .count();
    let score = correct as f32 / questions.len() as f32 * 10.0;
    Ok((score, correct))
}
