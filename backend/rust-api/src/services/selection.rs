use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ServiceError;
use crate::models::{Question, Subject};

/// Draws each chapter's quota of questions from its pool, in chapter order.
///
/// Every chapter pool is shuffled independently and the first `quota`
/// questions are taken, so each draw is a uniform sample without
/// replacement. The catalog itself is never touched; the returned questions
/// are clones. Chapters with a zero quota contribute nothing, and a pool
/// smaller than its quota fails the whole draw.
pub fn assemble_questions<R: Rng + ?Sized>(
    subject: &Subject,
    rng: &mut R,
) -> Result<Vec<Question>, ServiceError> {
    let mut questions = Vec::with_capacity(subject.quota);
    for chapter in &subject.chapters {
        if chapter.quota == 0 {
            continue;
        }
        if chapter.questions.len() < chapter.quota {
            return Err(ServiceError::InsufficientQuestions(chapter.name.clone()));
        }
        let mut pool = chapter.questions.clone();
        pool.shuffle(rng);
        questions.extend(pool.into_iter().take(chapter.quota));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chapter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::ops::RangeInclusive;

    fn question(id: i32) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            option_a: "Option A".into(),
            option_b: "Option B".into(),
            option_c: "Option C".into(),
            option_d: "Option D".into(),
            correct: "A".into(),
        }
    }

    fn subject_with(chapters: Vec<(&str, usize, RangeInclusive<i32>)>) -> Subject {
        let quota = chapters.iter().map(|(_, q, _)| q).sum();
        let chapters = chapters
            .into_iter()
            .enumerate()
            .map(|(i, (name, quota, ids))| Chapter {
                id: i as i32 + 1,
                subject_id: 1,
                name: name.into(),
                quota,
                questions: ids.map(question).collect(),
            })
            .collect();
        Subject {
            id: 1,
            name: "Traffic Law".into(),
            description: "Traffic Law".into(),
            duration_minutes: 20,
            quota,
            chapters,
        }
    }

    #[test]
    fn fills_quota_from_each_chapter_in_order() {
        let subject = subject_with(vec![
            ("Chapter 1", 3, 1..=10),
            ("Chapter 2", 5, 11..=30),
            ("Chapter 3", 2, 31..=40),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = assemble_questions(&subject, &mut rng).unwrap();

        assert_eq!(questions.len(), 10);
        assert_eq!(questions[..3].iter().filter(|q| (1..=10).contains(&q.id)).count(), 3);
        assert_eq!(questions[3..8].iter().filter(|q| (11..=30).contains(&q.id)).count(), 5);
        assert_eq!(questions[8..].iter().filter(|q| (31..=40).contains(&q.id)).count(), 2);

        let ids: HashSet<i32> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 10, "draw must not repeat a question");
    }

    #[test]
    fn short_pool_fails_the_whole_draw() {
        let subject = subject_with(vec![("Chapter 1", 3, 1..=2)]);
        let mut rng = StdRng::seed_from_u64(7);
        let err = assemble_questions(&subject, &mut rng).unwrap_err();
        assert_eq!(err, ServiceError::InsufficientQuestions("Chapter 1".into()));
    }

    #[test]
    fn zero_quota_chapter_contributes_nothing() {
        let subject = subject_with(vec![("Chapter 1", 0, 1..=5), ("Chapter 2", 2, 6..=10)]);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = assemble_questions(&subject, &mut rng).unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| (6..=10).contains(&q.id)));
    }

    #[test]
    fn quota_equal_to_pool_takes_every_question() {
        let subject = subject_with(vec![("Chapter 1", 5, 1..=5)]);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = assemble_questions(&subject, &mut rng).unwrap();
        let ids: HashSet<i32> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=5).collect());
    }

    #[test]
    fn same_seed_reproduces_the_draw() {
        let subject = subject_with(vec![("Chapter 1", 4, 1..=20)]);
        let first: Vec<i32> = assemble_questions(&subject, &mut StdRng::seed_from_u64(11))
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        let second: Vec<i32> = assemble_questions(&subject, &mut StdRng::seed_from_u64(11))
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(first, second);
    }
}
