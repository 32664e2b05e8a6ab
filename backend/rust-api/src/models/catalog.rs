use serde::{Deserialize, Serialize};

/// A multiple-choice question with four options and one correct letter (A-D).
///
/// Identifiers are assigned once at catalog load and are unique across the
/// whole catalog, so the string-keyed answer lookup at scoring time cannot
/// collide between chapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: i32,
    pub prompt: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct: String,
}

impl Question {
    pub fn public_view(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            prompt: self.prompt.clone(),
            option_a: self.option_a.clone(),
            option_b: self.option_b.clone(),
            option_c: self.option_c.clone(),
            option_d: self.option_d.clone(),
        }
    }
}

/// Question as dealt to an examinee: the correct letter is not serialized.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: i32,
    pub prompt: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i32,
    pub subject_id: i32,
    pub name: String,
    /// How many questions this chapter contributes to an assembled test.
    pub quota: usize,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub duration_minutes: i64,
    /// Total question count of an assembled test, the sum of chapter quotas.
    pub quota: usize,
    pub chapters: Vec<Chapter>,
}

impl Subject {
    /// Trimmed projection without chapters, safe to embed in responses
    /// without re-exposing the question bank.
    pub fn public_view(&self) -> SubjectView {
        SubjectView {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            quota: self.quota,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub duration_minutes: i64,
    pub quota: usize,
}

/// The immutable subject tree loaded at startup. Read-only after
/// construction, so it is shared without locking.
#[derive(Debug, Default)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subject(&self, id: i32) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject_views(&self) -> Vec<SubjectView> {
        self.subjects.iter().map(Subject::public_view).collect()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn question_count(&self) -> usize {
        self.subjects
            .iter()
            .flat_map(|s| &s.chapters)
            .map(|c| c.questions.len())
            .sum()
    }
}
