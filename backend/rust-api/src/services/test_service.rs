use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ServiceError;
use crate::metrics::{SUBMISSIONS_SCORED_TOTAL, TESTS_CREATED_TOTAL, TESTS_STARTED_TOTAL};
use crate::models::{Catalog, Submission, Test, TestView};
use crate::services::officer_directory::OfficerDirectory;
use crate::services::scoring::score_answers;
use crate::services::selection::assemble_questions;
use crate::services::session_store::SessionStore;

/// Drives the test lifecycle: one test per officer and subject, created on
/// first request, started explicitly, graded exactly once.
///
/// All lifecycle decisions for a test happen under that officer's slot lock
/// in the session store, so concurrent requests cannot create duplicate
/// tests or grade one test twice.
pub struct TestService {
    catalog: Arc<Catalog>,
    officers: Arc<OfficerDirectory>,
    sessions: Arc<SessionStore>,
}

impl TestService {
    pub fn new(
        catalog: Arc<Catalog>,
        officers: Arc<OfficerDirectory>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            catalog,
            officers,
            sessions,
        }
    }

    /// Returns the officer's test for the subject, drawing a fresh question
    /// set if none exists yet. Reading an expired test fails with
    /// `Expired`; the test itself stays in place so a late submission can
    /// still be graded.
    pub fn get_or_create(&self, officer_id: i32, subject_id: i32) -> Result<TestView, ServiceError> {
        let officer = self
            .officers
            .get(officer_id)
            .ok_or(ServiceError::OfficerNotFound)?;
        let subject = self
            .catalog
            .subject(subject_id)
            .ok_or(ServiceError::SubjectNotFound)?;
        if subject.quota == 0 {
            return Err(ServiceError::NoQuota);
        }

        let now = Utc::now();
        self.sessions.with_slots(officer_id, |slots| {
            if let Some(test) = slots.get(&subject_id) {
                if test.is_expired_at(now) {
                    return Err(ServiceError::Expired);
                }
                return Ok(test.view(now));
            }

            let questions = assemble_questions(subject, &mut rand::rng())?;
            let test = Test {
                id: self.sessions.allocate_test_id(),
                subject: subject.public_view(),
                officer,
                questions,
                duration_secs: subject.duration_minutes * 60,
                started_at: None,
                finished: false,
            };
            tracing::info!(
                "Created test {} for officer {} on subject {} ({} questions)",
                test.id,
                officer_id,
                subject_id,
                test.questions.len()
            );
            TESTS_CREATED_TOTAL.inc();
            let view = test.view(now);
            slots.insert(subject_id, test);
            Ok(view)
        })
    }

    /// Starts the countdown for a previously created test. A test can only
    /// be started once.
    pub fn start(&self, officer_id: i32, test_id: i32) -> Result<TestView, ServiceError> {
        let now = Utc::now();
        self.sessions
            .with_existing_slots(officer_id, |slots| {
                let test = slots
                    .values_mut()
                    .find(|t| t.id == test_id)
                    .ok_or(ServiceError::TestNotFound)?;
                if test.started_at.is_some() {
                    return Err(ServiceError::AlreadyStarted);
                }
                test.started_at = Some(now);
                tracing::info!("Started test {} for officer {}", test_id, officer_id);
                TESTS_STARTED_TOTAL.inc();
                Ok(test.view(now))
            })
            .unwrap_or(Err(ServiceError::NoTestsForOfficer))
    }

    /// Grades a submission and records it against the officer. Late
    /// submissions are graded like any other; expiry never blocks grading.
    /// On any failure the test and the officer are left untouched.
    pub fn submit(
        &self,
        officer_id: i32,
        test_id: i32,
        answers: HashMap<String, String>,
    ) -> Result<Submission, ServiceError> {
        if answers.is_empty() {
            return Err(ServiceError::EmptyAnswers);
        }

        let now = Utc::now();
        self.sessions
            .with_existing_slots(officer_id, |slots| {
                let test = slots
                    .values_mut()
                    .find(|t| t.id == test_id)
                    .ok_or(ServiceError::TestNotFound)?;
                if test.started_at.is_none() {
                    return Err(ServiceError::NotStarted);
                }
                if test.finished {
                    return Err(ServiceError::AlreadySubmitted);
                }

                let (score, correct) = score_answers(&test.questions, &answers)?;
                let submission = Submission {
                    id: self.officers.allocate_submission_id(),
                    officer_id,
                    test_id,
                    answers,
                    score,
                    submitted_at: now,
                    subject_id: test.subject.id,
                    subject_name: test.subject.name.clone(),
                };
                self.officers.append_submission(submission.clone())?;
                test.finished = true;
                tracing::info!(
                    "Graded test {} for officer {}: {:.1} points ({} of {} correct)",
                    test_id,
                    officer_id,
                    score,
                    correct,
                    test.questions.len()
                );
                SUBMISSIONS_SCORED_TOTAL.inc();
                Ok(submission)
            })
            .unwrap_or(Err(ServiceError::NoTestsForOfficer))
    }
}
