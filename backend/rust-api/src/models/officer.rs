use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roster entry and long-lived holder of submission history. The aggregate
/// `score` is the sum of the scores in `submissions`, folded in as each
/// submission is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Officer {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub rank: String,
    pub position: String,
    pub score: f32,
    pub submissions: Vec<Submission>,
}

impl Officer {
    pub fn new(id: i32, name: String, unit: String, rank: String, position: String) -> Self {
        Self {
            id,
            name,
            unit,
            rank,
            position,
            score: 0.0,
            submissions: Vec::new(),
        }
    }
}

/// Result of scoring one test. Created exactly once per test and owned by
/// the officer's history; the test itself keeps no reference back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i32,
    pub officer_id: i32,
    pub test_id: i32,
    /// Raw answer map as submitted: question id (string form) to chosen letter.
    pub answers: HashMap<String, String>,
    pub score: f32,
    pub submitted_at: DateTime<Utc>,
    pub subject_id: i32,
    pub subject_name: String,
}
