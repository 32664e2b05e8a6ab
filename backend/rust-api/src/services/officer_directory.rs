use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::RwLock;

use crate::error::ServiceError;
use crate::models::{Officer, Submission};

/// In-memory officer roster. Officer records only ever grow: submissions are
/// appended and the running score accumulates, nothing is removed or reset
/// for the lifetime of the process.
pub struct OfficerDirectory {
    officers: RwLock<HashMap<i32, Officer>>,
    roster_order: Vec<i32>,
    next_submission_id: AtomicI32,
}

impl OfficerDirectory {
    /// Builds the directory from the loaded roster, preserving file order
    /// for listings.
    pub fn new(roster: Vec<Officer>) -> Self {
        let roster_order = roster.iter().map(|o| o.id).collect();
        let officers = roster.into_iter().map(|o| (o.id, o)).collect();
        Self {
            officers: RwLock::new(officers),
            roster_order,
            next_submission_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.roster_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster_order.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<Officer> {
        self.officers.read().get(&id).cloned()
    }

    /// Snapshot of all officers in roster order, including their submission
    /// history and accumulated scores.
    pub fn list(&self) -> Vec<Officer> {
        let officers = self.officers.read();
        self.roster_order
            .iter()
            .filter_map(|id| officers.get(id).cloned())
            .collect()
    }

    /// Distinct unit names, sorted.
    pub fn units(&self) -> Vec<String> {
        let officers = self.officers.read();
        let mut units: Vec<String> = officers.values().map(|o| o.unit.clone()).collect();
        units.sort();
        units.dedup();
        units
    }

    pub fn allocate_submission_id(&self) -> i32 {
        self.next_submission_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Records a graded submission against its officer and adds the score to
    /// the officer's running total.
    pub fn append_submission(&self, submission: Submission) -> Result<(), ServiceError> {
        let mut officers = self.officers.write();
        let officer = officers
            .get_mut(&submission.officer_id)
            .ok_or(ServiceError::OfficerNotFound)?;
        officer.score += submission.score;
        officer.submissions.push(submission);
        Ok(())
    }
}
