use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::models::Test;

/// Tests an officer holds, keyed by subject id. At most one entry per
/// subject ever exists for a given officer.
pub type OfficerSlots = HashMap<i32, Test>;

/// Concurrent two-level map of live tests: officer id to that officer's
/// per-subject slots. The outer lock only guards the shape of the map;
/// each officer's slots sit behind their own mutex, so the check-then-insert
/// in `with_slots` is atomic per officer without serializing unrelated
/// officers.
pub struct SessionStore {
    officers: RwLock<HashMap<i32, Arc<Mutex<OfficerSlots>>>>,
    next_test_id: AtomicI32,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            officers: RwLock::new(HashMap::new()),
            next_test_id: AtomicI32::new(1),
        }
    }

    /// Hands out process-wide unique test ids, starting at 1.
    pub fn allocate_test_id(&self) -> i32 {
        self.next_test_id.fetch_add(1, Ordering::Relaxed)
    }

    fn slots_entry(&self, officer_id: i32) -> Arc<Mutex<OfficerSlots>> {
        if let Some(slots) = self.officers.read().get(&officer_id) {
            return Arc::clone(slots);
        }
        let mut officers = self.officers.write();
        Arc::clone(officers.entry(officer_id).or_default())
    }

    /// Runs `f` with exclusive access to the officer's slots, creating the
    /// slot map if the officer has none yet.
    pub fn with_slots<R>(&self, officer_id: i32, f: impl FnOnce(&mut OfficerSlots) -> R) -> R {
        let slots = self.slots_entry(officer_id);
        let mut guard = slots.lock();
        f(&mut guard)
    }

    /// Like `with_slots` but never creates an entry; returns `None` when the
    /// officer has no tests at all.
    pub fn with_existing_slots<R>(
        &self,
        officer_id: i32,
        f: impl FnOnce(&mut OfficerSlots) -> R,
    ) -> Option<R> {
        let slots = {
            let officers = self.officers.read();
            officers.get(&officer_id).map(Arc::clone)
        }?;
        let mut guard = slots.lock();
        Some(f(&mut guard))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Officer, SubjectView, Test};

    fn dummy_test(id: i32, subject_id: i32) -> Test {
        Test {
            id,
            subject: SubjectView {
                id: subject_id,
                name: "Traffic Law".into(),
                description: "Traffic Law".into(),
                duration_minutes: 20,
                quota: 10,
            },
            officer: Officer::new(1, "A".into(), "Unit 1".into(), "Lieutenant".into(), "Staff".into()),
            questions: Vec::new(),
            duration_secs: 1200,
            started_at: None,
            finished: false,
        }
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let store = SessionStore::new();
        let a = store.allocate_test_id();
        let b = store.allocate_test_id();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn with_existing_slots_skips_unknown_officers() {
        let store = SessionStore::new();
        assert!(store.with_existing_slots(42, |_| ()).is_none());
        store.with_slots(42, |slots| {
            slots.insert(7, dummy_test(1, 7));
        });
        assert!(store.with_existing_slots(42, |_| ()).is_some());
    }

    #[test]
    fn check_then_insert_is_atomic_per_officer() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.with_slots(1, |slots| {
                    if let Some(existing) = slots.get(&5) {
                        return existing.id;
                    }
                    let id = store.allocate_test_id();
                    slots.insert(5, dummy_test(id, 5));
                    id
                })
            }));
        }
        let ids: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = ids[0];
        assert!(ids.iter().all(|&id| id == first));
        let stored = store
            .with_existing_slots(1, |slots| slots.len())
            .unwrap();
        assert_eq!(stored, 1);
    }
}
