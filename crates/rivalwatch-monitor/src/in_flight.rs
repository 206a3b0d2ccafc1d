//! Single-flight guard keyed by target id.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Set of target ids with a job currently running in this process.
#[derive(Debug, Default)]
pub struct InFlight {
    ids: Mutex<HashSet<i64>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target_id`, or `None` if another job already holds it.
    ///
    /// The claim is released when the returned permit is dropped.
    pub fn try_acquire(&self, target_id: i64) -> Option<InFlightPermit<'_>> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(target_id) {
            return None;
        }
        Some(InFlightPermit {
            owner: self,
            target_id,
        })
    }

    #[must_use]
    pub fn contains(&self, target_id: i64) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&target_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII claim on one target id.
#[derive(Debug)]
pub struct InFlightPermit<'a> {
    owner: &'a InFlight,
    target_id: i64,
}

impl InFlightPermit<'_> {
    #[must_use]
    pub fn target_id(&self) -> i64 {
        self.target_id
    }
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.owner
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.target_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_for_same_id_is_refused() {
        let in_flight = InFlight::new();
        let first = in_flight.try_acquire(7);
        assert!(first.is_some());
        assert!(in_flight.try_acquire(7).is_none());
    }

    #[test]
    fn distinct_ids_do_not_block_each_other() {
        let in_flight = InFlight::new();
        let _a = in_flight.try_acquire(1).unwrap();
        let _b = in_flight.try_acquire(2).unwrap();
        assert_eq!(in_flight.len(), 2);
    }

    #[test]
    fn dropping_permit_releases_id() {
        let in_flight = InFlight::new();
        {
            let permit = in_flight.try_acquire(3).unwrap();
            assert_eq!(permit.target_id(), 3);
            assert!(in_flight.contains(3));
        }
        assert!(!in_flight.contains(3));
        assert!(in_flight.is_empty());
        assert!(in_flight.try_acquire(3).is_some());
    }
}
