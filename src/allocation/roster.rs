//! Shift roster filtering.
//!
//! This module selects the workers eligible for one shift, splitting them
//! into the available pool and the absent list.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Worker;

/// The workers rostered on one shift, split by attendance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShiftRoster<'a> {
    /// Active workers on the shift who are not marked absent.
    pub available: Vec<&'a Worker>,
    /// Active workers on the shift who are marked absent.
    pub absent: Vec<&'a Worker>,
}

impl ShiftRoster<'_> {
    /// Returns owned copies of the available workers.
    pub fn available_workers(&self) -> Vec<Worker> {
        self.available.iter().map(|w| (*w).clone()).collect()
    }
}

/// Filters a worker collection down to one shift.
///
/// Workers match when they are active and their shift code equals
/// `shift_code` exactly. Matching workers go to `absent` if their id is in
/// `absences` and to `available` otherwise; input order is preserved in both.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use allocation_engine::allocation::filter_shift_roster;
/// use allocation_engine::models::{Affinity, Worker};
///
/// let worker = |id: &str, shift: &str, active: bool| Worker {
///     id: id.to_string(),
///     name: String::new(),
///     active,
///     on_leave: false,
///     shift_code: shift.to_string(),
///     affinity: Affinity::Conventional,
///     productivity_rate: 200.0,
///     efficiency: 80.0,
///     enabled_roles: vec![],
///     experience: vec![],
/// };
/// let workers = vec![
///     worker("a", "T1", true),
///     worker("b", "T1", true),
///     worker("c", "T2", true),
///     worker("d", "T1", false),
/// ];
/// let absences = BTreeSet::from(["b".to_string()]);
///
/// let roster = filter_shift_roster(&workers, "T1", &absences);
/// assert_eq!(roster.available.len(), 1);
/// assert_eq!(roster.available[0].id, "a");
/// assert_eq!(roster.absent[0].id, "b");
/// ```
pub fn filter_shift_roster<'a>(
    workers: &'a [Worker],
    shift_code: &str,
    absences: &BTreeSet<String>,
) -> ShiftRoster<'a> {
    let (absent, available) = workers
        .iter()
        .filter(|w| w.active && w.shift_code == shift_code)
        .partition(|w| absences.contains(&w.id));

    ShiftRoster { available, absent }
}
