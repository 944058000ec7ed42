//! The planning session.
//!
//! A [`PlanningSession`] owns everything one operator edits while planning a
//! shift: the selected shift, the planning parameters, the zones, the absence
//! set and the allocation list. It also enforces the workflow stages, so that
//! each kind of edit is only accepted in the stage that owns it.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::allocation::{
    AllocationList, CapacityPlan, GenerationResult, RankedCandidate, RoleFill, ShiftRoster,
    filter_shift_roster, generate_allocation, is_eligible, plan_capacity, rank_candidates,
};
use crate::config::{CertificationPolicy, FacilityConfig, PlanningConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allocation, AuditStep, RoleCatalog, Worker, Zone, total_cages, total_packages, validate_roster,
};

use super::stage::PlanningStage;

/// One operator's planning state for one shift.
#[derive(Debug, Clone)]
pub struct PlanningSession {
    id: Uuid,
    date: NaiveDate,
    shift_code: String,
    config: PlanningConfig,
    zones: Vec<Zone>,
    absences: BTreeSet<String>,
    allocations: AllocationList,
    generation_audit: Vec<AuditStep>,
    workers: Vec<Worker>,
    facility: Arc<FacilityConfig>,
    stage: PlanningStage,
    finalized_at: Option<DateTime<Utc>>,
}

impl PlanningSession {
    /// Opens a session in [`PlanningStage::ParametersSet`].
    ///
    /// The shift code must be one of the facility's shifts and the workers
    /// must pass [`validate_roster`]. When `config` is `None` the facility's
    /// planning defaults are used.
    pub fn new(
        facility: Arc<FacilityConfig>,
        date: NaiveDate,
        shift_code: impl Into<String>,
        workers: Vec<Worker>,
        config: Option<PlanningConfig>,
    ) -> EngineResult<Self> {
        let shift_code = shift_code.into();
        facility.shift(&shift_code)?;
        validate_roster(&workers)?;

        let config = config.unwrap_or_else(|| facility.planning().clone());
        let session = Self {
            id: Uuid::new_v4(),
            date,
            shift_code,
            config,
            zones: Vec::new(),
            absences: BTreeSet::new(),
            allocations: AllocationList::new(),
            generation_audit: Vec::new(),
            workers,
            facility,
            stage: PlanningStage::ParametersSet,
            finalized_at: None,
        };

        info!(
            session_id = %session.id,
            date = %session.date,
            shift_code = %session.shift_code,
            workers = session.workers.len(),
            "Planning session opened"
        );
        Ok(session)
    }

    /// The session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The planned date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The selected shift code.
    pub fn shift_code(&self) -> &str {
        &self.shift_code
    }

    /// The planning parameters in effect.
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// The zones entered so far.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Worker ids marked absent.
    pub fn absences(&self) -> &BTreeSet<String> {
        &self.absences
    }

    /// The current placements.
    pub fn allocations(&self) -> &AllocationList {
        &self.allocations
    }

    /// Audit steps from the last generation run.
    pub fn generation_audit(&self) -> &[AuditStep] {
        &self.generation_audit
    }

    /// The full worker roster the session was opened with.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// The role catalog.
    pub fn catalog(&self) -> &RoleCatalog {
        self.facility.catalog()
    }

    /// The current stage.
    pub fn stage(&self) -> PlanningStage {
        self.stage
    }

    /// When the plan was finalized, if it is.
    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    /// Switches to another shift.
    ///
    /// Absences and allocations are cleared in any stage, and a session past
    /// [`PlanningStage::ZonesPlanned`] is rewound to it. Selecting the current
    /// shift again changes nothing.
    pub fn select_shift(&mut self, shift_code: &str) -> EngineResult<()> {
        self.facility.shift(shift_code)?;
        if shift_code == self.shift_code {
            return Ok(());
        }

        let previous_stage = self.stage;
        self.shift_code = shift_code.to_string();
        self.absences.clear();
        self.allocations.clear();
        self.generation_audit.clear();
        self.finalized_at = None;
        if self.stage > PlanningStage::ZonesPlanned {
            self.stage = PlanningStage::ZonesPlanned;
        }

        info!(
            session_id = %self.id,
            shift_code = %self.shift_code,
            from = %previous_stage,
            to = %self.stage,
            "Shift changed"
        );
        Ok(())
    }

    /// Replaces the planning parameters.
    pub fn update_config(&mut self, config: PlanningConfig) -> EngineResult<()> {
        self.require_stage(PlanningStage::ParametersSet, "update the configuration")?;
        self.config = config;
        Ok(())
    }

    /// Replaces the zones.
    pub fn set_zones(&mut self, zones: Vec<Zone>) -> EngineResult<()> {
        self.require_stage(PlanningStage::ZonesPlanned, "edit zones")?;
        self.zones = zones;
        Ok(())
    }

    /// Replaces the absence set.
    ///
    /// Every id must belong to an active worker on the selected shift.
    /// Workers newly marked absent lose any placement they held.
    pub fn set_absences(&mut self, absences: BTreeSet<String>) -> EngineResult<()> {
        self.require_stage(PlanningStage::AttendanceConfirmed, "edit absences")?;
        for worker_id in &absences {
            self.require_on_shift(worker_id)?;
        }

        for worker_id in &absences {
            self.allocations.deallocate(worker_id);
        }
        self.absences = absences;
        Ok(())
    }

    /// Flips one worker's absence. Returns true if the worker is now absent.
    pub fn toggle_absence(&mut self, worker_id: &str) -> EngineResult<bool> {
        self.require_stage(PlanningStage::AttendanceConfirmed, "edit absences")?;
        self.require_on_shift(worker_id)?;

        if self.absences.remove(worker_id) {
            Ok(false)
        } else {
            self.allocations.deallocate(worker_id);
            self.absences.insert(worker_id.to_string());
            Ok(true)
        }
    }

    /// The available and absent workers for the selected shift.
    pub fn roster(&self) -> ShiftRoster<'_> {
        filter_shift_roster(&self.workers, &self.shift_code, &self.absences)
    }

    /// Required positions per role for the current zones and parameters.
    pub fn capacity(&self) -> CapacityPlan {
        plan_capacity(&self.zones, self.catalog(), &self.config)
    }

    /// Filled versus planned positions per role.
    pub fn fill_status(&self) -> Vec<RoleFill> {
        self.allocations.fill_status(&self.capacity())
    }

    /// Ids of available workers with no placement, in roster order.
    pub fn unallocated_worker_ids(&self) -> Vec<String> {
        let available = self.roster().available_workers();
        self.allocations
            .unallocated_pool(&available)
            .into_iter()
            .map(|w| w.id.clone())
            .collect()
    }

    /// Replaces all placements with a freshly generated ideal team.
    pub fn generate_ideal_team(&mut self) -> EngineResult<GenerationResult> {
        self.require_stage(PlanningStage::TeamAllocated, "generate the team")?;

        let available = self.roster().available_workers();
        let capacity = self.capacity();
        let result = generate_allocation(&available, &capacity, self.catalog(), &self.config)?;

        self.allocations.replace(result.allocations.clone());
        self.generation_audit = result.audit_steps.clone();

        info!(
            session_id = %self.id,
            available = available.len(),
            positions = capacity.total_positions(),
            allocated = result.allocations.len(),
            "Ideal team generated"
        );
        Ok(result)
    }

    /// Places a worker in a role by hand.
    ///
    /// The worker must be available on the shift and not already placed, the
    /// role must exist, and under the enforced policy the worker must hold the
    /// role's certification.
    pub fn assign(&mut self, worker_id: &str, role_id: &str) -> EngineResult<Allocation> {
        self.require_stage(PlanningStage::TeamAllocated, "assign workers")?;

        let role = self.catalog().get(role_id)?;
        let roster = self.roster();
        let worker = roster
            .available
            .iter()
            .find(|w| w.id == worker_id)
            .ok_or_else(|| EngineError::WorkerNotAvailable {
                worker_id: worker_id.to_string(),
            })?;

        if self.allocations.is_allocated(worker_id) {
            return Err(EngineError::WorkerAlreadyAllocated {
                worker_id: worker_id.to_string(),
            });
        }
        if !is_eligible(worker, role, self.config.certification_policy) {
            return Err(EngineError::CertificationRequired {
                worker_id: worker_id.to_string(),
                role_id: role_id.to_string(),
            });
        }
        if self.config.certification_policy == CertificationPolicy::Advisory
            && role.requires_certification
            && !worker.is_certified_for(role_id)
        {
            info!(
                session_id = %self.id,
                worker_id,
                role_id,
                "Uncertified worker placed under advisory policy"
            );
        }

        self.allocations.allocate(worker_id, role_id);
        Ok(Allocation::new(worker_id, role_id))
    }

    /// Removes a worker's placement. Unknown workers are a no-op.
    pub fn unassign(&mut self, worker_id: &str) -> EngineResult<()> {
        self.require_stage(PlanningStage::TeamAllocated, "remove workers")?;
        self.allocations.deallocate(worker_id);
        Ok(())
    }

    /// Unallocated workers ranked for a role, best first.
    pub fn candidates(&self, role_id: &str, search: Option<&str>) -> EngineResult<Vec<RankedCandidate>> {
        let role = self.catalog().get(role_id)?;
        let available = self.roster().available_workers();
        let pool = self.allocations.unallocated_pool(&available);
        Ok(rank_candidates(&pool, role, &self.config.weights, search))
    }

    /// Moves one stage forward.
    pub fn advance(&mut self) -> EngineResult<PlanningStage> {
        let target = self.stage.next().unwrap_or(self.stage);
        self.transition_to(target)
    }

    /// Moves one stage back.
    pub fn go_back(&mut self) -> EngineResult<PlanningStage> {
        let target = self.stage.previous().unwrap_or(self.stage);
        self.transition_to(target)
    }

    /// Closes the plan. Only valid from [`PlanningStage::TeamAllocated`].
    pub fn finalize(&mut self) -> EngineResult<DateTime<Utc>> {
        self.transition_to(PlanningStage::Finalized)?;
        self.finalized_at.ok_or(EngineError::InvalidTransition {
            from: PlanningStage::TeamAllocated,
            to: PlanningStage::Finalized,
        })
    }

    /// Moves to an adjacent stage.
    ///
    /// Entering [`PlanningStage::Finalized`] requires at least one allocation
    /// and records the finalization time; leaving it clears that time.
    pub fn transition_to(&mut self, target: PlanningStage) -> EngineResult<PlanningStage> {
        if !self.stage.is_adjacent(target) {
            return Err(EngineError::InvalidTransition {
                from: self.stage,
                to: target,
            });
        }
        if target == PlanningStage::Finalized && self.allocations.is_empty() {
            return Err(EngineError::NoAllocations);
        }

        let from = self.stage;
        self.stage = target;
        self.finalized_at = (target == PlanningStage::Finalized).then(Utc::now);

        info!(
            session_id = %self.id,
            from = %from,
            to = %target,
            allocations = self.allocations.len(),
            "Stage changed"
        );
        Ok(target)
    }

    /// A serializable snapshot of the session.
    pub fn view(&self) -> SessionView {
        let roster = self.roster();
        let capacity = self.capacity();

        SessionView {
            id: self.id,
            date: self.date,
            shift_code: self.shift_code.clone(),
            stage: self.stage,
            finalized_at: self.finalized_at,
            config: self.config.clone(),
            zones: self.zones.clone(),
            total_packages: total_packages(&self.zones),
            total_cages: total_cages(&self.zones),
            absences: self.absences.iter().cloned().collect(),
            available_count: roster.available.len(),
            absent_count: roster.absent.len(),
            fill_status: self.allocations.fill_status(&capacity),
            capacity,
            allocations: self.allocations.as_slice().to_vec(),
            unallocated: self.unallocated_worker_ids(),
        }
    }

    fn require_stage(&self, stage: PlanningStage, action: &str) -> EngineResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(EngineError::StageMismatch {
                action: action.to_string(),
                stage: self.stage,
            })
        }
    }

    fn require_on_shift(&self, worker_id: &str) -> EngineResult<()> {
        let on_shift = self
            .workers
            .iter()
            .any(|w| w.id == worker_id && w.active && w.shift_code == self.shift_code);
        if on_shift {
            Ok(())
        } else {
            Err(EngineError::WorkerNotAvailable {
                worker_id: worker_id.to_string(),
            })
        }
    }
}

/// A snapshot of a planning session for display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// The session id.
    pub id: Uuid,
    /// The planned date.
    pub date: NaiveDate,
    /// The selected shift code.
    pub shift_code: String,
    /// The current stage.
    pub stage: PlanningStage,
    /// When the plan was finalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
    /// The planning parameters in effect.
    pub config: PlanningConfig,
    /// The zones entered so far.
    pub zones: Vec<Zone>,
    /// Total packages across zones.
    pub total_packages: u64,
    /// Total cages across zones.
    pub total_cages: u64,
    /// Worker ids marked absent.
    pub absences: Vec<String>,
    /// Number of available workers.
    pub available_count: usize,
    /// Number of absent workers.
    pub absent_count: usize,
    /// Required positions per role.
    pub capacity: CapacityPlan,
    /// Filled versus planned positions per role.
    pub fill_status: Vec<RoleFill>,
    /// The current placements.
    pub allocations: Vec<Allocation>,
    /// Available workers with no placement.
    pub unallocated: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FacilityMetadata, ShiftDefinition};
    use crate::models::{Affinity, RoleCatalog};
    use chrono::NaiveTime;

    fn create_facility() -> Arc<FacilityConfig> {
        let shift = |code: &str, start: u32| ShiftDefinition {
            id: format!("turno-{}", code),
            code: code.to_string(),
            name: code.to_string(),
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt((start + 8) % 24, 20, 0).unwrap(),
        };
        Arc::new(FacilityConfig::new(
            FacilityMetadata {
                code: "TEST".to_string(),
                name: "Test Facility".to_string(),
            },
            RoleCatalog::standard(),
            vec![shift("T1", 0), shift("T2", 8), shift("T3", 16)],
            PlanningConfig::default(),
        ))
    }

    fn create_worker(id: &str, shift_code: &str, productivity_rate: f64) -> Worker {
        Worker {
            id: id.to_string(),
            name: format!("Worker {}", id),
            active: true,
            on_leave: false,
            shift_code: shift_code.to_string(),
            affinity: Affinity::Conventional,
            productivity_rate,
            efficiency: 60.0,
            enabled_roles: vec![],
            experience: vec![],
        }
    }

    fn create_workers() -> Vec<Worker> {
        vec![
            create_worker("a", "T1", 120.0),
            create_worker("b", "T1", 180.0),
            create_worker("c", "T1", 150.0),
            create_worker("d", "T2", 200.0),
        ]
    }

    fn create_zone(id: &str, package_count: u64) -> Zone {
        Zone {
            id: id.to_string(),
            name: id.to_string(),
            cage_count: 10,
            package_count,
        }
    }

    fn create_session() -> PlanningSession {
        PlanningSession::new(
            create_facility(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            "T1",
            create_workers(),
            None,
        )
        .unwrap()
    }

    fn session_at(stage: PlanningStage) -> PlanningSession {
        let mut session = create_session();
        while session.stage() < stage {
            if session.stage() == PlanningStage::ZonesPlanned {
                session.set_zones(vec![create_zone("z1", 800)]).unwrap();
            }
            if session.stage() == PlanningStage::TeamAllocated {
                session.generate_ideal_team().unwrap();
            }
            session.advance().unwrap();
        }
        session
    }

    #[test]
    fn test_new_session_starts_at_parameters() {
        let session = create_session();
        assert_eq!(session.stage(), PlanningStage::ParametersSet);
        assert_eq!(session.config(), &PlanningConfig::default());
        assert!(session.allocations().is_empty());
        assert!(session.finalized_at().is_none());
    }

    #[test]
    fn test_new_session_rejects_unknown_shift() {
        let result = PlanningSession::new(
            create_facility(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            "T9",
            create_workers(),
            None,
        );
        assert!(matches!(result, Err(EngineError::ShiftNotFound { .. })));
    }

    #[test]
    fn test_new_session_rejects_duplicate_workers() {
        let mut workers = create_workers();
        workers.push(create_worker("a", "T2", 100.0));

        let result = PlanningSession::new(
            create_facility(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            "T1",
            workers,
            None,
        );
        match result {
            Err(EngineError::InvalidWorker { worker_id, .. }) => assert_eq!(worker_id, "a"),
            other => panic!("Expected InvalidWorker error, got {:?}", other.map(|s| s.id())),
        }
    }

    #[test]
    fn test_advance_and_back_move_one_step() {
        let mut session = create_session();
        assert_eq!(session.advance().unwrap(), PlanningStage::ZonesPlanned);
        assert_eq!(session.advance().unwrap(), PlanningStage::AttendanceConfirmed);
        assert_eq!(session.go_back().unwrap(), PlanningStage::ZonesPlanned);
    }

    #[test]
    fn test_cannot_skip_stages() {
        let mut session = create_session();
        match session.transition_to(PlanningStage::TeamAllocated) {
            Err(EngineError::InvalidTransition { from, to }) => {
                assert_eq!(from, PlanningStage::ParametersSet);
                assert_eq!(to, PlanningStage::TeamAllocated);
            }
            other => panic!("Expected InvalidTransition error, got {:?}", other),
        }
    }

    #[test]
    fn test_back_from_first_stage_fails() {
        let mut session = create_session();
        assert!(matches!(
            session.go_back(),
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_finalize_requires_allocations() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        session.advance().unwrap();

        assert!(matches!(session.finalize(), Err(EngineError::NoAllocations)));
        assert_eq!(session.stage(), PlanningStage::TeamAllocated);
    }

    #[test]
    fn test_finalize_from_wrong_stage_fails() {
        let mut session = session_at(PlanningStage::ZonesPlanned);
        assert!(matches!(
            session.finalize(),
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_finalize_records_timestamp_and_back_clears_it() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.generate_ideal_team().unwrap();

        let finalized_at = session.finalize().unwrap();
        assert_eq!(session.finalized_at(), Some(finalized_at));
        assert_eq!(session.stage(), PlanningStage::Finalized);

        session.go_back().unwrap();
        assert!(session.finalized_at().is_none());
        assert_eq!(session.zones().len(), 1);
        assert!(!session.allocations().is_empty());
    }

    #[test]
    fn test_edits_are_stage_gated() {
        let mut session = create_session();
        match session.set_zones(vec![create_zone("z1", 100)]) {
            Err(EngineError::StageMismatch { stage, .. }) => {
                assert_eq!(stage, PlanningStage::ParametersSet)
            }
            other => panic!("Expected StageMismatch error, got {:?}", other),
        }
        assert!(session.generate_ideal_team().is_err());
        assert!(session.set_absences(BTreeSet::new()).is_err());

        session.advance().unwrap();
        assert!(session.update_config(PlanningConfig::default()).is_err());
    }

    #[test]
    fn test_update_config_in_parameters_stage() {
        let mut session = create_session();
        let mut config = PlanningConfig::default();
        config.induction_positions = 3;

        session.update_config(config).unwrap();
        assert_eq!(session.capacity().positions_for("func-001"), 3);
    }

    #[test]
    fn test_absences_shrink_available_pool() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        session.set_absences(BTreeSet::from(["b".to_string()])).unwrap();

        let roster = session.roster();
        assert_eq!(roster.available.len(), 2);
        assert_eq!(roster.absent[0].id, "b");
    }

    #[test]
    fn test_absence_for_worker_off_shift_rejected() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        assert!(matches!(
            session.toggle_absence("d"),
            Err(EngineError::WorkerNotAvailable { .. })
        ));
    }

    #[test]
    fn test_toggle_absence() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        assert!(session.toggle_absence("a").unwrap());
        assert!(session.absences().contains("a"));
        assert!(!session.toggle_absence("a").unwrap());
        assert!(session.absences().is_empty());
    }

    #[test]
    fn test_new_absence_removes_placement() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.generate_ideal_team().unwrap();
        assert!(session.allocations().is_allocated("b"));

        session.go_back().unwrap();
        session.toggle_absence("b").unwrap();
        assert!(!session.allocations().is_allocated("b"));
    }

    #[test]
    fn test_shift_change_clears_absences_and_allocations() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        session.toggle_absence("a").unwrap();
        session.advance().unwrap();
        session.generate_ideal_team().unwrap();

        session.select_shift("T2").unwrap();
        assert!(session.absences().is_empty());
        assert!(session.allocations().is_empty());
        assert_eq!(session.stage(), PlanningStage::ZonesPlanned);
        assert_eq!(session.roster().available.len(), 1);
        assert_eq!(session.zones().len(), 1);
    }

    #[test]
    fn test_reselecting_same_shift_keeps_allocations() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        session.toggle_absence("a").unwrap();
        session.advance().unwrap();
        session.generate_ideal_team().unwrap();
        let before = session.allocations().len();
        assert!(before > 0);

        session.select_shift("T1").unwrap();
        assert_eq!(session.allocations().len(), before);
        assert!(session.absences().contains("a"));
        assert_eq!(session.stage(), PlanningStage::TeamAllocated);
    }

    #[test]
    fn test_shift_change_in_parameters_stage_keeps_stage() {
        let mut session = create_session();
        session.select_shift("T3").unwrap();
        assert_eq!(session.stage(), PlanningStage::ParametersSet);
        assert_eq!(session.shift_code(), "T3");
    }

    #[test]
    fn test_shift_change_to_unknown_shift_keeps_state() {
        let mut session = session_at(PlanningStage::AttendanceConfirmed);
        session.toggle_absence("a").unwrap();

        assert!(session.select_shift("T7").is_err());
        assert_eq!(session.shift_code(), "T1");
        assert!(session.absences().contains("a"));
    }

    #[test]
    fn test_generate_replaces_allocations() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.assign("a", "func-013").unwrap();

        let result = session.generate_ideal_team().unwrap();
        assert_eq!(session.allocations().as_slice(), result.allocations.as_slice());
        assert!(!session.allocations().as_slice().contains(&Allocation::new("a", "func-013")));
        assert_eq!(session.generation_audit().len(), result.allocations.len());
    }

    #[test]
    fn test_generated_team_uses_best_sorter() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        let result = session.generate_ideal_team().unwrap();
        assert_eq!(result.allocations[0], Allocation::new("b", "func-002"));
    }

    #[test]
    fn test_assign_validates_worker() {
        let mut session = session_at(PlanningStage::TeamAllocated);

        assert!(matches!(
            session.assign("d", "func-002"),
            Err(EngineError::WorkerNotAvailable { .. })
        ));
        assert!(matches!(
            session.assign("a", "func-404"),
            Err(EngineError::RoleNotFound { .. })
        ));

        session.assign("a", "func-002").unwrap();
        assert!(matches!(
            session.assign("a", "func-001"),
            Err(EngineError::WorkerAlreadyAllocated { .. })
        ));
    }

    #[test]
    fn test_assign_enforces_certification_when_configured() {
        let mut session = create_session();
        let mut config = PlanningConfig::default();
        config.certification_policy = CertificationPolicy::Enforced;
        session.update_config(config).unwrap();
        while session.stage() < PlanningStage::TeamAllocated {
            session.advance().unwrap();
        }

        match session.assign("a", "func-003") {
            Err(EngineError::CertificationRequired { worker_id, role_id }) => {
                assert_eq!(worker_id, "a");
                assert_eq!(role_id, "func-003");
            }
            other => panic!("Expected CertificationRequired error, got {:?}", other),
        }
        session.assign("a", "func-002").unwrap();
    }

    #[test]
    fn test_advisory_policy_allows_uncertified_assignment() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.assign("a", "func-003").unwrap();
        assert_eq!(session.allocations().count_for_role("func-003"), 1);
    }

    #[test]
    fn test_unassign_is_idempotent() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.assign("a", "func-002").unwrap();

        session.unassign("a").unwrap();
        session.unassign("a").unwrap();
        assert!(session.allocations().is_empty());
    }

    #[test]
    fn test_candidates_exclude_allocated_workers() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.assign("b", "func-002").unwrap();

        let candidates = session.candidates("func-002", None).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.worker_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_candidates_unknown_role() {
        let session = create_session();
        assert!(matches!(
            session.candidates("func-404", None),
            Err(EngineError::RoleNotFound { .. })
        ));
    }

    #[test]
    fn test_view_reflects_state() {
        let mut session = session_at(PlanningStage::TeamAllocated);
        session.assign("c", "func-002").unwrap();

        let view = session.view();
        assert_eq!(view.stage, PlanningStage::TeamAllocated);
        assert_eq!(view.total_packages, 800);
        assert_eq!(view.total_cages, 10);
        assert_eq!(view.available_count, 3);
        assert_eq!(view.allocations.len(), 1);
        assert_eq!(view.unallocated, vec!["a".to_string(), "b".to_string()]);
        assert!(view.fill_status.iter().any(|f| f.role_id == "func-002" && f.is_full));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["stage"], "team_allocated");
        assert!(json.get("finalized_at").is_none());
    }
}
