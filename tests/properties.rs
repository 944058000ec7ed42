//! Property tests for the allocation engine.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use rust_decimal::Decimal;

use allocation_engine::allocation::{
    AllocationList, adequacy_score, bulky_sorting_positions, conventional_sorting_positions,
    filter_shift_roster, generate_allocation, plan_capacity, rank_candidates,
};
use allocation_engine::config::{PlanningConfig, ScoringWeights};
use allocation_engine::models::{Affinity, ExperienceEntry, RoleCatalog, Worker, Zone};

fn worker_strategy() -> impl Strategy<Value = Worker> {
    (
        any::<bool>(),
        prop_oneof![Just("T1"), Just("T2")],
        any::<bool>(),
        0.0f64..2000.0,
        -50.0f64..150.0,
        prop::collection::vec((1usize..=13, 0u8..=5), 0..4),
    )
        .prop_map(|(active, shift, bulky, productivity_rate, efficiency, experience)| {
            let mut seen = HashSet::new();
            let experience = experience
                .into_iter()
                .filter(|(role, _)| seen.insert(*role))
                .map(|(role, level)| ExperienceEntry {
                    role_id: format!("func-{:03}", role),
                    level,
                })
                .collect();
            Worker {
                id: String::new(),
                name: String::new(),
                active,
                on_leave: false,
                shift_code: shift.to_string(),
                affinity: if bulky { Affinity::Bulky } else { Affinity::Conventional },
                productivity_rate,
                efficiency,
                enabled_roles: vec![],
                experience,
            }
        })
}

fn workers_strategy(max: usize) -> impl Strategy<Value = Vec<Worker>> {
    prop::collection::vec(worker_strategy(), 0..max).prop_map(|workers| {
        workers
            .into_iter()
            .enumerate()
            .map(|(i, mut w)| {
                w.id = format!("colab-{:03}", i);
                w.name = format!("Worker {}", i);
                w
            })
            .collect()
    })
}

fn zones_strategy() -> impl Strategy<Value = Vec<Zone>> {
    prop::collection::vec(0u64..5000, 0..8).prop_map(|counts| {
        counts
            .into_iter()
            .enumerate()
            .map(|(i, package_count)| Zone {
                id: format!("zone-{}", i),
                name: format!("Zone {}", i),
                cage_count: 10,
                package_count,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn score_stays_within_bounds(worker in worker_strategy(), performance in 0.0f64..=100.0) {
        let catalog = RoleCatalog::standard();
        let weights = ScoringWeights::from_performance(performance);
        for role in catalog.roles() {
            let score = adequacy_score(&worker, role, &weights);
            prop_assert!((0.0..=100.0).contains(&score), "score {} for {}", score, role.id);
        }
    }

    #[test]
    fn roster_partitions_matching_workers(workers in workers_strategy(20), absent_mask in any::<u32>()) {
        let absences: BTreeSet<String> = workers
            .iter()
            .enumerate()
            .filter(|(i, _)| absent_mask & (1u32 << *i) != 0)
            .map(|(_, w)| w.id.clone())
            .collect();

        let roster = filter_shift_roster(&workers, "T1", &absences);
        let expected = workers.iter().filter(|w| w.active && w.shift_code == "T1").count();

        prop_assert_eq!(roster.available.len() + roster.absent.len(), expected);
        prop_assert!(roster.available.iter().all(|w| !absences.contains(&w.id)));
        prop_assert!(roster.absent.iter().all(|w| absences.contains(&w.id)));
    }

    #[test]
    fn conventional_sorting_between_one_and_two_per_zone(zones in zones_strategy(), threshold in 0u64..5000) {
        let positions = conventional_sorting_positions(&zones, threshold) as usize;
        prop_assert!(positions >= zones.len());
        prop_assert!(positions <= zones.len() * 2);
    }

    #[test]
    fn bulky_sorting_covers_bulky_volume(total in 0u64..1_000_000, rate in 1u32..1000) {
        let percentage = Decimal::new(10, 0);
        let rate = Decimal::from(rate);
        let positions = Decimal::from(bulky_sorting_positions(total, percentage, rate));
        let bulky = Decimal::from(total) * percentage / Decimal::ONE_HUNDRED;

        prop_assert!(positions * rate >= bulky);
        prop_assert!((positions - Decimal::ONE) * rate < bulky || positions.is_zero());
    }

    #[test]
    fn generation_respects_uniqueness_and_capacity(workers in workers_strategy(30), zones in zones_strategy()) {
        let catalog = RoleCatalog::standard();
        let config = PlanningConfig::default();
        let roster = filter_shift_roster(&workers, "T1", &BTreeSet::new());
        let available = roster.available_workers();
        let plan = plan_capacity(&zones, &catalog, &config);

        let result = generate_allocation(&available, &plan, &catalog, &config).unwrap();

        let unique: HashSet<&str> = result.allocations.iter().map(|a| a.worker_id.as_str()).collect();
        prop_assert_eq!(unique.len(), result.allocations.len());
        prop_assert_eq!(
            result.allocations.len(),
            available.len().min(plan.total_positions() as usize)
        );

        let list = AllocationList::from(result.allocations.clone());
        for fill in list.fill_status(&plan) {
            prop_assert!(fill.filled <= fill.capacity);
        }
        prop_assert!(result.allocations.iter().all(|a| available.iter().any(|w| w.id == a.worker_id)));
    }

    #[test]
    fn generation_is_deterministic(workers in workers_strategy(20), zones in zones_strategy()) {
        let catalog = RoleCatalog::standard();
        let config = PlanningConfig::default();
        let plan = plan_capacity(&zones, &catalog, &config);

        let first = generate_allocation(&workers, &plan, &catalog, &config).unwrap();
        let second = generate_allocation(&workers, &plan, &catalog, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn deallocate_is_idempotent(workers in workers_strategy(10), index in 0usize..10) {
        let mut list = AllocationList::new();
        for w in &workers {
            list.allocate(w.id.clone(), "func-002");
        }
        let target = format!("colab-{:03}", index);

        list.deallocate(&target);
        let once = list.clone();
        list.deallocate(&target);

        prop_assert_eq!(&list, &once);
        prop_assert!(!list.is_allocated(&target));
    }

    #[test]
    fn ranking_is_sorted_descending(workers in workers_strategy(20)) {
        let catalog = RoleCatalog::standard();
        let pool: Vec<&Worker> = workers.iter().collect();
        let role = catalog.get("func-003").unwrap();

        let ranked = rank_candidates(&pool, role, &ScoringWeights::default(), None);
        prop_assert_eq!(ranked.len(), workers.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
