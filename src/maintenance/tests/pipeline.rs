use crate::config::WorkpackageConfig;
use crate::error::GenerateError;
use crate::flight::FlightRecord;
use crate::maintenance::MaintenancePlanner;
use crate::maintenance::tests::utils::{MemoryStore, amd_turnaround, leg, resolver, wp_config};
use crate::maintenance::workpackage::{FixedCount, PackageCountSource};
use crate::turnaround::pairing::{TurnaroundPair, find_pairs};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Recorded {
    answers: Vec<Option<usize>>,
    asked: Vec<String>,
}

impl PackageCountSource for Recorded {
    fn packages_for(&mut self, pair: &TurnaroundPair<'_>) -> Option<usize> {
        self.asked.push(pair.registration().to_string());
        self.answers.remove(0)
    }
}

#[test]
fn test_end_to_end_single_turnaround() {
    let config = wp_config();
    let subtypes = resolver();
    let flights = amd_turnaround();
    let pairs = find_pairs(&flights);
    assert_eq!(1, pairs.len());

    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(2024);
    let plan = planner.plan_turnaround(&mut rng, &pairs[0], 1, 4).unwrap();

    assert_eq!(1, plan.packages.len());
    let wp = &plan.packages[0];
    assert_eq!(4, wp.work_orders.len());
    assert_eq!("AMD", wp.station);

    let value = serde_json::to_value(wp).unwrap();
    assert_eq!(plan.window.start.to_string(), value["expectedStartDateTime"]);
    assert_eq!(plan.window.end.to_string(), value["expectedEndDateTime"]);
    assert!(wp.work_orders.iter().all(|wo| wo.work_order_due_date == plan.window.end));
    assert!(plan.window.end > plan.window.start);
}

#[test]
fn test_work_order_count_shared_across_batch() {
    let config = wp_config();
    let subtypes = resolver();
    let flights = amd_turnaround();
    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(8);

    let packages = planner.plan(&mut rng, &flights, &mut FixedCount(6)).unwrap();
    assert_eq!(6, packages.len());
    let per_package = packages[0].work_orders.len();
    assert!((7..=20).contains(&per_package));
    assert!(packages.iter().all(|wp| wp.work_orders.len() == per_package));
    // every package in the batch shares one window
    assert!(packages.iter().all(|wp| wp.expected_start_date_time == packages[0].expected_start_date_time));
}

#[test]
fn test_counts_asked_per_turnaround() {
    let config = wp_config();
    let subtypes = resolver();
    let flights = two_turnarounds();

    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(8);
    let mut counts = Recorded { answers: vec![Some(0), Some(2)], asked: vec![] };

    let packages = planner.plan(&mut rng, &flights, &mut counts).unwrap();
    assert_eq!(vec!["VT-AMD".to_string(), "VT-HEL".to_string()], counts.asked);
    assert_eq!(2, packages.len());
    assert!(packages.iter().all(|wp| wp.aircraft == "VT-HEL" && wp.station == "HEL"));
    assert!(packages.iter().all(|wp| (1..=6).contains(&wp.work_orders.len())));
}

#[test]
fn test_no_turnarounds_no_packages() {
    let config = wp_config();
    let subtypes = resolver();
    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(8);

    let flights = vec![amd_turnaround().remove(0)];
    assert!(planner.plan(&mut rng, &flights, &mut FixedCount(3)).unwrap().is_empty());
}

#[test]
fn test_missing_vocabulary_is_reported() {
    let config = WorkpackageConfig {
        work_order_names: vec![],
        ..wp_config()
    };
    let subtypes = resolver();
    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(8);

    let result = planner.plan(&mut rng, &amd_turnaround(), &mut FixedCount(1));
    assert!(matches!(result, Err(GenerateError::EmptyPool("work order names"))));
}

fn two_turnarounds() -> Vec<FlightRecord> {
    let mut flights = amd_turnaround();
    flights.push(leg("IN2", "VT-HEL", "B737", "DEL", "HEL", "2025-03-03T02:00:00.000+05:30", "2025-03-03T05:00:00.000+05:30"));
    flights.push(leg("OUT2", "VT-HEL", "B737", "HEL", "AMD", "2025-03-04T13:00:00.000+05:30", "2025-03-04T16:00:00.000+05:30"));
    flights
}

#[test]
fn test_cancelled_answer_stops_without_writing() {
    let config = wp_config();
    let subtypes = resolver();
    let flights = two_turnarounds();
    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(3);
    let mut store = MemoryStore::default();
    let mut counts = Recorded { answers: vec![Some(2), None, Some(1)], asked: vec![] };

    let result = planner.plan_into(&mut rng, &flights, &mut counts, &mut store);
    assert!(matches!(result, Err(GenerateError::Cancelled)));
    // nothing is asked after the cancelled answer
    assert_eq!(vec!["VT-AMD".to_string(), "VT-HEL".to_string()], counts.asked);
    assert!(store.writes.is_empty());
}

#[test]
fn test_plan_into_writes_once() {
    let config = wp_config();
    let subtypes = resolver();
    let flights = two_turnarounds();
    let planner = MaintenancePlanner::new(&config, &subtypes);
    let mut rng = StdRng::seed_from_u64(3);
    let mut store = MemoryStore::default();

    let packages = planner.plan_into(&mut rng, &flights, &mut FixedCount(2), &mut store).unwrap();
    assert_eq!(4, packages.len());
    assert_eq!(vec![4], store.writes);
    assert_eq!(packages, store.packages);
}
