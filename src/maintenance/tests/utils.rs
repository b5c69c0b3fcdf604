use crate::aircraft::SubtypeResolver;
use crate::config::{SubtypeEntry, SubtypeMappings, WorkpackageConfig};
use crate::error::StoreError;
use crate::flight::FlightRecord;
use crate::maintenance::workpackage::WorkPackage;
use crate::store::WorkpackageStore;
use crate::time::Time;
use std::collections::HashMap;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn time(s: &str) -> Time {
    s.parse().unwrap()
}

pub fn wp_config() -> WorkpackageConfig {
    WorkpackageConfig {
        scope_values: strings(&["ENGINE", "AVIONICS", "CABIN", "LANDING GEAR"]),
        skill_values: strings(&["B1", "B2", "MECH"]),
        wp_names: strings(&["DAILY", "WEEKLY"]),
        aircraft_subtypes: strings(&["GEN-1", "GEN-2"]),
        work_order_area: strings(&["HANGAR", "APRON"]),
        work_package_area: strings(&["LINE"]),
        work_order_names: strings(&["Oil check", "Tyre change", "Cabin clean"]),
    }
}

pub fn resolver() -> SubtypeResolver {
    let mut mappings = HashMap::new();
    mappings.insert("A320".to_string(), SubtypeEntry::One("A320-271N".to_string()));
    SubtypeResolver::new(
        Some(SubtypeMappings {
            mappings,
            default_subtypes: HashMap::new(),
        }),
        &wp_config().aircraft_subtypes,
        "test",
    )
}

pub fn leg(
    id: &str,
    registration: &str,
    aircraft_type: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
) -> FlightRecord {
    FlightRecord {
        flight_id: id.to_string(),
        airline: "6E".to_string(),
        flight_number: "512".to_string(),
        registration: registration.to_string(),
        aircraft_type: aircraft_type.to_string(),
        sched_dep_station: from.to_string(),
        sched_arr_station: to.to_string(),
        sched_dep_time: time(departure),
        sched_arr_time: time(arrival),
        dep_stand: "S1".to_string(),
        orig_dep_stand: "S1".to_string(),
        arr_stand: "S2".to_string(),
        orig_arr_stand: "S2".to_string(),
        cancelled: false,
    }
}

/// One same-day turnaround of VT-AMD at AMD with eight hours on the ground.
pub fn amd_turnaround() -> Vec<FlightRecord> {
    vec![
        leg("IN", "VT-AMD", "A320", "BOM", "AMD", "2025-03-03T04:00:00.000+05:30", "2025-03-03T06:30:00.000+05:30"),
        leg("OUT", "VT-AMD", "A320", "AMD", "DEL", "2025-03-03T14:30:00.000+05:30", "2025-03-03T17:00:00.000+05:30"),
    ]
}

#[derive(Default)]
pub struct MemoryStore {
    pub packages: Vec<WorkPackage>,
    pub writes: Vec<usize>,
}

impl WorkpackageStore for MemoryStore {
    fn store_workpackages(&mut self, packages: &[WorkPackage]) -> Result<(), StoreError> {
        self.packages = packages.to_vec();
        self.writes.push(packages.len());
        Ok(())
    }
}
