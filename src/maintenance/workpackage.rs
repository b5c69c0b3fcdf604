use crate::aircraft::SubtypeResolver;
use crate::config::{WorkpackageConfig, pick};
use crate::error::GenerateError;
use crate::maintenance::window::MaintenanceWindow;
use crate::maintenance::workorder::{Status, WorkOrder};
use crate::time::Time;
use crate::turnaround::pairing::TurnaroundPair;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WORK_PACKAGE_BARCODE_PREFIX: &str = "V1BCYXJjb2Rl";
pub const MAINTENANCE_TYPE: &str = "Normal";

/// Above this many packages per turnaround each package gets a long work order list.
const SMALL_BATCH: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    pub work_package_id: String,
    pub work_package_name: String,
    pub work_package_barcode: String,
    pub station: String,
    pub work_package_status: Status,
    pub work_package_area: String,
    pub maintenance_type: String,
    pub maintenance_date: String,
    pub short_description: String,
    pub aircraft: String,
    pub aircraft_type: String,
    pub aircraft_sub_type: String,
    pub expected_start_date_time: Time,
    pub expected_end_date_time: Time,
    pub work_orders: Vec<WorkOrder>,
}

/// Work orders per package, drawn once for all packages of a turnaround.
pub fn work_order_count<R: Rng>(rng: &mut R, requested_packages: usize) -> usize {
    if requested_packages <= SMALL_BATCH {
        rng.gen_range(1..=6)
    } else {
        rng.gen_range(7..=20)
    }
}

/// Supplies how many packages to build for each turnaround. `None` abandons the run.
pub trait PackageCountSource {
    fn packages_for(&mut self, pair: &TurnaroundPair<'_>) -> Option<usize>;
}

/// Same count for every turnaround.
pub struct FixedCount(pub usize);

impl PackageCountSource for FixedCount {
    fn packages_for(&mut self, _pair: &TurnaroundPair<'_>) -> Option<usize> {
        Some(self.0)
    }
}

pub struct WorkPackageBuilder<'a> {
    config: &'a WorkpackageConfig,
    subtypes: &'a SubtypeResolver,
}

impl<'a> WorkPackageBuilder<'a> {
    pub fn new(config: &'a WorkpackageConfig, subtypes: &'a SubtypeResolver) -> Self {
        WorkPackageBuilder { config, subtypes }
    }

    pub fn build<R: Rng>(
        &self,
        rng: &mut R,
        pair: &TurnaroundPair<'_>,
        window: &MaintenanceWindow,
        work_orders: Vec<WorkOrder>,
    ) -> Result<WorkPackage, GenerateError> {
        let arrival = pair.arrival;
        let name = format!(
            "{}/{}-{}-{:03}",
            arrival.registration,
            pick(rng, &self.config.wp_names, "work package names")?,
            window.start.compact(),
            rng.gen_range(100..=999u16)
        );

        Ok(WorkPackage {
            work_package_id: Uuid::new_v4().to_string(),
            work_package_name: name,
            work_package_barcode: format!("{}-{}", WORK_PACKAGE_BARCODE_PREFIX, window.start.date_prefix()),
            station: arrival.sched_arr_station.clone(),
            work_package_status: Status::draw(rng),
            work_package_area: pick(rng, &self.config.work_package_area, "work package areas")?.to_string(),
            maintenance_type: MAINTENANCE_TYPE.to_string(),
            maintenance_date: window.start.date_string(),
            short_description: pick(rng, &self.config.work_order_names, "work order names")?.to_string(),
            aircraft: arrival.registration.clone(),
            aircraft_type: arrival.aircraft_type.clone(),
            aircraft_sub_type: self.subtypes.resolve(rng, &arrival.aircraft_type)?,
            expected_start_date_time: window.start,
            expected_end_date_time: window.end,
            work_orders,
        })
    }
}
