pub mod requirement;
pub mod window;
pub mod workorder;
pub mod workpackage;

use crate::aircraft::SubtypeResolver;
use crate::config::WorkpackageConfig;
use crate::error::GenerateError;
use crate::flight::FlightRecord;
use crate::store::WorkpackageStore;
use crate::turnaround::pairing::{TurnaroundPair, find_pairs};
use rand::Rng;
use window::MaintenanceWindow;
use workorder::WorkOrderBuilder;
use workpackage::{PackageCountSource, WorkPackage, WorkPackageBuilder, work_order_count};

/// Packages planned into one turnaround's window.
#[derive(Debug, Clone)]
pub struct TurnaroundPlan {
    pub window: MaintenanceWindow,
    pub packages: Vec<WorkPackage>,
}

pub struct MaintenancePlanner<'a> {
    work_orders: WorkOrderBuilder<'a>,
    packages: WorkPackageBuilder<'a>,
}

impl<'a> MaintenancePlanner<'a> {
    pub fn new(config: &'a WorkpackageConfig, subtypes: &'a SubtypeResolver) -> Self {
        MaintenancePlanner {
            work_orders: WorkOrderBuilder::new(config),
            packages: WorkPackageBuilder::new(config, subtypes),
        }
    }

    /// Builds `requested` packages of `work_orders_per_package` work orders each.
    pub fn plan_turnaround<R: Rng>(
        &self,
        rng: &mut R,
        pair: &TurnaroundPair<'_>,
        requested: usize,
        work_orders_per_package: usize,
    ) -> Result<TurnaroundPlan, GenerateError> {
        let window = MaintenanceWindow::compute(rng, pair.arrival, pair.departure);
        tracing::debug!(
            registration = pair.registration(),
            start = %window.start,
            end = %window.end,
            minutes = window.minutes(),
            "maintenance window"
        );

        let mut packages = Vec::with_capacity(requested);
        for _ in 0..requested {
            let work_orders = (0..work_orders_per_package)
                .map(|_| self.work_orders.build(rng, &window))
                .collect::<Result<Vec<_>, _>>()?;
            packages.push(self.packages.build(rng, pair, &window, work_orders)?);
        }
        Ok(TurnaroundPlan { window, packages })
    }

    /// Pairs up `flights` and plans packages for every turnaround found.
    pub fn plan<R: Rng, C: PackageCountSource + ?Sized>(
        &self,
        rng: &mut R,
        flights: &[FlightRecord],
        counts: &mut C,
    ) -> Result<Vec<WorkPackage>, GenerateError> {
        let pairs = find_pairs(flights);
        tracing::info!(flights = flights.len(), turnarounds = pairs.len(), "planning work packages");

        let mut packages = Vec::new();
        for pair in &pairs {
            let Some(requested) = counts.packages_for(pair) else {
                tracing::warn!(registration = pair.registration(), "package planning cancelled");
                return Err(GenerateError::Cancelled);
            };
            if requested == 0 {
                tracing::debug!(
                    registration = pair.registration(),
                    station = pair.station(),
                    "no packages requested"
                );
                continue;
            }
            let per_package = work_order_count(rng, requested);
            let plan = self.plan_turnaround(rng, pair, requested, per_package)?;
            packages.extend(plan.packages);
        }
        Ok(packages)
    }

    /// Plans every turnaround, then replaces the stored packages in one write.
    /// A cancelled run leaves the store untouched.
    pub fn plan_into<R: Rng, C: PackageCountSource + ?Sized, S: WorkpackageStore + ?Sized>(
        &self,
        rng: &mut R,
        flights: &[FlightRecord],
        counts: &mut C,
        store: &mut S,
    ) -> Result<Vec<WorkPackage>, GenerateError> {
        let packages = self.plan(rng, flights, counts)?;
        store.store_workpackages(&packages)?;
        Ok(packages)
    }
}
