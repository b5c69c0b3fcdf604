use crate::config::{WorkpackageConfig, pick};
use crate::error::GenerateError;
use crate::maintenance::requirement::{ScopeRequirement, generate_requirements};
use crate::maintenance::window::MaintenanceWindow;
use crate::time::Time;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const WORK_ORDER_BARCODE_PREFIX: &str = "V09CYXJjb2Rl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "PLANNED")]
    Planned,
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
}

impl Status {
    const ALL: [Status; 3] = [Status::Planned, Status::Open, Status::InProgress];

    pub fn draw<R: Rng>(rng: &mut R) -> Status {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Planned => "PLANNED",
            Status::Open => "OPEN",
            Status::InProgress => "IN PROGRESS",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub workorder_id: String,
    pub work_order_name: String,
    pub work_order_barcode: String,
    pub work_order_due_date: Time,
    pub work_order_status: Status,
    pub work_order_area: String,
    pub work_order_priority: u8,
    pub work_order_sequence: u8,
    pub scope_requirements: Vec<ScopeRequirement>,
}

pub struct WorkOrderBuilder<'a> {
    config: &'a WorkpackageConfig,
}

impl<'a> WorkOrderBuilder<'a> {
    pub fn new(config: &'a WorkpackageConfig) -> Self {
        WorkOrderBuilder { config }
    }

    /// One work order due at the end of `window`, sized to the window's length.
    pub fn build<R: Rng>(&self, rng: &mut R, window: &MaintenanceWindow) -> Result<WorkOrder, GenerateError> {
        let batch = generate_requirements(rng, window.minutes(), self.config)?;
        if batch.dropped() > 0 {
            tracing::debug!(
                requested = batch.requested,
                kept = batch.requirements.len(),
                "duplicate requirements dropped"
            );
        }

        Ok(WorkOrder {
            workorder_id: Uuid::new_v4().to_string(),
            work_order_name: pick(rng, &self.config.work_order_names, "work order names")?.to_string(),
            work_order_barcode: format!(
                "{}-{}_{}",
                WORK_ORDER_BARCODE_PREFIX,
                window.start.date_prefix(),
                rng.gen_range(100..=999u16)
            ),
            work_order_due_date: window.end,
            work_order_status: Status::draw(rng),
            work_order_area: pick(rng, &self.config.work_order_area, "work order areas")?.to_string(),
            work_order_priority: rng.gen_range(1..=2),
            work_order_sequence: rng.gen_range(1..=2),
            scope_requirements: batch.requirements,
        })
    }
}
