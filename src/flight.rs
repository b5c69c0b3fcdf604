use crate::time::Time;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub type FlightId = String;

/// One scheduled leg as written to the flight seed file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    #[tabled(skip)]
    pub flight_id: FlightId,
    pub airline: String,
    #[tabled(rename = "flight")]
    pub flight_number: String,
    pub registration: String,
    #[tabled(rename = "type")]
    pub aircraft_type: String,
    #[tabled(rename = "from")]
    pub sched_dep_station: String,
    #[tabled(rename = "to")]
    pub sched_arr_station: String,
    #[tabled(rename = "departure")]
    pub sched_dep_time: Time,
    #[tabled(rename = "arrival")]
    pub sched_arr_time: Time,
    #[tabled(skip)]
    pub dep_stand: String,
    #[tabled(skip)]
    pub orig_dep_stand: String,
    #[tabled(skip)]
    pub arr_stand: String,
    #[tabled(skip)]
    pub orig_arr_stand: String,
    #[serde(default)]
    #[tabled(skip)]
    pub cancelled: bool,
}
