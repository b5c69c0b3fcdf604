use crate::config::FlightConfig;
use crate::error::StoreError;
use crate::flight::FlightRecord;
use crate::store::FlightStore;
use crate::time::Time;
use chrono::NaiveDate;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Monday 2025-03-03.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

pub fn flight_config() -> FlightConfig {
    let mut registrations_by_day = HashMap::new();
    registrations_by_day.insert("monday".to_string(), strings(&["VT-MA", "VT-MB", "VT-MC"]));
    registrations_by_day.insert("tuesday".to_string(), strings(&["VT-TA"]));
    registrations_by_day.insert("overnight".to_string(), strings(&["VT-NA", "VT-NB"]));
    FlightConfig {
        airlines: strings(&["AI", "6E", "UK"]),
        aircraft_types: strings(&["A320", "B737"]),
        stations: strings(&["AMD", "BOM", "DEL", "HEL"]),
        stands: strings(&["S1", "S2", "S3"]),
        registrations_by_day,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub flights: Vec<FlightRecord>,
    pub writes: Vec<usize>,
}

impl FlightStore for MemoryStore {
    fn load_flights(&self) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(self.flights.clone())
    }

    fn store_flights(&mut self, flights: &[FlightRecord]) -> Result<(), StoreError> {
        self.flights = flights.to_vec();
        self.writes.push(flights.len());
        Ok(())
    }
}

#[derive(Default)]
pub struct FailingStore {
    pub attempts: usize,
}

impl FlightStore for FailingStore {
    fn load_flights(&self) -> Result<Vec<FlightRecord>, StoreError> {
        Ok(vec![])
    }

    fn store_flights(&mut self, _flights: &[FlightRecord]) -> Result<(), StoreError> {
        self.attempts += 1;
        Err(StoreError::Io {
            path: PathBuf::from("seed/flights/seed_flight.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

pub fn time(s: &str) -> Time {
    s.parse().unwrap()
}

pub fn add_flight(
    flights: &mut Vec<FlightRecord>,
    registration: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
) {
    flights.push(FlightRecord {
        flight_id: format!("FLIGHT_{}", flights.len() + 1),
        airline: "AI".to_string(),
        flight_number: "101".to_string(),
        registration: registration.to_string(),
        aircraft_type: "A320".to_string(),
        sched_dep_station: from.to_string(),
        sched_arr_station: to.to_string(),
        sched_dep_time: time(departure),
        sched_arr_time: time(arrival),
        dep_stand: "S1".to_string(),
        orig_dep_stand: "S1".to_string(),
        arr_stand: "S2".to_string(),
        orig_arr_stand: "S2".to_string(),
        cancelled: false,
    });
}

pub fn arb_station() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("AMD"), Just("BOM"), Just("DEL"), Just("HEL")]
}
