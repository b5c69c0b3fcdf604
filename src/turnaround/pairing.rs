use crate::flight::FlightRecord;

/// An inbound leg and the outbound leg that follows it at the same station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnaroundPair<'a> {
    pub arrival: &'a FlightRecord,
    pub departure: &'a FlightRecord,
}

impl TurnaroundPair<'_> {
    pub fn station(&self) -> &str {
        &self.arrival.sched_arr_station
    }

    pub fn registration(&self) -> &str {
        &self.arrival.registration
    }
}

/// Only neighbours are compared, so `flights` must already be in leg order.
pub fn find_pairs(flights: &[FlightRecord]) -> Vec<TurnaroundPair<'_>> {
    flights
        .windows(2)
        .filter(|w| {
            w[0].registration == w[1].registration && w[0].sched_arr_station == w[1].sched_dep_station
        })
        .map(|w| TurnaroundPair {
            arrival: &w[0],
            departure: &w[1],
        })
        .collect()
}
