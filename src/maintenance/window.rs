use crate::flight::FlightRecord;
use crate::time::Time;
use chrono::Duration;
use rand::Rng;
use std::ops::RangeInclusive;

/// Ground time left for maintenance once both slack buffers are taken off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceWindow {
    pub start: Time,
    pub end: Time,
}

impl MaintenanceWindow {
    pub const BUFFER_MINUTES: RangeInclusive<i64> = 15..=45;
    pub const FALLBACK_MINUTES: i64 = 60;

    pub fn compute<R: Rng>(
        rng: &mut R,
        arrival: &FlightRecord,
        departure: &FlightRecord,
    ) -> MaintenanceWindow {
        let start_buffer = rng.gen_range(Self::BUFFER_MINUTES);
        let end_buffer = rng.gen_range(Self::BUFFER_MINUTES);
        Self::between(
            arrival.sched_arr_time,
            departure.sched_dep_time,
            start_buffer,
            end_buffer,
        )
    }

    /// An inverted or empty result is replaced by a fixed span after `start`.
    pub fn between(touchdown: Time, push: Time, start_buffer: i64, end_buffer: i64) -> MaintenanceWindow {
        let start = touchdown + Duration::minutes(start_buffer);
        let mut end = push - Duration::minutes(end_buffer);
        if end <= start {
            tracing::debug!(%start, %end, "inverted maintenance window, using fallback span");
            end = start + Duration::minutes(Self::FALLBACK_MINUTES);
        }
        MaintenanceWindow { start, end }
    }

    pub fn minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }
}
