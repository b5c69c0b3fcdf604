use crate::aircraft::RegistrationPicker;
use crate::config::{FlightConfig, pick};
use crate::error::GenerateError;
use crate::flight::FlightRecord;
use crate::store::FlightStore;
use crate::time::Time;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::str::FromStr;
use uuid::Uuid;

/// How long the aircraft stays on the ground between the two legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnaroundDuration {
    SameDay,
    Days(u32),
}

impl TurnaroundDuration {
    /// Anything that is not a positive whole number of days is a same-day turnaround.
    pub fn parse_lenient(raw: &str) -> TurnaroundDuration {
        match raw.parse::<TurnaroundDuration>() {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!(input = raw, error = %e, "unreadable turnaround duration, using same-day turnaround");
                TurnaroundDuration::SameDay
            }
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            TurnaroundDuration::SameDay => 0,
            TurnaroundDuration::Days(days) => i64::from(*days),
        }
    }
}

impl FromStr for TurnaroundDuration {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s.trim().parse::<i64>()?;
        if days <= 0 {
            return Ok(TurnaroundDuration::SameDay);
        }
        Ok(TurnaroundDuration::Days(u32::try_from(days).unwrap_or(u32::MAX)))
    }
}

#[derive(Debug, Clone)]
pub struct TurnaroundRequest {
    pub location: String,
    pub duration: TurnaroundDuration,
    pub count: usize,
    pub day_offset: i64,
}

struct Identity {
    airline: String,
    flight_number: String,
    registration: String,
    aircraft_type: String,
}

struct Leg<'a> {
    from: &'a str,
    to: &'a str,
    departure: Time,
    arrival: Time,
}

pub struct TurnaroundGenerator {
    config: FlightConfig,
    registrations: RegistrationPicker,
}

impl TurnaroundGenerator {
    const ARRIVAL_MINUTES: [u32; 11] = [0, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

    pub fn new(config: FlightConfig) -> TurnaroundGenerator {
        TurnaroundGenerator {
            config,
            registrations: RegistrationPicker::new(),
        }
    }

    /// Forget which registrations were already handed out.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn reset_registrations(&mut self) {
        self.registrations.reset();
    }

    fn registration_pool(&self, request: &TurnaroundRequest, day: NaiveDate) -> Result<&[String], GenerateError> {
        match request.duration {
            TurnaroundDuration::Days(_) => Ok(self.config.overnight_registrations()),
            TurnaroundDuration::SameDay => Ok(self.config.registrations_for_date(day)?),
        }
    }

    fn shift(time: Time, delta: Duration) -> Result<Time, GenerateError> {
        time.checked_add(delta).ok_or(GenerateError::OutOfRange("flight time"))
    }

    fn record<R: Rng>(
        rng: &mut R,
        stands: &[String],
        identity: &Identity,
        leg: Leg<'_>,
    ) -> Result<FlightRecord, GenerateError> {
        let mut stand = || pick(rng, stands, "stands").map(str::to_string);
        Ok(FlightRecord {
            flight_id: Uuid::new_v4().to_string(),
            airline: identity.airline.clone(),
            flight_number: identity.flight_number.clone(),
            registration: identity.registration.clone(),
            aircraft_type: identity.aircraft_type.clone(),
            sched_dep_station: leg.from.to_string(),
            sched_arr_station: leg.to.to_string(),
            sched_dep_time: leg.departure,
            sched_arr_time: leg.arrival,
            dep_stand: stand()?,
            orig_dep_stand: stand()?,
            arr_stand: stand()?,
            orig_arr_stand: stand()?,
            cancelled: false,
        })
    }

    /// Generates `request.count` turnarounds at `request.location`, re-writing the whole
    /// sequence to `store` after every pair. Write failures are logged and skipped.
    pub fn generate<R: Rng, S: FlightStore + ?Sized>(
        &mut self,
        rng: &mut R,
        request: &TurnaroundRequest,
        today: NaiveDate,
        store: &mut S,
    ) -> Result<Vec<FlightRecord>, GenerateError> {
        let day = Duration::try_days(request.day_offset)
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or(GenerateError::OutOfRange("turnaround day"))?;
        let ground_days =
            Duration::try_days(request.duration.days()).ok_or(GenerateError::OutOfRange("turnaround duration"))?;
        tracing::info!(
            location = %request.location,
            %day,
            duration = ?request.duration,
            count = request.count,
            summary = ?self.config.summary(),
            "generating turnarounds"
        );

        let pool = self.registration_pool(request, day)?.to_vec();
        let stations: Vec<String> = self
            .config
            .stations
            .iter()
            .filter(|s| **s != request.location)
            .cloned()
            .collect();

        let mut flights = Vec::with_capacity(request.count * 2);
        for _ in 0..request.count {
            let identity = Identity {
                airline: pick(rng, &self.config.airlines, "airlines")?.to_string(),
                aircraft_type: pick(rng, &self.config.aircraft_types, "aircraft types")?.to_string(),
                registration: self.registrations.draw(rng, &pool)?,
                flight_number: rng.gen_range(100..=999u16).to_string(),
            };

            let minute = Self::ARRIVAL_MINUTES[rng.gen_range(0..Self::ARRIVAL_MINUTES.len())];
            let inbound_arrival = Self::shift(
                Time::start_of_day(day),
                Duration::hours(rng.gen_range(1..=15)) + Duration::minutes(i64::from(minute)),
            )?;
            let inbound_departure = Self::shift(inbound_arrival, -Duration::hours(rng.gen_range(1..=5)))?;
            let origin = pick(rng, &stations, "stations")?;
            let arrival = Self::record(
                rng,
                &self.config.stands,
                &identity,
                Leg {
                    from: origin,
                    to: &request.location,
                    departure: inbound_departure,
                    arrival: inbound_arrival,
                },
            )?;

            let outbound_departure =
                Self::shift(inbound_arrival, ground_days + Duration::hours(rng.gen_range(7..=10)))?;
            let outbound_arrival = Self::shift(outbound_departure, Duration::hours(rng.gen_range(2..=4)))?;
            let destination = pick(rng, &stations, "stations")?;
            let departure = Self::record(
                rng,
                &self.config.stands,
                &identity,
                Leg {
                    from: &request.location,
                    to: destination,
                    departure: outbound_departure,
                    arrival: outbound_arrival,
                },
            )?;

            tracing::debug!(
                registration = %identity.registration,
                flight_number = %identity.flight_number,
                %origin,
                %destination,
                "turnaround generated"
            );
            flights.push(arrival);
            flights.push(departure);

            if let Err(e) = store.store_flights(&flights) {
                tracing::error!(error = %e, "failed to write flight data");
            }
        }
        Ok(flights)
    }
}
