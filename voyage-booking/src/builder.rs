use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use voyage_catalog::{pricing, Accommodation, Activity, Flight, ServiceKind, Vehicle};
use voyage_core::validation::{optional_text, require_positive};
use voyage_core::{CoreError, CoreResult};
use voyage_shared::Client;

use crate::models::{Reservation, ReservationLine, ReservationStatus};

#[derive(Debug, Clone)]
pub struct Stay {
    pub accommodation: Accommodation,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub rooms: u32,
}

#[derive(Debug, Clone)]
pub struct Rental {
    pub vehicle: Vehicle,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BookedActivity {
    pub activity: Activity,
    pub date: DateTime<Utc>,
    pub participants: Option<u32>,
}

/// Calendar days the trip covers, derived from the selected flights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripWindow {
    pub start: NaiveDate,
    /// Known only once a return flight is selected (two flights or more)
    pub end: Option<NaiveDate>,
}

impl TripWindow {
    fn check(&self, what: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<()> {
        if start.date_naive() < self.start {
            return Err(CoreError::validation(format!(
                "{} starts before the first flight departs ({})",
                what, self.start
            )));
        }
        if let Some(trip_end) = self.end {
            if end.date_naive() > trip_end {
                return Err(CoreError::validation(format!(
                    "{} ends after the return flight lands ({})",
                    what, trip_end
                )));
            }
        }
        Ok(())
    }
}

/// When an activity booked at `start` for `hours` ends.
fn activity_end(start: DateTime<Utc>, hours: f64) -> CoreResult<DateTime<Utc>> {
    TimeDelta::try_minutes((hours * 60.0).round() as i64)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or_else(|| CoreError::validation("activity duration is too long"))
}

/// Priced result of a booking draft.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub client_id: String,
    pub travelers: u32,
    pub window: Option<TripWindow>,
    pub lines: Vec<ReservationLine>,
    pub total_price_cents: i64,
}

/// State of the booking wizard: the client is chosen first, services are added one by one,
/// then the draft is priced and turned into a reservation.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    client: Client,
    travelers: u32,
    flights: Vec<Flight>,
    stays: Vec<Stay>,
    rentals: Vec<Rental>,
    activities: Vec<BookedActivity>,
    notes: Option<String>,
}

impl BookingDraft {
    pub fn new(client: Client, travelers: u32) -> Self {
        Self {
            client,
            travelers,
            flights: Vec::new(),
            stays: Vec::new(),
            rentals: Vec::new(),
            activities: Vec::new(),
            notes: None,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn add_flight(&mut self, flight: Flight) -> &mut Self {
        self.flights.push(flight);
        self
    }

    pub fn add_stay(
        &mut self,
        accommodation: Accommodation,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        rooms: u32,
    ) -> &mut Self {
        self.stays.push(Stay { accommodation, check_in, check_out, rooms });
        self
    }

    pub fn add_rental(&mut self, vehicle: Vehicle, pickup_at: DateTime<Utc>, return_at: DateTime<Utc>) -> &mut Self {
        self.rentals.push(Rental { vehicle, pickup_at, return_at });
        self
    }

    pub fn add_activity(&mut self, activity: Activity, date: DateTime<Utc>, participants: Option<u32>) -> &mut Self {
        self.activities.push(BookedActivity { activity, date, participants });
        self
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> &mut Self {
        self.notes = optional_text(notes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty() && self.stays.is_empty() && self.rentals.is_empty() && self.activities.is_empty()
    }

    pub fn trip_window(&self) -> Option<TripWindow> {
        let start = self.flights.iter().map(|f| f.departure_at).min()?;
        let end = if self.flights.len() >= 2 {
            self.flights.iter().map(|f| f.arrival_at).max()
        } else {
            None
        };
        Some(TripWindow {
            start: start.date_naive(),
            end: end.map(|e| e.date_naive()),
        })
    }

    /// Checks traveler counts, availability and that every dated service fits the trip.
    pub fn validate(&self) -> CoreResult<()> {
        require_positive("travelers", self.travelers)?;
        if self.is_empty() {
            return Err(CoreError::validation("a reservation needs at least one service"));
        }

        let window = self.trip_window();

        for stay in &self.stays {
            require_positive("rooms", stay.rooms)?;
            pricing::nights(stay.check_in, stay.check_out)?;
            if let Some(window) = &window {
                window.check(&format!("stay at {}", stay.accommodation.name), stay.check_in, stay.check_out)?;
            }
        }

        for rental in &self.rentals {
            if !rental.vehicle.available {
                return Err(CoreError::validation(format!(
                    "vehicle {} is not available",
                    rental.vehicle.id
                )));
            }
            pricing::rental_days(rental.pickup_at, rental.return_at)?;
            if let Some(window) = &window {
                window.check(&format!("rental of {}", rental.vehicle.label()), rental.pickup_at, rental.return_at)?;
            }
        }

        for booked in &self.activities {
            if let Some(participants) = booked.participants {
                require_positive("participants", participants)?;
            }
            if let Some(window) = &window {
                window.check(&booked.activity.name, booked.date, booked.date)?;
            }
        }

        Ok(())
    }

    /// Validates the draft and prices every service.
    pub fn quote(&self) -> CoreResult<Quote> {
        self.validate()?;

        let mut lines = Vec::new();

        for flight in &self.flights {
            let total = pricing::per_person_total(flight.price_cents, self.travelers)?;
            let label = format!("{} {}", flight.flight_number, flight.route());
            lines.push(ReservationLine {
                kind: ServiceKind::Flight,
                service_id: flight.id.clone(),
                description: format!("Flight {} ({}), {} traveler(s)", label, flight.airline, self.travelers),
                label,
                units: self.travelers,
                periods: 1,
                unit_price_cents: flight.price_cents,
                total_cents: total,
                starts_at: flight.departure_at,
                ends_at: Some(flight.arrival_at),
                location: Some(flight.origin.clone()),
                destination: Some(flight.destination.clone()),
            });
        }

        for stay in &self.stays {
            let nights = pricing::nights(stay.check_in, stay.check_out)?;
            let hotel = &stay.accommodation;
            lines.push(ReservationLine {
                kind: ServiceKind::Accommodation,
                service_id: hotel.id.clone(),
                label: hotel.name.clone(),
                description: format!("{}, {}: {} night(s) x {} room(s)", hotel.name, hotel.city, nights, stay.rooms),
                units: stay.rooms,
                periods: nights,
                unit_price_cents: hotel.price_per_night_cents,
                total_cents: pricing::stay_total(hotel.price_per_night_cents, nights, stay.rooms)?,
                starts_at: stay.check_in,
                ends_at: Some(stay.check_out),
                location: Some(hotel.city.clone()),
                destination: None,
            });
        }

        for rental in &self.rentals {
            let days = pricing::rental_days(rental.pickup_at, rental.return_at)?;
            let vehicle = &rental.vehicle;
            lines.push(ReservationLine {
                kind: ServiceKind::Vehicle,
                service_id: vehicle.id.clone(),
                label: vehicle.label(),
                description: format!("{} rental: {} day(s)", vehicle.label(), days),
                units: 1,
                periods: days,
                unit_price_cents: vehicle.price_per_day_cents,
                total_cents: pricing::rental_total(vehicle.price_per_day_cents, days)?,
                starts_at: rental.pickup_at,
                ends_at: Some(rental.return_at),
                location: vehicle.pickup_location.clone(),
                destination: None,
            });
        }

        for booked in &self.activities {
            let participants = booked.participants.unwrap_or(self.travelers);
            let activity = &booked.activity;
            let ends_at = match activity.duration_hours {
                Some(hours) => Some(activity_end(booked.date, hours)?),
                None => None,
            };
            lines.push(ReservationLine {
                kind: ServiceKind::Activity,
                service_id: activity.id.clone(),
                label: activity.name.clone(),
                description: format!("{} ({}), {} participant(s)", activity.name, activity.location, participants),
                units: participants,
                periods: 1,
                unit_price_cents: activity.price_cents,
                total_cents: pricing::per_person_total(activity.price_cents, participants)?,
                starts_at: booked.date,
                ends_at,
                location: Some(activity.location.clone()),
                destination: None,
            });
        }

        let total_price_cents = pricing::sum_cents(lines.iter().map(|l| l.total_cents))?;

        Ok(Quote {
            client_id: self.client.id.clone(),
            travelers: self.travelers,
            window: self.trip_window(),
            lines,
            total_price_cents,
        })
    }

    /// Final wizard step. The reservation starts as `PENDING` without an id.
    pub fn into_reservation(self, currency: &str) -> CoreResult<Reservation> {
        let quote = self.quote()?;
        let now = Utc::now();

        tracing::debug!(
            client_id = %quote.client_id,
            lines = quote.lines.len(),
            total = quote.total_price_cents,
            "booking draft priced"
        );

        Ok(Reservation {
            id: String::new(),
            client_id: quote.client_id,
            status: ReservationStatus::Pending,
            travelers: quote.travelers,
            flight_ids: self.flights.iter().map(|f| f.id.clone()).collect(),
            accommodation_ids: self.stays.iter().map(|s| s.accommodation.id.clone()).collect(),
            vehicle_ids: self.rentals.iter().map(|r| r.vehicle.id.clone()).collect(),
            activity_ids: self.activities.iter().map(|a| a.activity.id.clone()).collect(),
            lines: quote.lines,
            total_price_cents: quote.total_price_cents,
            currency: currency.to_string(),
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}
