use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use voyage_catalog::ServiceKind;
use voyage_core::resource::{text_matches, Entity, Patchable};
use voyage_core::validation::{optional_text, require_non_negative, require_positive, require_text};
use voyage_core::CoreResult;
use voyage_shared::dates;

use crate::lifecycle;

/// Reservation status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

/// One booked service, priced at booking time.
///
/// `units` is travelers for flights, rooms for stays, participants for activities and 1 for
/// rentals. `periods` is nights for stays, days for rentals and 1 otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationLine {
    pub kind: ServiceKind,
    pub service_id: String,
    pub label: String,
    pub description: String,
    pub units: u32,
    pub periods: u32,
    pub unit_price_cents: i64,
    pub total_cents: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Arrival airport, for flights
    #[serde(default)]
    pub destination: Option<String>,
}

impl ReservationLine {
    pub fn quantity(&self) -> u32 {
        self.units.saturating_mul(self.periods)
    }
}

/// Réservation: the services booked for one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub client_id: String,
    pub status: ReservationStatus,
    pub travelers: u32,
    pub flight_ids: Vec<String>,
    pub accommodation_ids: Vec<String>,
    pub vehicle_ids: Vec<String>,
    pub activity_ids: Vec<String>,
    pub lines: Vec<ReservationLine>,
    pub total_price_cents: i64,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Rebuilds the booking request this reservation was made from, using the stored
    /// dates, rooms and participants. Used to price it again against the current catalog.
    pub fn to_request(&self) -> ReservationRequest {
        let mut request = ReservationRequest {
            client_id: self.client_id.clone(),
            flight_ids: self.flight_ids.clone(),
            travelers: self.travelers,
            notes: self.notes.clone(),
            ..Default::default()
        };
        for line in &self.lines {
            let end = line.ends_at.unwrap_or(line.starts_at);
            match line.kind {
                ServiceKind::Flight => {}
                ServiceKind::Accommodation => request.stays.push(StayRequest {
                    accommodation_id: line.service_id.clone(),
                    check_in: line.starts_at,
                    check_out: end,
                    rooms: line.units,
                }),
                ServiceKind::Vehicle => request.rentals.push(RentalRequest {
                    vehicle_id: line.service_id.clone(),
                    pickup_date: line.starts_at,
                    return_date: end,
                }),
                ServiceKind::Activity => request.activities.push(ActivityRequest {
                    activity_id: line.service_id.clone(),
                    date: line.starts_at,
                    participants: Some(line.units),
                }),
            }
        }
        request
    }
}

fn one() -> u32 {
    1
}

/// Body of `POST /api/reservations`: the booking wizard's final state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub flight_ids: Vec<String>,
    #[serde(default)]
    pub stays: Vec<StayRequest>,
    #[serde(default)]
    pub rentals: Vec<RentalRequest>,
    #[serde(default)]
    pub activities: Vec<ActivityRequest>,
    #[serde(default = "one")]
    pub travelers: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayRequest {
    pub accommodation_id: String,
    #[serde(deserialize_with = "dates::flexible")]
    pub check_in: DateTime<Utc>,
    #[serde(deserialize_with = "dates::flexible")]
    pub check_out: DateTime<Utc>,
    #[serde(default = "one")]
    pub rooms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalRequest {
    pub vehicle_id: String,
    #[serde(deserialize_with = "dates::flexible")]
    pub pickup_date: DateTime<Utc>,
    #[serde(deserialize_with = "dates::flexible")]
    pub return_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRequest {
    pub activity_id: String,
    #[serde(deserialize_with = "dates::flexible")]
    pub date: DateTime<Utc>,
    /// Defaults to the reservation's traveler count
    pub participants: Option<u32>,
}

/// Body of `PUT`/`PATCH /api/reservations/{id}`.
///
/// `total_price_cents` is stored as given. Leaving it out keeps the current total even when
/// `travelers` changes; `POST /api/reservations/{id}/reprice` recomputes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationPatch {
    pub status: Option<ReservationStatus>,
    pub travelers: Option<u32>,
    pub notes: Option<String>,
    pub total_price_cents: Option<i64>,
}

impl Entity for Reservation {
    const ID_PREFIX: &'static str = "R";
    const KIND: &'static str = "Reservation";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        let mut fields = vec![self.id.as_str(), self.client_id.as_str(), self.status.as_str()];
        fields.extend(self.notes.as_deref());
        fields.extend(self.lines.iter().map(|l| l.label.as_str()));
        text_matches(fields, needle)
    }
}

impl Patchable for Reservation {
    type Patch = ReservationPatch;

    fn apply(&mut self, patch: ReservationPatch) -> CoreResult<()> {
        if let Some(status) = patch.status {
            lifecycle::transition_reservation(self, status)?;
        }
        if let Some(travelers) = patch.travelers {
            self.travelers = require_positive("travelers", travelers)?;
        }
        if patch.notes.is_some() {
            self.notes = optional_text(patch.notes);
        }
        if let Some(total) = patch.total_price_cents {
            self.total_price_cents = require_non_negative("total_price_cents", total)?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Issued => "ISSUED",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLine {
    pub kind: ServiceKind,
    pub description: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

/// Facture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// `FAC-<year>-<id>`, set together with the id
    pub number: String,
    pub reservation_id: String,
    pub client_id: String,
    pub client_name: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal_cents: i64,
    pub tax_rate: f64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoicePatch {
    pub status: Option<InvoiceStatus>,
    #[serde(default, deserialize_with = "dates::flexible_opt")]
    pub due_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Entity for Invoice {
    const ID_PREFIX: &'static str = "FA";
    const KIND: &'static str = "Invoice";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.number = format!("FAC-{}-{}", self.issued_at.year(), id);
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        text_matches(
            [
                self.id.as_str(),
                self.number.as_str(),
                self.reservation_id.as_str(),
                self.client_id.as_str(),
                self.client_name.as_str(),
                self.status.as_str(),
            ],
            needle,
        )
    }
}

impl Patchable for Invoice {
    type Patch = InvoicePatch;

    fn apply(&mut self, patch: InvoicePatch) -> CoreResult<()> {
        if let Some(status) = patch.status {
            lifecycle::transition_invoice(self, status)?;
        }
        if let Some(due_at) = patch.due_at {
            if due_at < self.issued_at {
                return Err(voyage_core::CoreError::validation("due_at must not be before issued_at"));
            }
            self.due_at = due_at;
        }
        if patch.notes.is_some() {
            self.notes = optional_text(patch.notes);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryEvent {
    pub at: DateTime<Utc>,
    pub kind: ServiceKind,
    pub service_id: String,
    pub label: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryDay {
    /// 1 for the first day of the trip
    pub day: u32,
    pub date: NaiveDate,
    pub events: Vec<ItineraryEvent>,
}

/// Plan de voyage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    pub id: String,
    pub reservation_id: String,
    pub client_id: String,
    pub traveler_name: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<ItineraryDay>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelPlanPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
}

impl Entity for TravelPlan {
    const ID_PREFIX: &'static str = "PV";
    const KIND: &'static str = "TravelPlan";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        text_matches(
            [
                self.id.as_str(),
                self.reservation_id.as_str(),
                self.client_id.as_str(),
                self.traveler_name.as_str(),
                self.title.as_str(),
            ],
            needle,
        )
    }
}

impl Patchable for TravelPlan {
    type Patch = TravelPlanPatch;

    fn apply(&mut self, patch: TravelPlanPatch) -> CoreResult<()> {
        if let Some(title) = patch.title {
            self.title = require_text("title", &title)?;
        }
        if patch.notes.is_some() {
            self.notes = optional_text(patch.notes);
        }
        Ok(())
    }
}

/// Body of `POST /api/factures` and `POST /api/plans-voyage`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub reservation_id: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_quantity_saturates() {
        let line = ReservationLine {
            kind: ServiceKind::Accommodation,
            service_id: "H001".into(),
            label: "Hotel Riviera".into(),
            description: "Hotel Riviera".into(),
            units: u32::MAX,
            periods: 2,
            unit_price_cents: 0,
            total_cents: 0,
            starts_at: Utc::now(),
            ends_at: None,
            location: None,
            destination: None,
        };
        assert_eq!(line.quantity(), u32::MAX);
        assert_eq!(ReservationLine { units: 3, periods: 7, ..line }.quantity(), 21);
    }
}
