use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voyage_core::resource::{text_matches, Creatable, Entity, Patchable};
use voyage_core::validation::{optional_text, require_non_negative, require_text};
use voyage_core::{CoreError, CoreResult};
use voyage_shared::dates;

/// Service types a reservation can bundle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceKind {
    Flight,
    Accommodation,
    Vehicle,
    Activity,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Flight,
        ServiceKind::Accommodation,
        ServiceKind::Vehicle,
        ServiceKind::Activity,
    ];
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// Vol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    /// Price per traveler
    pub price_cents: i64,
    pub cabin_class: CabinClass,
    pub seats_available: u32,
}

impl Flight {
    pub fn route(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightDraft {
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "dates::flexible_opt")]
    pub departure_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::flexible_opt")]
    pub arrival_at: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub cabin_class: CabinClass,
    #[serde(default)]
    pub seats_available: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPatch {
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "dates::flexible_opt")]
    pub departure_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::flexible_opt")]
    pub arrival_at: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub cabin_class: Option<CabinClass>,
    pub seats_available: Option<u32>,
}

fn check_schedule(departure_at: DateTime<Utc>, arrival_at: DateTime<Utc>) -> CoreResult<()> {
    if arrival_at <= departure_at {
        return Err(CoreError::validation("arrival_at must be after departure_at"));
    }
    Ok(())
}

fn required<T>(field: &str, value: Option<T>) -> CoreResult<T> {
    value.ok_or_else(|| CoreError::validation(format!("{} is required", field)))
}

impl Entity for Flight {
    const ID_PREFIX: &'static str = "FL";
    const KIND: &'static str = "Flight";

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
                self.flight_number.as_str(),
                self.airline.as_str(),
                self.origin.as_str(),
                self.destination.as_str(),
            ],
            needle,
        )
    }
}

impl Creatable for Flight {
    type Draft = FlightDraft;

    fn create(draft: FlightDraft) -> CoreResult<Self> {
        let departure_at = required("departure_at", draft.departure_at)?;
        let arrival_at = required("arrival_at", draft.arrival_at)?;
        check_schedule(departure_at, arrival_at)?;

        Ok(Flight {
            id: String::new(),
            flight_number: require_text("flight_number", &draft.flight_number)?.to_uppercase(),
            airline: require_text("airline", &draft.airline)?,
            origin: require_text("origin", &draft.origin)?,
            destination: require_text("destination", &draft.destination)?,
            departure_at,
            arrival_at,
            price_cents: require_non_negative("price_cents", required("price_cents", draft.price_cents)?)?,
            cabin_class: draft.cabin_class,
            seats_available: draft.seats_available,
        })
    }
}

impl Patchable for Flight {
    type Patch = FlightPatch;

    fn apply(&mut self, patch: FlightPatch) -> CoreResult<()> {
        if let Some(v) = patch.flight_number {
            self.flight_number = require_text("flight_number", &v)?.to_uppercase();
        }
        if let Some(v) = patch.airline {
            self.airline = require_text("airline", &v)?;
        }
        if let Some(v) = patch.origin {
            self.origin = require_text("origin", &v)?;
        }
        if let Some(v) = patch.destination {
            self.destination = require_text("destination", &v)?;
        }
        if let Some(v) = patch.departure_at {
            self.departure_at = v;
        }
        if let Some(v) = patch.arrival_at {
            self.arrival_at = v;
        }
        check_schedule(self.departure_at, self.arrival_at)?;
        if let Some(v) = patch.price_cents {
            self.price_cents = require_non_negative("price_cents", v)?;
        }
        if let Some(v) = patch.cabin_class {
            self.cabin_class = v;
        }
        if let Some(v) = patch.seats_available {
            self.seats_available = v;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccommodationKind {
    #[default]
    Hotel,
    Apartment,
    Resort,
    GuestHouse,
}

/// Hébergement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    pub kind: AccommodationKind,
    pub city: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub stars: Option<u8>,
    pub price_per_night_cents: i64,
    pub rooms_available: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccommodationDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: AccommodationKind,
    #[serde(default)]
    pub city: String,
    pub country: Option<String>,
    pub address: Option<String>,
    pub stars: Option<u8>,
    pub price_per_night_cents: Option<i64>,
    #[serde(default)]
    pub rooms_available: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccommodationPatch {
    pub name: Option<String>,
    pub kind: Option<AccommodationKind>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub stars: Option<u8>,
    pub price_per_night_cents: Option<i64>,
    pub rooms_available: Option<u32>,
}

fn check_stars(stars: Option<u8>) -> CoreResult<Option<u8>> {
    match stars {
        Some(s) if !(1..=5).contains(&s) => Err(CoreError::validation("stars must be between 1 and 5")),
        other => Ok(other),
    }
}

impl Entity for Accommodation {
    const ID_PREFIX: &'static str = "H";
    const KIND: &'static str = "Accommodation";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        let mut fields = vec![self.id.as_str(), self.name.as_str(), self.city.as_str()];
        fields.extend(self.country.as_deref());
        text_matches(fields, needle)
    }
}

impl Creatable for Accommodation {
    type Draft = AccommodationDraft;

    fn create(draft: AccommodationDraft) -> CoreResult<Self> {
        Ok(Accommodation {
            id: String::new(),
            name: require_text("name", &draft.name)?,
            kind: draft.kind,
            city: require_text("city", &draft.city)?,
            country: optional_text(draft.country),
            address: optional_text(draft.address),
            stars: check_stars(draft.stars)?,
            price_per_night_cents: require_non_negative(
                "price_per_night_cents",
                required("price_per_night_cents", draft.price_per_night_cents)?,
            )?,
            rooms_available: draft.rooms_available,
        })
    }
}

impl Patchable for Accommodation {
    type Patch = AccommodationPatch;

    fn apply(&mut self, patch: AccommodationPatch) -> CoreResult<()> {
        if let Some(v) = patch.name {
            self.name = require_text("name", &v)?;
        }
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.city {
            self.city = require_text("city", &v)?;
        }
        if patch.country.is_some() {
            self.country = optional_text(patch.country);
        }
        if patch.address.is_some() {
            self.address = optional_text(patch.address);
        }
        if patch.stars.is_some() {
            self.stars = check_stars(patch.stars)?;
        }
        if let Some(v) = patch.price_per_night_cents {
            self.price_per_night_cents = require_non_negative("price_per_night_cents", v)?;
        }
        if let Some(v) = patch.rooms_available {
            self.rooms_available = v;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    Economy,
    #[default]
    Compact,
    Suv,
    Van,
    Luxury,
}

/// Voiture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    pub rental_company: Option<String>,
    pub pickup_location: Option<String>,
    pub seats: u8,
    pub price_per_day_cents: i64,
    pub available: bool,
}

impl Vehicle {
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

fn default_seats() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleDraft {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: VehicleCategory,
    pub rental_company: Option<String>,
    pub pickup_location: Option<String>,
    #[serde(default = "default_seats")]
    pub seats: u8,
    pub price_per_day_cents: Option<i64>,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehiclePatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<VehicleCategory>,
    pub rental_company: Option<String>,
    pub pickup_location: Option<String>,
    pub seats: Option<u8>,
    pub price_per_day_cents: Option<i64>,
    pub available: Option<bool>,
}

impl Entity for Vehicle {
    const ID_PREFIX: &'static str = "V";
    const KIND: &'static str = "Vehicle";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        let mut fields = vec![self.id.as_str(), self.brand.as_str(), self.model.as_str()];
        fields.extend(self.rental_company.as_deref());
        fields.extend(self.pickup_location.as_deref());
        text_matches(fields, needle)
    }
}

impl Creatable for Vehicle {
    type Draft = VehicleDraft;

    fn create(draft: VehicleDraft) -> CoreResult<Self> {
        Ok(Vehicle {
            id: String::new(),
            brand: require_text("brand", &draft.brand)?,
            model: require_text("model", &draft.model)?,
            category: draft.category,
            rental_company: optional_text(draft.rental_company),
            pickup_location: optional_text(draft.pickup_location),
            seats: draft.seats,
            price_per_day_cents: require_non_negative(
                "price_per_day_cents",
                required("price_per_day_cents", draft.price_per_day_cents)?,
            )?,
            available: draft.available,
        })
    }
}

impl Patchable for Vehicle {
    type Patch = VehiclePatch;

    fn apply(&mut self, patch: VehiclePatch) -> CoreResult<()> {
        if let Some(v) = patch.brand {
            self.brand = require_text("brand", &v)?;
        }
        if let Some(v) = patch.model {
            self.model = require_text("model", &v)?;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if patch.rental_company.is_some() {
            self.rental_company = optional_text(patch.rental_company);
        }
        if patch.pickup_location.is_some() {
            self.pickup_location = optional_text(patch.pickup_location);
        }
        if let Some(v) = patch.seats {
            self.seats = v;
        }
        if let Some(v) = patch.price_per_day_cents {
            self.price_per_day_cents = require_non_negative("price_per_day_cents", v)?;
        }
        if let Some(v) = patch.available {
            self.available = v;
        }
        Ok(())
    }
}

/// Activité
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_hours: Option<f64>,
    /// Price per participant
    pub price_cents: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_hours: Option<f64>,
    pub price_cents: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration_hours: Option<f64>,
    pub price_cents: Option<i64>,
}

/// Longest bookable activity: a thirty-day expedition.
pub const MAX_ACTIVITY_HOURS: f64 = 720.0;

fn check_duration(hours: Option<f64>) -> CoreResult<Option<f64>> {
    match hours {
        Some(h) if !h.is_finite() || h <= 0.0 => Err(CoreError::validation("duration_hours must be positive")),
        Some(h) if h > MAX_ACTIVITY_HOURS => Err(CoreError::validation(format!(
            "duration_hours must not exceed {}",
            MAX_ACTIVITY_HOURS
        ))),
        other => Ok(other),
    }
}

impl Entity for Activity {
    const ID_PREFIX: &'static str = "A";
    const KIND: &'static str = "Activity";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn matches(&self, needle: &str) -> bool {
        let mut fields = vec![self.id.as_str(), self.name.as_str(), self.location.as_str()];
        fields.extend(self.category.as_deref());
        text_matches(fields, needle)
    }
}

impl Creatable for Activity {
    type Draft = ActivityDraft;

    fn create(draft: ActivityDraft) -> CoreResult<Self> {
        Ok(Activity {
            id: String::new(),
            name: require_text("name", &draft.name)?,
            location: require_text("location", &draft.location)?,
            description: optional_text(draft.description),
            category: optional_text(draft.category),
            duration_hours: check_duration(draft.duration_hours)?,
            price_cents: require_non_negative("price_cents", required("price_cents", draft.price_cents)?)?,
        })
    }
}

impl Patchable for Activity {
    type Patch = ActivityPatch;

    fn apply(&mut self, patch: ActivityPatch) -> CoreResult<()> {
        if let Some(v) = patch.name {
            self.name = require_text("name", &v)?;
        }
        if let Some(v) = patch.location {
            self.location = require_text("location", &v)?;
        }
        if patch.description.is_some() {
            self.description = optional_text(patch.description);
        }
        if patch.category.is_some() {
            self.category = optional_text(patch.category);
        }
        if patch.duration_hours.is_some() {
            self.duration_hours = check_duration(patch.duration_hours)?;
        }
        if let Some(v) = patch.price_cents {
            self.price_cents = require_non_negative("price_cents", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flight_draft() -> FlightDraft {
        serde_json::from_value(json!({
            "flight_number": "af1234",
            "airline": "Air France",
            "origin": "CDG",
            "destination": "JFK",
            "departure_at": "2026-07-01T10:00:00Z",
            "arrival_at": "2026-07-01T18:30:00Z",
            "price_cents": 54_000
        }))
        .unwrap()
    }

    #[test]
    fn test_flight_create_normalises_number() {
        let flight = Flight::create(flight_draft()).unwrap();
        assert_eq!(flight.flight_number, "AF1234");
        assert_eq!(flight.cabin_class, CabinClass::Economy);
        assert!(flight.matches("jfk"));
    }

    #[test]
    fn test_flight_rejects_arrival_before_departure() {
        let mut draft = flight_draft();
        draft.arrival_at = draft.departure_at;
        assert!(Flight::create(draft).is_err());

        let mut flight = Flight::create(flight_draft()).unwrap();
        let patch: FlightPatch = serde_json::from_value(json!({ "arrival_at": "2026-06-30" })).unwrap();
        assert!(flight.apply(patch).is_err());
    }

    #[test]
    fn test_missing_price_is_a_validation_error() {
        let mut draft = flight_draft();
        draft.price_cents = None;
        let err = Flight::create(draft).unwrap_err();
        assert!(err.to_string().contains("price_cents is required"));
    }

    #[test]
    fn test_accommodation_stars_range() {
        let draft = AccommodationDraft {
            name: "Hôtel du Port".into(),
            city: "Marseille".into(),
            stars: Some(6),
            price_per_night_cents: Some(9_500),
            ..Default::default()
        };
        assert!(Accommodation::create(draft.clone()).is_err());
        assert!(Accommodation::create(AccommodationDraft { stars: Some(4), ..draft }).is_ok());
    }

    #[test]
    fn test_vehicle_defaults() {
        let vehicle: VehicleDraft = serde_json::from_value(json!({
            "brand": "Peugeot", "model": "308", "price_per_day_cents": 4_200
        }))
        .unwrap();
        let vehicle = Vehicle::create(vehicle).unwrap();
        assert_eq!(vehicle.seats, 5);
        assert!(vehicle.available);
        assert_eq!(vehicle.label(), "Peugeot 308");
    }

    #[test]
    fn test_activity_patch_clears_blank_description() {
        let mut activity = Activity::create(ActivityDraft {
            name: "Calanques kayak".into(),
            location: "Cassis".into(),
            description: Some("Half day".into()),
            price_cents: Some(6_500),
            ..Default::default()
        })
        .unwrap();
        activity
            .apply(ActivityPatch { description: Some("  ".into()), ..Default::default() })
            .unwrap();
        assert!(activity.description.is_none());
    }

    #[test]
    fn test_activity_duration_bounds() {
        let draft = |hours: f64| ActivityDraft {
            name: "Trek".into(),
            location: "Atlas".into(),
            duration_hours: Some(hours),
            price_cents: Some(20_000),
            ..Default::default()
        };
        assert!(Activity::create(draft(MAX_ACTIVITY_HOURS)).is_ok());
        assert!(Activity::create(draft(1e15)).is_err());
        assert!(Activity::create(draft(0.0)).is_err());
        assert!(Activity::create(draft(f64::NAN)).is_err());
    }
}
