//! Mock collections the back office starts with.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use voyage_booking::lifecycle::transition_reservation;
use voyage_booking::{
    build_travel_plan, BookingDraft, Invoice, InvoiceGenerator, Reservation, ReservationStatus, TravelPlan,
};
use voyage_catalog::{
    Accommodation, AccommodationDraft, AccommodationKind, Activity, ActivityDraft, CabinClass, Flight,
    FlightDraft, Vehicle, VehicleCategory, VehicleDraft,
};
use voyage_core::{CoreResult, Creatable};
use voyage_shared::{Client, ClientDraft, Masked, Role, User, UserDraft};

use crate::app_config::BusinessRules;
use crate::memory_repo::{assign_missing_ids, InMemoryRepository};

/// One in-memory repository per collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub clients: Arc<InMemoryRepository<Client>>,
    pub flights: Arc<InMemoryRepository<Flight>>,
    pub accommodations: Arc<InMemoryRepository<Accommodation>>,
    pub vehicles: Arc<InMemoryRepository<Vehicle>>,
    pub activities: Arc<InMemoryRepository<Activity>>,
    pub reservations: Arc<InMemoryRepository<Reservation>>,
    pub invoices: Arc<InMemoryRepository<Invoice>>,
    pub travel_plans: Arc<InMemoryRepository<TravelPlan>>,
    pub users: Arc<InMemoryRepository<User>>,
}

fn client(name: &str, first_name: &str, email: &str, nationality: &str, passport: Option<&str>) -> CoreResult<Client> {
    Client::create(ClientDraft {
        name: name.into(),
        first_name: Some(first_name.into()),
        email: email.into(),
        nationality: Some(nationality.into()),
        passport_number: passport.map(Masked::from),
        ..Default::default()
    })
}

#[allow(clippy::too_many_arguments)]
fn flight(
    number: &str,
    airline: &str,
    origin: &str,
    destination: &str,
    departure_at: DateTime<Utc>,
    hours: i64,
    price_cents: i64,
    cabin_class: CabinClass,
) -> CoreResult<Flight> {
    Flight::create(FlightDraft {
        flight_number: number.into(),
        airline: airline.into(),
        origin: origin.into(),
        destination: destination.into(),
        departure_at: Some(departure_at),
        arrival_at: Some(departure_at + Duration::hours(hours)),
        price_cents: Some(price_cents),
        cabin_class,
        seats_available: 150,
    })
}

fn hotel(name: &str, kind: AccommodationKind, city: &str, country: &str, stars: u8, nightly: i64) -> CoreResult<Accommodation> {
    Accommodation::create(AccommodationDraft {
        name: name.into(),
        kind,
        city: city.into(),
        country: Some(country.into()),
        stars: Some(stars),
        price_per_night_cents: Some(nightly),
        rooms_available: 12,
        ..Default::default()
    })
}

fn vehicle(brand: &str, model: &str, category: VehicleCategory, company: &str, location: &str, daily: i64) -> CoreResult<Vehicle> {
    Vehicle::create(VehicleDraft {
        brand: brand.into(),
        model: model.into(),
        category,
        rental_company: Some(company.into()),
        pickup_location: Some(location.into()),
        seats: 5,
        price_per_day_cents: Some(daily),
        available: true,
    })
}

fn activity(name: &str, location: &str, category: &str, hours: f64, price_cents: i64) -> CoreResult<Activity> {
    Activity::create(ActivityDraft {
        name: name.into(),
        location: location.into(),
        category: Some(category.into()),
        duration_hours: Some(hours),
        price_cents: Some(price_cents),
        ..Default::default()
    })
}

fn user(username: &str, email: &str, full_name: &str, role: Role) -> CoreResult<User> {
    User::create(UserDraft {
        username: username.into(),
        email: email.into(),
        full_name: full_name.into(),
        role,
    })
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mock data: four clients, a small catalog, three staff accounts and two reservations.
    /// The first reservation is confirmed, invoiced and has a travel plan. Trips start
    /// thirty days from now so the date checks of the booking flow hold.
    pub fn seeded(rules: &BusinessRules) -> CoreResult<Self> {
        let day0 = (Utc::now() + Duration::days(30)).date_naive().and_time(NaiveTime::MIN).and_utc();
        let at = |day: i64, hour: i64| day0 + Duration::days(day) + Duration::hours(hour);

        let mut clients = vec![
            client("Dupont", "Marie", "marie.dupont@example.com", "FR", Some("19FR45821")),
            client("Martin", "Paul", "paul.martin@example.com", "FR", None),
            client("Bernard", "Sophie", "sophie.bernard@example.com", "BE", Some("EM812347")),
            client("Nguyen", "Lan", "lan.nguyen@example.com", "VN", None),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        let mut flights = vec![
            flight("AF006", "Air France", "CDG", "JFK", at(0, 10), 8, 54_000, CabinClass::Economy),
            flight("AF007", "Air France", "JFK", "CDG", at(7, 18), 7, 51_000, CabinClass::Economy),
            flight("AT751", "Royal Air Maroc", "ORY", "RAK", at(14, 7), 3, 18_900, CabinClass::Economy),
            flight("AT750", "Royal Air Maroc", "RAK", "ORY", at(21, 12), 3, 17_500, CabinClass::Economy),
            flight("JL046", "Japan Airlines", "CDG", "HND", at(40, 19), 14, 182_000, CabinClass::Business),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        let mut accommodations = vec![
            hotel("Hotel Riviera", AccommodationKind::Hotel, "New York", "USA", 4, 21_000),
            hotel("Riad Yasmine", AccommodationKind::GuestHouse, "Marrakech", "Maroc", 3, 9_500),
            hotel("Shinjuku Park Residence", AccommodationKind::Apartment, "Tokyo", "Japon", 4, 16_500),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        let mut vehicles = vec![
            vehicle("Ford", "Mustang", VehicleCategory::Luxury, "Hertz", "JFK", 9_800),
            vehicle("Dacia", "Duster", VehicleCategory::Suv, "Europcar", "RAK", 3_900),
            vehicle("Toyota", "Yaris", VehicleCategory::Compact, "Avis", "HND", 5_200),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        let mut activities = vec![
            activity("Statue of Liberty tour", "New York", "Sightseeing", 3.0, 4_500),
            activity("Agafay desert dinner", "Marrakech", "Gastronomy", 5.0, 6_500),
            activity("Mount Fuji day trip", "Tokyo", "Excursion", 10.0, 12_000),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        let mut users = vec![
            user("admin", "admin@voyage.example.com", "Claire Lefebvre", Role::Admin),
            user("agent1", "julien.moreau@voyage.example.com", "Julien Moreau", Role::Agent),
            user("compta", "nadia.rahmani@voyage.example.com", "Nadia Rahmani", Role::Accountant),
        ].into_iter().collect::<CoreResult<Vec<_>>>()?;

        // Ids first: reservations, invoices and plans refer to them
        assign_missing_ids(&mut clients);
        assign_missing_ids(&mut flights);
        assign_missing_ids(&mut accommodations);
        assign_missing_ids(&mut vehicles);
        assign_missing_ids(&mut activities);
        assign_missing_ids(&mut users);

        // New York for Marie Dupont and a companion: confirmed and invoiced
        let mut new_york = BookingDraft::new(clients[0].clone(), 2);
        new_york
            .add_flight(flights[0].clone())
            .add_flight(flights[1].clone())
            .add_stay(accommodations[0].clone(), at(0, 15), at(7, 11), 1)
            .add_rental(vehicles[0].clone(), at(1, 9), at(4, 9))
            .add_activity(activities[0].clone(), at(2, 9), None);
        let mut first = new_york.into_reservation(&rules.currency)?;
        transition_reservation(&mut first, ReservationStatus::Confirmed)?;

        // Marrakech for Paul Martin: still pending
        let mut marrakech = BookingDraft::new(clients[1].clone(), 1);
        marrakech
            .add_flight(flights[2].clone())
            .add_flight(flights[3].clone())
            .add_stay(accommodations[1].clone(), at(14, 14), at(21, 10), 1)
            .add_activity(activities[1].clone(), at(16, 17), None)
            .set_notes(Some("Vegetarian meals".into()));
        let second = marrakech.into_reservation(&rules.currency)?;
        let mut reservations = vec![first, second];
        assign_missing_ids(&mut reservations);

        let generator = InvoiceGenerator::new(rules.tax_rate, rules.invoice_due_days, rules.currency.clone());
        let invoice = generator.generate(&reservations[0], &clients[0], None)?;
        let plan = build_travel_plan(&reservations[0], &clients[0], None)?;

        tracing::info!(
            clients = clients.len(),
            flights = flights.len(),
            accommodations = accommodations.len(),
            vehicles = vehicles.len(),
            activities = activities.len(),
            "seeded mock collections"
        );

        Ok(Self {
            clients: Arc::new(InMemoryRepository::with_items(clients)),
            flights: Arc::new(InMemoryRepository::with_items(flights)),
            accommodations: Arc::new(InMemoryRepository::with_items(accommodations)),
            vehicles: Arc::new(InMemoryRepository::with_items(vehicles)),
            activities: Arc::new(InMemoryRepository::with_items(activities)),
            reservations: Arc::new(InMemoryRepository::with_items(reservations)),
            invoices: Arc::new(InMemoryRepository::with_items(vec![invoice])),
            travel_plans: Arc::new(InMemoryRepository::with_items(vec![plan])),
            users: Arc::new(InMemoryRepository::with_items(users)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_core::Repository;

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MemoryStore::seeded(&BusinessRules::default()).unwrap();

        assert_eq!(store.clients.len().await, 4);
        assert_eq!(store.flights.find("FL002").await.unwrap().destination, "CDG");

        let first = store.reservations.find("R001").await.unwrap();
        assert_eq!(first.status, ReservationStatus::Confirmed);
        assert_eq!(first.lines.len(), 5);

        let invoice = store.invoices.find("FA001").await.unwrap();
        assert_eq!(invoice.reservation_id, "R001");
        assert_eq!(invoice.subtotal_cents, first.total_price_cents);

        let plan = store.travel_plans.find("PV001").await.unwrap();
        assert_eq!(plan.title, "Marie Dupont: JFK");
    }

    #[tokio::test]
    async fn test_new_ids_continue_after_seed() {
        let store = MemoryStore::seeded(&BusinessRules::default()).unwrap();
        let created = store
            .clients
            .insert(Client::create(ClientDraft {
                name: "Petit".into(),
                email: "petit@example.com".into(),
                ..Default::default()
            }).unwrap())
            .await
            .unwrap();
        assert_eq!(created.id, "C005");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::empty();
        assert!(store.reservations.is_empty().await);
    }
}
