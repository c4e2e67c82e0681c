use std::sync::Arc;

use voyage_booking::{Invoice, Reservation, TravelPlan};
use voyage_catalog::{Accommodation, Activity, Flight, Vehicle};
use voyage_core::{Entity, Repository};
use voyage_shared::{Client, User};
use voyage_store::{BusinessRules, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn Repository<Client>>,
    pub flights: Arc<dyn Repository<Flight>>,
    pub accommodations: Arc<dyn Repository<Accommodation>>,
    pub vehicles: Arc<dyn Repository<Vehicle>>,
    pub activities: Arc<dyn Repository<Activity>>,
    pub reservations: Arc<dyn Repository<Reservation>>,
    pub invoices: Arc<dyn Repository<Invoice>>,
    pub travel_plans: Arc<dyn Repository<TravelPlan>>,
    pub users: Arc<dyn Repository<User>>,
    pub business_rules: BusinessRules,
}

impl AppState {
    pub fn new(store: MemoryStore, business_rules: BusinessRules) -> Self {
        Self {
            clients: store.clients,
            flights: store.flights,
            accommodations: store.accommodations,
            vehicles: store.vehicles,
            activities: store.activities,
            reservations: store.reservations,
            invoices: store.invoices,
            travel_plans: store.travel_plans,
            users: store.users,
            business_rules,
        }
    }
}

/// Lets the generic CRUD handlers find the collection for `T`.
pub trait HasRepository<T: Entity> {
    fn repository(&self) -> &Arc<dyn Repository<T>>;
}

macro_rules! has_repository {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl HasRepository<$ty> for AppState {
                fn repository(&self) -> &Arc<dyn Repository<$ty>> {
                    &self.$field
                }
            }
        )*
    };
}

has_repository! {
    Client => clients,
    Flight => flights,
    Accommodation => accommodations,
    Vehicle => vehicles,
    Activity => activities,
    Reservation => reservations,
    Invoice => invoices,
    TravelPlan => travel_plans,
    User => users,
}
