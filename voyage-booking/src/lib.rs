pub mod builder;
pub mod finance;
pub mod invoicing;
pub mod itinerary;
pub mod lifecycle;
pub mod models;

pub use builder::{BookingDraft, Quote, TripWindow};
pub use finance::{DashboardSummary, RevenueReport};
pub use invoicing::InvoiceGenerator;
pub use itinerary::build_travel_plan;
pub use models::{
    GenerateRequest, Invoice, InvoiceLine, InvoicePatch, InvoiceStatus, ItineraryDay, ItineraryEvent,
    Reservation, ReservationLine, ReservationPatch, ReservationRequest, ReservationStatus, TravelPlan,
    TravelPlanPatch,
};
