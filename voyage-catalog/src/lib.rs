pub mod pricing;
pub mod product;

pub use product::{
    Accommodation, AccommodationDraft, AccommodationKind, AccommodationPatch, Activity, ActivityDraft,
    ActivityPatch, CabinClass, Flight, FlightDraft, FlightPatch, ServiceKind, Vehicle, VehicleCategory,
    VehicleDraft, VehiclePatch,
};
