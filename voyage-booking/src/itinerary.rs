use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use voyage_catalog::ServiceKind;
use voyage_core::validation::optional_text;
use voyage_core::{CoreError, CoreResult};
use voyage_shared::Client;

use crate::models::{ItineraryDay, ItineraryEvent, Reservation, ReservationLine, TravelPlan};

fn event(line: &ReservationLine, at: chrono::DateTime<Utc>, label: String, location: Option<String>) -> ItineraryEvent {
    ItineraryEvent {
        at,
        kind: line.kind,
        service_id: line.service_id.clone(),
        label,
        location,
    }
}

/// Start and end events of one booked service.
fn events_for(line: &ReservationLine) -> Vec<ItineraryEvent> {
    let mut events = Vec::with_capacity(2);
    match line.kind {
        ServiceKind::Flight => {
            events.push(event(line, line.starts_at, format!("Departure {}", line.label), line.location.clone()));
            if let Some(end) = line.ends_at {
                events.push(event(line, end, format!("Arrival {}", line.label), line.destination.clone()));
            }
        }
        ServiceKind::Accommodation => {
            events.push(event(line, line.starts_at, format!("Check-in {}", line.label), line.location.clone()));
            if let Some(end) = line.ends_at {
                events.push(event(line, end, format!("Check-out {}", line.label), line.location.clone()));
            }
        }
        ServiceKind::Vehicle => {
            events.push(event(line, line.starts_at, format!("Pick up {}", line.label), line.location.clone()));
            if let Some(end) = line.ends_at {
                events.push(event(line, end, format!("Return {}", line.label), line.location.clone()));
            }
        }
        ServiceKind::Activity => {
            events.push(event(line, line.starts_at, line.label.clone(), line.location.clone()));
        }
    }
    events
}

/// The trip's destination: where the first flight lands, else the first stay's city.
fn destination(reservation: &Reservation) -> Option<String> {
    let mut lines: Vec<&ReservationLine> = reservation.lines.iter().collect();
    lines.sort_by_key(|l| l.starts_at);
    lines
        .iter()
        .find(|l| l.kind == ServiceKind::Flight)
        .and_then(|l| l.destination.clone())
        .or_else(|| {
            lines
                .iter()
                .find(|l| l.kind == ServiceKind::Accommodation)
                .and_then(|l| l.location.clone())
        })
}

/// Builds the day-by-day itinerary of a reservation. Only days with at least one event
/// are listed; `day` keeps counting from the first day of the trip.
pub fn build_travel_plan(reservation: &Reservation, client: &Client, notes: Option<String>) -> CoreResult<TravelPlan> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ItineraryEvent>> = BTreeMap::new();
    for line in &reservation.lines {
        for ev in events_for(line) {
            by_date.entry(ev.at.date_naive()).or_default().push(ev);
        }
    }

    let (start_date, end_date) = match (by_date.keys().next(), by_date.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(CoreError::validation(format!(
                "reservation {} has no services to plan",
                reservation.id
            )))
        }
    };

    let days = by_date
        .into_iter()
        .map(|(date, mut events)| {
            events.sort_by_key(|e| e.at);
            ItineraryDay {
                day: (date - start_date).num_days() as u32 + 1,
                date,
                events,
            }
        })
        .collect();

    let traveler_name = client.display_name();
    let title = match destination(reservation) {
        Some(dest) => format!("{}: {}", traveler_name, dest),
        None => format!("{}: trip {}", traveler_name, reservation.id),
    };

    Ok(TravelPlan {
        id: String::new(),
        reservation_id: reservation.id.clone(),
        client_id: client.id.clone(),
        traveler_name,
        title,
        start_date,
        end_date,
        days,
        notes: optional_text(notes),
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fixtures::*;
    use crate::builder::BookingDraft;

    #[test]
    fn test_days_are_grouped_and_sorted() {
        let mut draft = round_trip();
        draft
            .add_stay(hotel(), at(7, 1, 20), at(7, 8, 8), 1)
            .add_activity(tour(), at(7, 3, 9), None)
            .add_rental(car(), at(7, 3, 8), at(7, 5, 8));
        let mut reservation = draft.into_reservation("EUR").unwrap();
        reservation.id = "R001".into();

        let plan = build_travel_plan(&reservation, &client(), None).unwrap();

        assert_eq!(plan.title, "Marie Dupont: JFK");
        assert_eq!(plan.start_date, at(7, 1, 0).date_naive());
        assert_eq!(plan.end_date, at(7, 8, 0).date_naive());

        // 1 July: departure 10:00, arrival 18:00, check-in 20:00
        let first = &plan.days[0];
        assert_eq!(first.day, 1);
        assert_eq!(first.events.len(), 3);
        assert!(first.events[0].label.starts_with("Departure"));
        assert!(first.events[2].label.starts_with("Check-in"));

        // 3 July: car pickup at 8:00 comes before the 9:00 tour
        let third = plan.days.iter().find(|d| d.day == 3).unwrap();
        assert!(third.events[0].label.starts_with("Pick up"));
        assert_eq!(third.events[1].label, "Statue of Liberty tour");

        // Days without events are skipped
        assert!(plan.days.iter().all(|d| !d.events.is_empty()));
        assert!(plan.days.iter().all(|d| d.day != 2));
    }

    #[test]
    fn test_title_falls_back_to_stay_city() {
        let mut draft = BookingDraft::new(client(), 1);
        draft.add_stay(hotel(), at(7, 1, 15), at(7, 3, 10), 1);
        let reservation = draft.into_reservation("EUR").unwrap();

        let plan = build_travel_plan(&reservation, &client(), Some("Late arrival".into())).unwrap();
        assert_eq!(plan.title, "Marie Dupont: New York");
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[1].day, 3);
        assert_eq!(plan.notes.as_deref(), Some("Late arrival"));
    }

    #[test]
    fn test_title_uses_flight_destination_not_label() {
        let mut reservation = round_trip().into_reservation("EUR").unwrap();
        for line in &mut reservation.lines {
            line.label = format!("Air France {}", line.service_id);
        }

        let plan = build_travel_plan(&reservation, &client(), None).unwrap();
        assert_eq!(plan.title, "Marie Dupont: JFK");

        let arrival = &plan.days[0].events[1];
        assert!(arrival.label.starts_with("Arrival"));
        assert_eq!(arrival.location.as_deref(), Some("JFK"));
    }
}
