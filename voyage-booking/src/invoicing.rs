use chrono::{Duration, Utc};
use voyage_catalog::pricing;
use voyage_core::validation::optional_text;
use voyage_core::{CoreError, CoreResult};
use voyage_shared::Client;

use crate::models::{Invoice, InvoiceLine, InvoiceStatus, Reservation, ReservationStatus};

/// Turns reservations into invoices using the agency's billing rules.
#[derive(Debug, Clone)]
pub struct InvoiceGenerator {
    tax_rate: f64,
    due_days: i64,
    currency: String,
}

impl InvoiceGenerator {
    pub fn new(tax_rate: f64, due_days: u32, currency: impl Into<String>) -> Self {
        Self {
            tax_rate,
            due_days: i64::from(due_days),
            currency: currency.into(),
        }
    }

    /// Builds an `ISSUED` invoice from the reservation's priced lines.
    /// The reservation's stored total is ignored; lines are the source of truth.
    pub fn generate(&self, reservation: &Reservation, client: &Client, notes: Option<String>) -> CoreResult<Invoice> {
        if reservation.status == ReservationStatus::Cancelled {
            return Err(CoreError::validation(format!(
                "reservation {} is cancelled and cannot be invoiced",
                reservation.id
            )));
        }
        if reservation.lines.is_empty() {
            return Err(CoreError::validation(format!("reservation {} has no services", reservation.id)));
        }

        let lines: Vec<InvoiceLine> = reservation
            .lines
            .iter()
            .map(|line| InvoiceLine {
                kind: line.kind,
                description: line.description.clone(),
                quantity: line.quantity(),
                unit_price_cents: line.unit_price_cents,
                total_cents: line.total_cents,
            })
            .collect();

        let subtotal_cents = pricing::sum_cents(lines.iter().map(|l| l.total_cents))?;
        let tax_cents = self.tax_on(subtotal_cents);
        let total_cents = pricing::sum_cents([subtotal_cents, tax_cents])?;
        let issued_at = Utc::now();
        let due_at = Duration::try_days(self.due_days)
            .and_then(|days| issued_at.checked_add_signed(days))
            .ok_or_else(|| CoreError::validation("invoice due date is out of range"))?;

        Ok(Invoice {
            id: String::new(),
            number: String::new(),
            reservation_id: reservation.id.clone(),
            client_id: client.id.clone(),
            client_name: client.display_name(),
            lines,
            subtotal_cents,
            tax_rate: self.tax_rate,
            tax_cents,
            total_cents,
            currency: self.currency.clone(),
            status: InvoiceStatus::Issued,
            issued_at,
            due_at,
            paid_at: None,
            notes: optional_text(notes),
        })
    }

    /// Rounded to the nearest cent.
    pub fn tax_on(&self, subtotal_cents: i64) -> i64 {
        (subtotal_cents as f64 * self.tax_rate).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fixtures::*;
    use crate::lifecycle::transition_reservation;
    use voyage_core::Entity;

    fn reservation() -> Reservation {
        let mut draft = round_trip();
        draft.add_stay(hotel(), at(7, 1, 15), at(7, 4, 10), 1);
        let mut reservation = draft.into_reservation("EUR").unwrap();
        reservation.assign_id("R001".into());
        reservation
    }

    #[test]
    fn test_invoice_totals_include_tax() {
        let generator = InvoiceGenerator::new(0.2, 30, "EUR");
        let invoice = generator.generate(&reservation(), &client(), None).unwrap();

        assert_eq!(invoice.lines.len(), 3);
        assert_eq!(invoice.lines[0].quantity, 2);
        assert_eq!(invoice.subtotal_cents, 200_000 + 45_000);
        assert_eq!(invoice.tax_cents, 49_000);
        assert_eq!(invoice.total_cents, 294_000);
        assert_eq!(invoice.client_name, "Marie Dupont");
        assert_eq!(invoice.status, InvoiceStatus::Issued);
        assert_eq!((invoice.due_at - invoice.issued_at).num_days(), 30);
    }

    #[test]
    fn test_number_follows_id() {
        let generator = InvoiceGenerator::new(0.2, 30, "EUR");
        let mut invoice = generator.generate(&reservation(), &client(), None).unwrap();
        invoice.assign_id("FA007".into());
        assert!(invoice.number.starts_with("FAC-"));
        assert!(invoice.number.ends_with("-FA007"));
    }

    #[test]
    fn test_tax_rounding() {
        let generator = InvoiceGenerator::new(0.055, 30, "EUR");
        assert_eq!(generator.tax_on(1_010), 56);
        assert_eq!(generator.tax_on(0), 0);
    }

    #[test]
    fn test_cancelled_reservation_is_not_invoiced() {
        let mut reservation = reservation();
        transition_reservation(&mut reservation, ReservationStatus::Cancelled).unwrap();
        let generator = InvoiceGenerator::new(0.2, 30, "EUR");
        assert!(generator.generate(&reservation, &client(), None).is_err());
    }

    #[test]
    fn test_total_that_overflows_with_tax_is_rejected() {
        let mut reservation = reservation();
        for line in &mut reservation.lines {
            line.total_cents = 3_000_000_000_000_000_000;
        }
        let generator = InvoiceGenerator::new(0.2, 30, "EUR");
        let err = generator.generate(&reservation, &client(), None).unwrap_err();
        assert!(err.to_string().contains("amount too large"));
    }
}
