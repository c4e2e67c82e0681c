use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use voyage_catalog::ServiceKind;

use crate::models::{Invoice, InvoiceStatus, Reservation, ReservationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRevenue {
    /// 1 to 12
    pub month: u32,
    pub invoiced_cents: i64,
    pub paid_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRevenue {
    pub kind: ServiceKind,
    /// Before tax
    pub amount_cents: i64,
}

/// Financial dashboard for one calendar year. Invoices are bucketed by issue date;
/// drafts and cancelled invoices are left out. Sums saturate at `i64::MAX`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    pub year: i32,
    pub currency: String,
    pub invoice_count: usize,
    pub total_invoiced_cents: i64,
    pub total_paid_cents: i64,
    pub total_outstanding_cents: i64,
    pub by_month: Vec<MonthlyRevenue>,
    pub by_service: Vec<ServiceRevenue>,
}

impl RevenueReport {
    pub fn build(year: i32, currency: &str, invoices: &[Invoice]) -> Self {
        let mut by_month: Vec<MonthlyRevenue> = (1..=12)
            .map(|month| MonthlyRevenue { month, invoiced_cents: 0, paid_cents: 0 })
            .collect();
        let mut by_service: BTreeMap<ServiceKind, i64> = ServiceKind::ALL.iter().map(|k| (*k, 0)).collect();

        let mut invoice_count = 0;
        let mut total_invoiced: i64 = 0;
        let mut total_paid: i64 = 0;

        for invoice in invoices {
            if invoice.issued_at.year() != year
                || !matches!(invoice.status, InvoiceStatus::Issued | InvoiceStatus::Paid)
            {
                continue;
            }
            invoice_count += 1;
            total_invoiced = total_invoiced.saturating_add(invoice.total_cents);

            let bucket = &mut by_month[invoice.issued_at.month0() as usize];
            bucket.invoiced_cents = bucket.invoiced_cents.saturating_add(invoice.total_cents);
            if invoice.status == InvoiceStatus::Paid {
                bucket.paid_cents = bucket.paid_cents.saturating_add(invoice.total_cents);
                total_paid = total_paid.saturating_add(invoice.total_cents);
            }

            for line in &invoice.lines {
                let amount = by_service.entry(line.kind).or_insert(0);
                *amount = amount.saturating_add(line.total_cents);
            }
        }

        Self {
            year,
            currency: currency.to_string(),
            invoice_count,
            total_invoiced_cents: total_invoiced,
            total_paid_cents: total_paid,
            total_outstanding_cents: total_invoiced.saturating_sub(total_paid),
            by_month,
            by_service: by_service
                .into_iter()
                .map(|(kind, amount_cents)| ServiceRevenue { kind, amount_cents })
                .collect(),
        }
    }
}

/// Collection sizes for the back-office home screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub clients: usize,
    pub flights: usize,
    pub accommodations: usize,
    pub vehicles: usize,
    pub activities: usize,
    pub reservations: usize,
    pub reservations_by_status: BTreeMap<ReservationStatus, usize>,
    pub invoices: usize,
    pub travel_plans: usize,
    pub users: usize,
}

pub fn count_by_status(reservations: &[Reservation]) -> BTreeMap<ReservationStatus, usize> {
    let mut counts = BTreeMap::new();
    for reservation in reservations {
        *counts.entry(reservation.status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceLine;
    use chrono::{TimeZone, Utc};

    fn invoice(month: u32, status: InvoiceStatus, total: i64) -> Invoice {
        let issued_at = Utc.with_ymd_and_hms(2026, month, 10, 9, 0, 0).unwrap();
        Invoice {
            id: "FA001".into(),
            number: "FAC-2026-FA001".into(),
            reservation_id: "R001".into(),
            client_id: "C001".into(),
            client_name: "Marie Dupont".into(),
            lines: vec![
                InvoiceLine {
                    kind: ServiceKind::Flight,
                    description: "Flight".into(),
                    quantity: 1,
                    unit_price_cents: total / 2,
                    total_cents: total / 2,
                },
                InvoiceLine {
                    kind: ServiceKind::Accommodation,
                    description: "Hotel".into(),
                    quantity: 1,
                    unit_price_cents: total / 2,
                    total_cents: total / 2,
                },
            ],
            subtotal_cents: total,
            tax_rate: 0.0,
            tax_cents: 0,
            total_cents: total,
            currency: "EUR".into(),
            status,
            issued_at,
            due_at: issued_at,
            paid_at: None,
            notes: None,
        }
    }

    #[test]
    fn test_revenue_report() {
        let invoices = vec![
            invoice(1, InvoiceStatus::Paid, 100_000),
            invoice(1, InvoiceStatus::Issued, 40_000),
            invoice(3, InvoiceStatus::Paid, 60_000),
            invoice(3, InvoiceStatus::Cancelled, 999_000),
            invoice(4, InvoiceStatus::Draft, 500_000),
        ];
        let report = RevenueReport::build(2026, "EUR", &invoices);

        assert_eq!(report.invoice_count, 3);
        assert_eq!(report.total_invoiced_cents, 200_000);
        assert_eq!(report.total_paid_cents, 160_000);
        assert_eq!(report.total_outstanding_cents, 40_000);
        assert_eq!(report.by_month.len(), 12);
        assert_eq!(report.by_month[0].invoiced_cents, 140_000);
        assert_eq!(report.by_month[0].paid_cents, 100_000);
        assert_eq!(report.by_month[3].invoiced_cents, 0);

        let flights = report.by_service.iter().find(|s| s.kind == ServiceKind::Flight).unwrap();
        assert_eq!(flights.amount_cents, 100_000);
        let cars = report.by_service.iter().find(|s| s.kind == ServiceKind::Vehicle).unwrap();
        assert_eq!(cars.amount_cents, 0);
    }

    #[test]
    fn test_other_years_are_ignored() {
        let report = RevenueReport::build(2025, "EUR", &[invoice(2, InvoiceStatus::Paid, 10_000)]);
        assert_eq!(report.invoice_count, 0);
        assert_eq!(report.total_invoiced_cents, 0);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let invoices = vec![
            invoice(5, InvoiceStatus::Issued, i64::MAX),
            invoice(5, InvoiceStatus::Paid, i64::MAX),
        ];
        let report = RevenueReport::build(2026, "EUR", &invoices);
        assert_eq!(report.total_invoiced_cents, i64::MAX);
        assert_eq!(report.by_month[4].invoiced_cents, i64::MAX);
        assert_eq!(report.total_outstanding_cents, 0);
    }
}
