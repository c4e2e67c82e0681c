use chrono::Utc;
use voyage_core::{CoreError, CoreResult};

use crate::models::{Invoice, InvoiceStatus, Reservation, ReservationStatus};

/// Pending → Confirmed → Completed, and Pending/Confirmed → Cancelled.
/// Setting the current status again is a no-op.
pub fn reservation_can_move(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::*;
    from == to
        || matches!(
            (from, to),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
}

pub fn transition_reservation(reservation: &mut Reservation, to: ReservationStatus) -> CoreResult<()> {
    if !reservation_can_move(reservation.status, to) {
        return Err(CoreError::InvalidTransition {
            from: reservation.status.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }
    reservation.status = to;
    reservation.updated_at = Utc::now();
    Ok(())
}

/// Draft → Issued → Paid, and Draft/Issued → Cancelled.
pub fn invoice_can_move(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    use InvoiceStatus::*;
    from == to
        || matches!(
            (from, to),
            (Draft, Issued) | (Issued, Paid) | (Draft, Cancelled) | (Issued, Cancelled)
        )
}

pub fn transition_invoice(invoice: &mut Invoice, to: InvoiceStatus) -> CoreResult<()> {
    if !invoice_can_move(invoice.status, to) {
        return Err(CoreError::InvalidTransition {
            from: invoice.status.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }
    if to == InvoiceStatus::Paid && invoice.paid_at.is_none() {
        invoice.paid_at = Some(Utc::now());
    }
    invoice.status = to;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    #[test]
    fn test_reservation_lifecycle() {
        assert!(reservation_can_move(Pending, Confirmed));
        assert!(reservation_can_move(Confirmed, Completed));
        assert!(reservation_can_move(Confirmed, Cancelled));
        assert!(reservation_can_move(Completed, Completed));
    }

    #[test]
    fn test_invalid_reservation_transitions() {
        // Cannot skip confirmation, nor come back from a final state
        assert!(!reservation_can_move(Pending, Completed));
        assert!(!reservation_can_move(Cancelled, Pending));
        assert!(!reservation_can_move(Completed, Cancelled));
    }

    #[test]
    fn test_invoice_lifecycle() {
        assert!(invoice_can_move(InvoiceStatus::Draft, InvoiceStatus::Issued));
        assert!(invoice_can_move(InvoiceStatus::Issued, InvoiceStatus::Paid));
        assert!(!invoice_can_move(InvoiceStatus::Paid, InvoiceStatus::Cancelled));
        assert!(!invoice_can_move(InvoiceStatus::Cancelled, InvoiceStatus::Issued));
    }
}
