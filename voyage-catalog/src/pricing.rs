use chrono::{DateTime, Utc};
use voyage_core::{CoreError, CoreResult};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// `ceil((end - start) / 86_400_000 ms)`. A stay from 14:00 to 10:00 three days later
/// counts as three nights, a rental of 25 hours as two days.
pub fn days_ceil(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - start).num_milliseconds();
    let whole = ms.div_euclid(MILLIS_PER_DAY);
    if ms.rem_euclid(MILLIS_PER_DAY) != 0 {
        whole + 1
    } else {
        whole
    }
}

/// Number of nights billed for a stay. The check-out must come after the check-in.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> CoreResult<u32> {
    positive_span(check_in, check_out, "check_out must be after check_in")
}

/// Number of days billed for a vehicle rental.
pub fn rental_days(pickup: DateTime<Utc>, dropoff: DateTime<Utc>) -> CoreResult<u32> {
    positive_span(pickup, dropoff, "return_date must be after pickup_date")
}

fn positive_span(start: DateTime<Utc>, end: DateTime<Utc>, msg: &str) -> CoreResult<u32> {
    let days = days_ceil(start, end);
    if days <= 0 {
        return Err(CoreError::validation(msg));
    }
    u32::try_from(days).map_err(|_| CoreError::validation("date range is too long"))
}

fn too_large() -> CoreError {
    CoreError::validation("amount too large")
}

pub fn stay_total(price_per_night_cents: i64, nights: u32, rooms: u32) -> CoreResult<i64> {
    price_per_night_cents
        .checked_mul(i64::from(nights))
        .and_then(|v| v.checked_mul(i64::from(rooms)))
        .ok_or_else(too_large)
}

pub fn rental_total(price_per_day_cents: i64, days: u32) -> CoreResult<i64> {
    price_per_day_cents.checked_mul(i64::from(days)).ok_or_else(too_large)
}

pub fn per_person_total(price_cents: i64, persons: u32) -> CoreResult<i64> {
    price_cents.checked_mul(i64::from(persons)).ok_or_else(too_large)
}

/// Sum of cent amounts, rejected instead of wrapping when it leaves the `i64` range.
pub fn sum_cents(amounts: impl IntoIterator<Item = i64>) -> CoreResult<i64> {
    amounts
        .into_iter()
        .try_fold(0_i64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(too_large)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_days_ceil_rounds_up_partial_days() {
        assert_eq!(days_ceil(at(1, 0), at(4, 0)), 3);
        assert_eq!(days_ceil(at(1, 14), at(4, 10)), 3);
        assert_eq!(days_ceil(at(1, 10), at(2, 11)), 2);
        assert_eq!(days_ceil(at(1, 10), at(1, 10) + Duration::milliseconds(1)), 1);
        assert_eq!(days_ceil(at(1, 10), at(1, 10)), 0);
    }

    #[test]
    fn test_days_ceil_matches_formula() {
        let start = at(3, 9);
        for minutes in [1_i64, 59, 1440, 1441, 4320, 10_000] {
            let end = start + Duration::minutes(minutes);
            let expected = ((minutes * 60_000) as f64 / MILLIS_PER_DAY as f64).ceil() as i64;
            assert_eq!(days_ceil(start, end), expected);
        }
    }

    #[test]
    fn test_nights_rejects_empty_or_reversed_stays() {
        assert_eq!(nights(at(10, 0), at(17, 0)).unwrap(), 7);
        assert!(nights(at(10, 0), at(10, 0)).is_err());
        assert!(nights(at(10, 0), at(9, 0)).is_err());
        assert!(rental_days(at(10, 0), at(9, 0)).is_err());
    }

    #[test]
    fn test_totals() {
        assert_eq!(stay_total(12_000, 3, 2).unwrap(), 72_000);
        assert_eq!(rental_total(4_500, 4).unwrap(), 18_000);
        assert_eq!(per_person_total(35_000, 2).unwrap(), 70_000);
        assert_eq!(sum_cents([72_000, 18_000, 70_000]).unwrap(), 160_000);
    }

    #[test]
    fn test_huge_amounts_are_rejected() {
        let huge = 5_000_000_000_000_000_000_i64;
        assert!(per_person_total(huge, 2).is_err());
        assert!(stay_total(huge, 1, 2).is_err());
        assert!(rental_total(i64::MAX, 2).is_err());
        assert!(sum_cents([i64::MAX, 1]).is_err());
        assert_eq!(per_person_total(huge, 1).unwrap(), huge);
    }
}
