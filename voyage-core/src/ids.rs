/// Next sequential id for `prefix`: one past the highest numeric suffix in use,
/// zero-padded to three digits (`C001`, `C002`, ... `C1000`).
///
/// Ids whose suffix is not numeric are ignored, so hand-written ids never break allocation.
/// Deleting the last entity frees its number for reuse.
pub fn next_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, highest + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id() {
        assert_eq!(next_id("C", std::iter::empty()), "C001");
    }

    #[test]
    fn test_skips_gaps_and_foreign_ids() {
        let ids = ["C001", "C007", "FL012", "Cabc"];
        assert_eq!(next_id("C", ids), "C008");
        assert_eq!(next_id("FL", ids), "FL013");
    }

    #[test]
    fn test_grows_past_three_digits() {
        assert_eq!(next_id("R", ["R999"]), "R1000");
    }
}
