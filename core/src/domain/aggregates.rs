//! Small numeric helpers shared by the statistics and report builders.

use chrono::NaiveDate;
use shared::CategoryTotal;
use std::collections::BTreeMap;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals; 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}

/// `YYYY-MM` of a date or RFC 3339 timestamp
pub fn month_key(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()?;
    Some(day.format("%Y-%m").to_string())
}

/// Count occurrences of each key
pub fn tally<I>(keys: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Per-category totals with their share of the grand total, largest first
pub fn category_totals(amounts: BTreeMap<String, f64>) -> Vec<CategoryTotal> {
    let whole: f64 = amounts.values().sum();
    let mut totals: Vec<CategoryTotal> = amounts
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            percentage: percentage(amount, whole),
            amount: round2(amount),
            category,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding_and_zero_whole() {
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(2.0, 3.0), 66.67);
        assert_eq!(percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key("2024-02-29").as_deref(), Some("2024-02"));
        assert_eq!(month_key("2024-12-01T10:00:00.000Z").as_deref(), Some("2024-12"));
        assert_eq!(month_key("Feb 2024"), None);
    }

    #[test]
    fn test_category_totals_largest_first() {
        let mut amounts = BTreeMap::new();
        amounts.insert("Offering".to_string(), 25.0);
        amounts.insert("Tithe".to_string(), 75.0);

        let totals = category_totals(amounts);
        assert_eq!(totals[0].category, "Tithe");
        assert_eq!(totals[0].percentage, 75.0);
        assert_eq!(totals[1].percentage, 25.0);
    }
}
