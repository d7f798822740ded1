//! Giving reports and the donation export.

use log::{debug, info};
use shared::{Donation, DonorTotal, GivingReport, MonthlyAmount, ReportQuery, SearchParams};
use std::collections::BTreeMap;

use super::aggregates::{category_totals, month_key, round2, tally};
use super::error::ServiceError;
use super::export::{amount_cell, optional_cell, text_cell, write_csv, CsvExport};
use super::resource_service::ResourceService;
use crate::storage::query;

pub type GivingService = ResourceService<Donation>;

/// Number of donors listed in a giving report
pub const TOP_DONORS: usize = 5;

const EXPORT_HEADER: [&str; 7] = [
    "Date",
    "Donor",
    "Category",
    "Amount",
    "Currency",
    "Payment Method",
    "Notes",
];

fn in_report(donation: &Donation, query: &ReportQuery) -> bool {
    let currency_matches = query
        .currency
        .as_deref()
        .map_or(true, |currency| donation.currency.eq_ignore_ascii_case(currency.trim()));
    currency_matches && query.contains(&donation.date)
}

/// The currency most of `donations` were given in, ties going to the
/// alphabetically first code
fn dominant_currency(donations: &[Donation]) -> Option<String> {
    let counts = tally(donations.iter().map(|d| d.currency.to_uppercase()));
    counts
        .into_iter()
        .max_by(|(a_code, a_count), (b_code, b_count)| {
            a_count.cmp(b_count).then_with(|| b_code.cmp(a_code))
        })
        .map(|(code, _)| code)
}

impl ResourceService<Donation> {
    /// Giving inside the query window in a single currency: the requested
    /// one, or else the currency most gifts in the window were made in.
    /// Amounts are never summed across currencies.
    pub async fn giving_report(&self, query: &ReportQuery) -> Result<GivingReport, ServiceError> {
        let windowed: Vec<Donation> = self
            .all()
            .await?
            .into_iter()
            .filter(|donation| query.contains(&donation.date))
            .collect();

        let currency = match &query.currency {
            Some(currency) => Some(currency.trim().to_uppercase()),
            None => dominant_currency(&windowed),
        };
        let (donations, others): (Vec<Donation>, Vec<Donation>) =
            windowed.into_iter().partition(|donation| {
                currency
                    .as_deref()
                    .map_or(true, |code| donation.currency.eq_ignore_ascii_case(code))
            });
        let other_currencies: Vec<String> = tally(others.iter().map(|d| d.currency.to_uppercase()))
            .into_keys()
            .collect();
        if !other_currencies.is_empty() {
            debug!(
                "Giving report in {:?} leaves out gifts in {:?}",
                currency, other_currencies
            );
        }

        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
        let mut donors: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for donation in &donations {
            *by_category.entry(donation.category.clone()).or_insert(0.0) += donation.amount;
            let month = month_key(&donation.date).unwrap_or_else(|| donation.date.clone());
            *by_month.entry(month).or_insert(0.0) += donation.amount;
            let donor = donors.entry(donation.donor_name.clone()).or_insert((0.0, 0));
            donor.0 += donation.amount;
            donor.1 += 1;
        }

        let total: f64 = donations.iter().map(|d| d.amount).sum();
        let average = if donations.is_empty() {
            0.0
        } else {
            total / donations.len() as f64
        };

        let mut top_donors: Vec<DonorTotal> = donors
            .into_iter()
            .map(|(donor_name, (amount, gifts))| DonorTotal {
                donor_name,
                amount: round2(amount),
                gifts,
            })
            .collect();
        top_donors.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.donor_name.cmp(&b.donor_name))
        });
        top_donors.truncate(TOP_DONORS);

        info!("Giving report over {} donations totalling {:.2}", donations.len(), total);

        Ok(GivingReport {
            currency,
            total_amount: round2(total),
            donation_count: donations.len(),
            average_gift: round2(average),
            by_category: category_totals(by_category),
            by_month: by_month
                .into_iter()
                .map(|(month, amount)| MonthlyAmount {
                    month,
                    amount: round2(amount),
                })
                .collect(),
            top_donors,
            other_currencies,
        })
    }

    /// Donations matching `params` and the report window as CSV, oldest first
    pub async fn export_csv(
        &self,
        params: &SearchParams,
        window: &ReportQuery,
    ) -> Result<CsvExport, ServiceError> {
        let mut donations: Vec<Donation> = query::matching(self.all().await?, params)
            .into_iter()
            .filter(|donation| in_report(donation, window))
            .collect();
        donations.sort_by(|a, b| a.date.cmp(&b.date));

        let rows = donations.iter().map(|d| {
            vec![
                d.date.clone(),
                text_cell(&d.donor_name),
                text_cell(&d.category),
                amount_cell(d.amount),
                d.currency.clone(),
                d.payment_method.as_str().to_string(),
                optional_cell(&d.notes),
            ]
        });

        let export = write_csv("giving-report.csv", &EXPORT_HEADER, rows)?;
        info!("✅ EXPORT: {} donations exported", export.row_count);
        Ok(export)
    }
}
