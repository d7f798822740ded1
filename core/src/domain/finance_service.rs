//! Income and expense summaries over the finance ledger.

use log::info;
use shared::{FinanceKind, FinanceRecord, FinanceSummary, MonthlyFinance, ReportQuery};
use std::collections::BTreeMap;

use super::aggregates::{category_totals, month_key, round2};
use super::error::ServiceError;
use super::resource_service::ResourceService;

pub type FinanceService = ResourceService<FinanceRecord>;

impl ResourceService<FinanceRecord> {
    /// Totals, per-category shares and per-month figures for records dated
    /// inside the query window
    pub async fn finance_summary(&self, query: &ReportQuery) -> Result<FinanceSummary, ServiceError> {
        let records: Vec<FinanceRecord> = self
            .all()
            .await?
            .into_iter()
            .filter(|record| query.contains(&record.date))
            .collect();

        let mut income_by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut expenses_by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut monthly: BTreeMap<String, (f64, f64)> = BTreeMap::new();

        for record in &records {
            let month = month_key(&record.date).unwrap_or_else(|| record.date.clone());
            let entry = monthly.entry(month).or_insert((0.0, 0.0));
            match record.kind {
                FinanceKind::Income => {
                    *income_by_category.entry(record.category.clone()).or_insert(0.0) += record.amount;
                    entry.0 += record.amount;
                }
                FinanceKind::Expense => {
                    *expenses_by_category.entry(record.category.clone()).or_insert(0.0) += record.amount;
                    entry.1 += record.amount;
                }
            }
        }

        let total_income: f64 = income_by_category.values().sum();
        let total_expenses: f64 = expenses_by_category.values().sum();

        info!(
            "Finance summary over {} records: income {:.2}, expenses {:.2}",
            records.len(),
            total_income,
            total_expenses
        );

        Ok(FinanceSummary {
            total_income: round2(total_income),
            total_expenses: round2(total_expenses),
            net_balance: round2(total_income - total_expenses),
            income_by_category: category_totals(income_by_category),
            expenses_by_category: category_totals(expenses_by_category),
            monthly: monthly
                .into_iter()
                .map(|(month, (income, expenses))| MonthlyFinance {
                    month,
                    income: round2(income),
                    expenses: round2(expenses),
                })
                .collect(),
        })
    }
}
