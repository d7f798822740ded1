//! Server-side reports: the dashboard overview and CSV downloads.

use church_admin_core::domain::{CsvExport, ServiceError};
use log::info;
use shared::{DashboardOverview, ReportKind, ReportQuery, SearchParams};

use super::api::ApiClient;

#[derive(Clone)]
pub struct ReportClient {
    api: ApiClient,
}

fn window_pairs(window: &ReportQuery) -> Vec<(String, String)> {
    [
        ("from", &window.from),
        ("to", &window.to),
        ("currency", &window.currency),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.clone().map(|value| (key.to_string(), value)))
    .collect()
}

/// Number of data rows in a CSV document with a header line
fn count_rows(content: &str) -> Result<usize, ServiceError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut rows = 0;
    for record in reader.records() {
        record.map_err(|e| ServiceError::Decode(format!("Export is not valid CSV: {}", e)))?;
        rows += 1;
    }
    Ok(rows)
}

impl ReportClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Headline numbers, with giving in the session's selected currency
    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, ServiceError> {
        let query = window_pairs(&ReportQuery {
            currency: self.api.session().session().selected_currency,
            ..ReportQuery::default()
        });
        self.api.get("reports/overview", &query).await
    }

    pub async fn export(
        &self,
        kind: ReportKind,
        window: &ReportQuery,
        params: &SearchParams,
    ) -> Result<CsvExport, ServiceError> {
        let mut query = params.to_pairs();
        query.extend(window_pairs(window));

        let bytes = self
            .api
            .download(&format!("reports/export/{}", kind.as_str()), &query)
            .await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ServiceError::Decode(format!("Export is not UTF-8: {}", e)))?;
        let export = CsvExport {
            file_name: kind.file_name(),
            row_count: count_rows(&content)?,
            content,
        };
        info!("📥 Downloaded {} ({} rows)", export.file_name, export.row_count);
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_pairs_skip_unset_bounds() {
        let pairs = window_pairs(&ReportQuery {
            from: Some("2024-01-01".to_string()),
            to: None,
            currency: Some("USD".to_string()),
        });
        assert_eq!(
            pairs,
            vec![
                ("from".to_string(), "2024-01-01".to_string()),
                ("currency".to_string(), "USD".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_count_respects_quoted_newlines() {
        let content = "Date,Notes\n2024-05-05,\"late\nbut present\"\n2024-05-12,\n";
        assert_eq!(count_rows(content).unwrap(), 2);
        assert_eq!(count_rows("Date,Notes\n").unwrap(), 0);
    }
}
