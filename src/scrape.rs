//! Legacy Dashboard Endpoints
//!
//! Two older backend routes predate the JSON API and are consumed
//! directly by the dashboards: `GET /data` returns an HTML document whose
//! first `<table>` holds the student register, and `GET /searchAng`
//! returns a bare JSON row array of anganwadi records. Both payloads are
//! external contracts this client does not control, so parsing tolerates
//! malformed bodies: a document without a table yields an empty roster
//! and zero stats rather than an error.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;

fn table_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("table").expect("static selector is valid"))
}

fn th_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("th").expect("static selector is valid"))
}

fn row_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("tbody tr").expect("static selector is valid"))
}

fn td_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("td").expect("static selector is valid"))
}

/// Row and village counts derived from a roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub unique_villages: usize,
}

/// Student register scraped from the `/data` HTML table.
///
/// Each row is keyed by the table's header text; a blank header at
/// position `i` becomes `column<i>`.
#[derive(Debug, Clone, Default)]
pub struct StudentRoster {
    pub rows: Vec<HashMap<String, String>>,
    pub stats: RosterStats,
}

/// Parse the student register out of an HTML document.
///
/// Rows missing both a name (`name`/`childName`) and a contact
/// (`mobileNumber`/`username`) are dropped as incomplete. A document
/// without a `<table>` yields an empty roster.
pub fn parse_student_roster(html: &str) -> StudentRoster {
    let document = Html::parse_document(html);
    let table = match document.select(table_selector()).next() {
        Some(table) => table,
        None => {
            tracing::warn!("no table found in student roster document");
            return StudentRoster::default();
        }
    };

    let columns: Vec<String> = table
        .select(th_selector())
        .map(|th| th.text().collect::<String>().trim().to_string())
        .collect();

    let rows: Vec<HashMap<String, String>> = table
        .select(row_selector())
        .map(|tr| {
            let cells: Vec<String> = tr
                .select(td_selector())
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect();
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let key = if column.is_empty() {
                        format!("column{}", i)
                    } else {
                        column.clone()
                    };
                    (key, cells.get(i).cloned().unwrap_or_default())
                })
                .collect()
        })
        .collect();

    let rows: Vec<HashMap<String, String>> = rows
        .into_iter()
        .filter(|row| {
            let has_name = non_empty(row, "name").or_else(|| non_empty(row, "childName"));
            let has_contact =
                non_empty(row, "mobileNumber").or_else(|| non_empty(row, "username"));
            has_name.is_some() && has_contact.is_some()
        })
        .collect();

    let villages: HashSet<String> = rows
        .iter()
        .filter_map(|row| {
            non_empty(row, "village")
                .or_else(|| non_empty(row, "address"))
                .cloned()
        })
        .collect();

    let stats = RosterStats {
        total: rows.len(),
        unique_villages: villages.len(),
    };
    StudentRoster { rows, stats }
}

fn non_empty<'a>(row: &'a HashMap<String, String>, key: &str) -> Option<&'a String> {
    row.get(key).filter(|value| !value.is_empty())
}

/// One anganwadi record from the `/searchAng` JSON rows.
///
/// Fields default to empty so a sparse or drifting backend row still
/// deserializes; unknown fields are retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AngRecord {
    pub aanganwaadi_id: String,
    pub name: String,
    pub contact_number: String,
    pub gram: String,
    pub zila: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Anganwadi roster from the `/searchAng` endpoint
#[derive(Debug, Clone, Default)]
pub struct AngRoster {
    pub records: Vec<AngRecord>,
    pub stats: RosterStats,
}

/// Case-insensitive search over id, name and contact number.
/// A blank query keeps every record.
pub fn filter_ang_records(records: &[AngRecord], query: &str) -> Vec<AngRecord> {
    if query.trim().is_empty() {
        return records.to_vec();
    }
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.aanganwaadi_id.to_lowercase().contains(&query)
                || record.name.to_lowercase().contains(&query)
                || record.contact_number.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

fn ang_stats(records: &[AngRecord]) -> RosterStats {
    let villages: HashSet<String> = records
        .iter()
        .map(|record| {
            if record.gram.is_empty() {
                record.zila.clone()
            } else {
                record.gram.clone()
            }
        })
        .collect();
    RosterStats {
        total: records.len(),
        unique_villages: villages.len(),
    }
}

/// Client for the two legacy routes
pub struct ScrapeClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ScrapeClient {
    /// Build a client against the configured backend origin
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "legacy fetch");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    ApiError::Transport(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(response)
    }

    /// Fetch and parse the student register from `GET /data`
    pub async fn students(&self) -> Result<StudentRoster, ApiError> {
        let response = self.fetch("/data").await?;
        let html = response
            .text()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;
        Ok(parse_student_roster(&html))
    }

    /// Fetch the anganwadi records from `GET /searchAng`
    pub async fn anganwadi_records(&self) -> Result<AngRoster, ApiError> {
        let response = self.fetch("/searchAng").await?;
        let records: Vec<AngRecord> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;
        let stats = ang_stats(&records);
        Ok(AngRoster { records, stats })
    }
}
