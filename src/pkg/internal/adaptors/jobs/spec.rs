use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::authz::Owned;

#[derive(Serialize, Deserialize, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub company_logo: String,
    pub company_website: String,
    pub company_description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub skills: Vec<String>,
    pub posted_at: DateTime<Utc>,
    pub closing_date: DateTime<Utc>,
    pub applications: i32,
    pub posted_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for JobEntry {
    fn owner_id(&self) -> &str {
        &self.posted_by
    }
}

#[derive(Debug, Default)]
pub struct JobFilters {
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
}

/// Requirements and responsibilities arrive as newline-delimited text.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Skills arrive as comma-delimited text.
pub fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_drops_blanks() {
        assert_eq!(split_lines("A\nB\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_lines_trims() {
        assert_eq!(
            split_lines("  5 years of Rust \n\t\n ownership of services "),
            vec!["5 years of Rust", "ownership of services"]
        );
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn test_split_commas_trims_and_drops_blanks() {
        assert_eq!(
            split_commas(" rust, postgres ,, axum , "),
            vec!["rust", "postgres", "axum"]
        );
        assert!(split_commas("").is_empty());
    }
}
