use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

/// Flat enumeration, not a state machine: the initial state is always
/// `Pending` and any status may move to any other.
#[derive(Serialize, Deserialize, Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Interview,
    Offer,
    Rejected,
}

impl FromStr for ApplicationStatus {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Reviewed" => Ok(ApplicationStatus::Reviewed),
            "Interview" => Ok(ApplicationStatus::Interview),
            "Offer" => Ok(ApplicationStatus::Offer),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(()),
        }
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEntry {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: String,
    pub resume_url: String,
    pub cover_letter: String,
    pub phone: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub notes: String,
}

/// Ledger entry joined with a projection of its job, as returned by the
/// job-seeker's own listing.
#[derive(FromRow, Debug)]
pub struct ApplicationJobRow {
    pub id: i32,
    pub job_id: i32,
    pub resume_url: String,
    pub cover_letter: String,
    pub phone: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub notes: String,
    pub job_title: String,
    pub job_company: String,
    pub job_company_logo: String,
    pub job_location: String,
    pub job_job_type: String,
}

/// Ledger entry joined with a projection of its applicant, as returned by
/// the employer-facing listing.
#[derive(FromRow, Debug)]
pub struct ApplicationApplicantRow {
    pub id: i32,
    pub job_id: i32,
    pub resume_url: String,
    pub cover_letter: String,
    pub phone: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub notes: String,
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_profile_image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_all_five() {
        for (raw, status) in [
            ("Pending", ApplicationStatus::Pending),
            ("Reviewed", ApplicationStatus::Reviewed),
            ("Interview", ApplicationStatus::Interview),
            ("Offer", ApplicationStatus::Offer),
            ("Rejected", ApplicationStatus::Rejected),
        ] {
            assert_eq!(raw.parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_anything_else() {
        assert!("Hired".parse::<ApplicationStatus>().is_err());
        assert!("pending".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Pending).unwrap(),
            r#""Pending""#
        );
        let status: ApplicationStatus = serde_json::from_str(r#""Interview""#).unwrap();
        assert_eq!(status, ApplicationStatus::Interview);
    }
}
