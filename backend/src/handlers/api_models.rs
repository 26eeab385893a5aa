use serde::{Deserialize, Serialize};

use crate::services::profile::NumberDetail;
use crate::services::search::{NameSearchResult, NumberEntry, NumberLookup};

#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhoneNumberQuery {
    pub phone_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpamReportRequest {
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
pub struct SearchByNameResponse {
    pub results: Vec<NameSearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchByNumberResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<NumberEntry>>,
}

impl From<NumberLookup> for SearchByNumberResponse {
    fn from(lookup: NumberLookup) -> Self {
        match lookup {
            NumberLookup::RegisteredUser(entry) => Self {
                message: "User found.".to_string(),
                name: Some(entry.name),
                phone_number: Some(entry.phone_number),
                results: None,
            },
            NumberLookup::Contacts(entries) => Self {
                message: "Contacts found.".to_string(),
                name: None,
                phone_number: None,
                results: Some(entries),
            },
            NumberLookup::NotFound => Self {
                message: "No results found for this phone number.".to_string(),
                name: None,
                phone_number: None,
                results: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpamCountResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spam_count: Option<i64>,
}

/// `spam_likelihood` carries the raw report count here, unlike the
/// "Spam"/"Unknown" label used by name search.
#[derive(Debug, Serialize)]
pub struct DisplayDetailResponse {
    pub phone_number: String,
    pub spam_likelihood: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absent when nobody owns the number, `null` when hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
}

impl From<NumberDetail> for DisplayDetailResponse {
    fn from(detail: NumberDetail) -> Self {
        let (name, email) = match detail.owner {
            Some(owner) => (Some(owner.name), Some(owner.email)),
            None => (None, None),
        };
        Self {
            phone_number: detail.phone_number,
            spam_likelihood: detail.spam_count,
            name,
            email,
        }
    }
}
