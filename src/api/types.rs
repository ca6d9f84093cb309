// Content API vocabulary and response types.
// Closed enums for services, periods and review states, plus the Creator record.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Deployment;
use crate::error::{KcError, Result};

/// Creator platform supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceIdentifier {
    Patreon,
    Fanbox,
    Gumroad,
    Fantia,
    Boosty,
    #[serde(rename = "subscribestar")]
    SubscribeStar,
    Dlsite,
    OnlyFans,
    Fansly,
    CandFans,
}

impl ServiceIdentifier {
    pub const ALL: [ServiceIdentifier; 10] = [
        ServiceIdentifier::Patreon,
        ServiceIdentifier::Fanbox,
        ServiceIdentifier::Gumroad,
        ServiceIdentifier::Fantia,
        ServiceIdentifier::Boosty,
        ServiceIdentifier::SubscribeStar,
        ServiceIdentifier::Dlsite,
        ServiceIdentifier::OnlyFans,
        ServiceIdentifier::Fansly,
        ServiceIdentifier::CandFans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIdentifier::Patreon => "patreon",
            ServiceIdentifier::Fanbox => "fanbox",
            ServiceIdentifier::Gumroad => "gumroad",
            ServiceIdentifier::Fantia => "fantia",
            ServiceIdentifier::Boosty => "boosty",
            ServiceIdentifier::SubscribeStar => "subscribestar",
            ServiceIdentifier::Dlsite => "dlsite",
            ServiceIdentifier::OnlyFans => "onlyfans",
            ServiceIdentifier::Fansly => "fansly",
            ServiceIdentifier::CandFans => "candfans",
        }
    }

    /// Deployment that archives this service.
    pub fn deployment(&self) -> Deployment {
        match self {
            ServiceIdentifier::OnlyFans
            | ServiceIdentifier::Fansly
            | ServiceIdentifier::CandFans => Deployment::Coomer,
            _ => Deployment::Kemono,
        }
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceIdentifier {
    type Err = KcError;

    fn from_str(s: &str) -> Result<Self> {
        ServiceIdentifier::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| KcError::UnknownService(s.to_string()))
    }
}

/// Time window for the popular posts listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    #[default]
    Recent,
    Day,
    Week,
    Month,
}

impl PeriodFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodFilter::Recent => "recent",
            PeriodFilter::Day => "day",
            PeriodFilter::Week => "week",
            PeriodFilter::Month => "month",
        }
    }
}

/// Review state filter for imported DMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Ignored,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Ignored => "ignored",
        }
    }
}

/// Day/month/year triple sent as a query parameter.
///
/// No range checking is done. The text form is `year-month-day` without
/// zero padding, which is what the popular posts endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CalendarDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Local::now().date_naive().into()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.day(), date.month(), date.year())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Pagination offset, passed through to the API as `o` unchanged.
pub type PaginationCursor = u64;

/// Creator record from the directory listing.
///
/// Only the favorite count is typed. All other fields are carried through
/// untouched so a persisted snapshot matches what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub favorited: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Creator {
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Service tag, if present and one of the known platforms.
    pub fn service(&self) -> Option<ServiceIdentifier> {
        self.str_field("service").and_then(|s| s.parse().ok())
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// String field that the caller cannot proceed without.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.str_field(key)
            .ok_or_else(|| KcError::MissingField(key.to_string()))
    }
}

/// Body of an importer submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    pub session_key: String,
    pub auto_import: String,
    pub save_session_key: String,
    pub save_dms: String,
    pub channel_ids: String,
    #[serde(rename = "x-bc")]
    pub x_bc: String,
    pub auth_id: String,
    pub user_agent: String,
}
