//! ============================================================================
//! Database Types - Serializable records for the studio store
//! ============================================================================
//! Submissions are a tagged union (`kind`) of bookings and inquiries so the
//! admin table can render either through one interface.
//! ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::PackageId;

/// Booking review status.
/// Unknown labels read back as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum BookingStatus {
    #[default]
    Pending,
    Contacted,
    Paid,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::Pending, Self::Contacted, Self::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Contacted => "Contacted",
            Self::Paid => "Paid",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        Self::from_label(&s).unwrap_or_default()
    }
}

/// Inquiry review status.
/// Unknown labels read back as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 3] = [Self::New, Self::Contacted, Self::ProposalSent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::ProposalSent => "Proposal Sent",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|v| {
            v.as_str().eq_ignore_ascii_case(s) || v.as_str().replace(' ', "-").eq_ignore_ascii_case(s)
        })
    }
}

impl From<String> for InquiryStatus {
    fn from(s: String) -> Self {
        Self::from_label(&s).unwrap_or_default()
    }
}

/// AV project type offered on the inquiry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ProjectType {
    #[default]
    #[serde(rename = "Broadcast & Production")]
    BroadcastProduction,
    #[serde(rename = "Corporate AV")]
    CorporateAv,
    #[serde(rename = "Live Events & Staging")]
    LiveEvents,
    #[serde(rename = "Education & Government")]
    EducationGovernment,
    #[serde(rename = "Hospitality & Retail")]
    HospitalityRetail,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        Self::BroadcastProduction,
        Self::CorporateAv,
        Self::LiveEvents,
        Self::EducationGovernment,
        Self::HospitalityRetail,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BroadcastProduction => "Broadcast & Production",
            Self::CorporateAv => "Corporate AV",
            Self::LiveEvents => "Live Events & Staging",
            Self::EducationGovernment => "Education & Government",
            Self::HospitalityRetail => "Hospitality & Retail",
            Self::Other => "Other",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl From<String> for ProjectType {
    fn from(s: String) -> Self {
        Self::from_label(&s).unwrap_or(Self::Other)
    }
}

/// Finalized studio booking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Creation timestamp in milliseconds, unique within the collection
    pub id: i64,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    pub package_id: PackageId,
    #[serde(default)]
    pub addon_ids: Vec<PackageId>,
    pub date: String,
    pub time: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub project_details: String,
    /// Captured at submit time so catalog edits never rewrite history
    pub package_title: String,
    pub package_price: String,
}

/// AV & broadcasting project inquiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub id: i64,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: InquiryStatus,
    pub company: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub project_type: ProjectType,
    pub description: String,
}

/// Any persisted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionRecord {
    Booking(BookingRecord),
    Inquiry(InquiryRecord),
}

impl SubmissionRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Booking(_) => RecordKind::Booking,
            Self::Inquiry(_) => RecordKind::Inquiry,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Booking(b) => b.id,
            Self::Inquiry(i) => i.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        match self {
            Self::Booking(b) => b.id = id,
            Self::Inquiry(i) => i.id = id,
        }
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        match self {
            Self::Booking(b) => b.submitted_at,
            Self::Inquiry(i) => i.submitted_at,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Booking(b) => b.status.as_str(),
            Self::Inquiry(i) => i.status.as_str(),
        }
    }

    /// Set status from a label valid for this record's kind.
    /// Returns false (and changes nothing) for a label outside the kind's set.
    pub fn set_status(&mut self, label: &str) -> bool {
        match self {
            Self::Booking(b) => match BookingStatus::from_label(label) {
                Some(s) => {
                    b.status = s;
                    true
                }
                None => false,
            },
            Self::Inquiry(i) => match InquiryStatus::from_label(label) {
                Some(s) => {
                    i.status = s;
                    true
                }
                None => false,
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Booking(b) => &b.name,
            Self::Inquiry(i) => &i.name,
        }
    }

    pub fn company(&self) -> Option<&str> {
        match self {
            Self::Booking(_) => None,
            Self::Inquiry(i) => Some(&i.company),
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Booking(b) => &b.email,
            Self::Inquiry(i) => &i.email,
        }
    }

    /// Name, falling back to company when empty
    pub fn display_name(&self) -> &str {
        match self.company() {
            Some(company) if self.name().trim().is_empty() => company,
            _ => self.name(),
        }
    }

    /// Package title for bookings, project type for inquiries
    pub fn headline(&self) -> &str {
        match self {
            Self::Booking(b) => &b.package_title,
            Self::Inquiry(i) => i.project_type.as_str(),
        }
    }

    pub fn details(&self) -> &str {
        let text = match self {
            Self::Booking(b) => b.project_details.as_str(),
            Self::Inquiry(i) => i.description.as_str(),
        };
        if text.trim().is_empty() {
            "No details provided."
        } else {
            text
        }
    }

    /// Requested (date, time), bookings only
    pub fn schedule(&self) -> Option<(&str, &str)> {
        match self {
            Self::Booking(b) if !b.date.is_empty() => Some((&b.date, &b.time)),
            _ => None,
        }
    }
}

/// Discriminant of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Booking,
    Inquiry,
}

impl RecordKind {
    pub fn status_options(&self) -> &'static [&'static str] {
        match self {
            Self::Booking => &["Pending", "Contacted", "Paid"],
            Self::Inquiry => &["New", "Contacted", "Proposal Sent"],
        }
    }

    /// Canonical status label for `label`, accepting any case and the
    /// hyphenated form ("proposal-sent")
    pub fn resolve_status(&self, label: &str) -> Option<&'static str> {
        match self {
            Self::Booking => BookingStatus::from_label(label).map(|s| s.as_str()),
            Self::Inquiry => InquiryStatus::from_label(label).map(|s| s.as_str()),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Booking => f.write_str("booking"),
            Self::Inquiry => f.write_str("inquiry"),
        }
    }
}

// ============================================================================
// Content Records
// ============================================================================

/// Uploaded image kept as a base64 data URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: i64,
    pub name: String,
    pub data_url: String,
}

/// Page a gallery is shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryPage {
    #[default]
    Moes,
    Landing,
    Other,
}

impl GalleryPage {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moes" | "underla" => Some(Self::Moes),
            "landing" => Some(Self::Landing),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: String,
    pub name: String,
    pub page: GalleryPage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    pub created_at: DateTime<Utc>,
}

/// Featured audio session on the studio page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSession {
    pub id: i64,
    pub artist: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Store-wide counts for the admin overview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbStats {
    pub total_bookings: usize,
    pub booking_counts: BTreeMap<String, usize>,
    pub total_inquiries: usize,
    pub inquiry_counts: BTreeMap<String, usize>,
    pub total_images: usize,
    pub total_galleries: usize,
    pub total_featured_sessions: usize,
}
