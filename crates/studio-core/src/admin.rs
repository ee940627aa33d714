//! ============================================================================
//! Admin Review - Filter, sort and paginate stored submissions
//! ============================================================================
//! Pure view over a loaded collection:
//! 1. filter by status label and a case-insensitive search over
//!    name / company / email
//! 2. stable sort (newest, oldest, name)
//! 3. fixed-size pages, requested page clamped into range
//! Any change to filter, search or sort sends the view back to page 1.
//! ============================================================================

use serde::Serialize;
use std::cmp::Ordering;

use crate::db::{RecordKind, SubmissionRecord};

/// Rows per admin table page
pub const ITEMS_PER_PAGE: usize = 15;

/// Status dropdown value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(String),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Status(s.to_string())
        }
    }

    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Status(label) => record
                .kind()
                .resolve_status(label)
                .is_some_and(|status| status == record.status_label()),
        }
    }
}

/// Sort dropdown value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
}

impl SortKey {
    /// Unknown keys sort newest-first
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "oldest" => Self::Oldest,
            "name" => Self::Name,
            _ => Self::Newest,
        }
    }
}

/// Case-insensitive substring match on name, company or email.
/// An empty query matches everything.
pub fn matches_search(record: &SubmissionRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    record.name().to_lowercase().contains(&q)
        || record.company().is_some_and(|c| c.to_lowercase().contains(&q))
        || record.email().to_lowercase().contains(&q)
}

fn compare(sort: SortKey, a: &SubmissionRecord, b: &SubmissionRecord) -> Ordering {
    match sort {
        SortKey::Newest => b.submitted_at().cmp(&a.submitted_at()),
        SortKey::Oldest => a.submitted_at().cmp(&b.submitted_at()),
        SortKey::Name => a
            .display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase()),
    }
}

/// One rendered page of the table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: Vec<&'a SubmissionRecord>,
    /// Page actually shown, after clamping
    pub page: usize,
    /// ceil(matches / ITEMS_PER_PAGE); zero when nothing matches
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Number of pages for `n` matching rows
pub fn total_pages(n: usize) -> usize {
    n.div_ceil(ITEMS_PER_PAGE)
}

/// Clamp a requested page into [1, max(1, total_pages)]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Admin table controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminQuery {
    status: StatusFilter,
    search: String,
    sort: SortKey,
    page: usize,
}

impl Default for AdminQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            sort: SortKey::Newest,
            page: 1,
        }
    }
}

impl AdminQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &StatusFilter {
        &self.status
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    /// Filtered and sorted rows, before pagination
    pub fn select<'a>(&self, records: &'a [SubmissionRecord]) -> Vec<&'a SubmissionRecord> {
        let mut rows: Vec<&SubmissionRecord> = records
            .iter()
            .filter(|r| self.status.matches(r) && matches_search(r, &self.search))
            .collect();
        // sort_by is stable: ties keep stored order
        rows.sort_by(|a, b| compare(self.sort, a, b));
        rows
    }

    pub fn run<'a>(&self, records: &'a [SubmissionRecord]) -> Page<'a> {
        let rows = self.select(records);
        let total_matches = rows.len();
        let total_pages = total_pages(total_matches);
        let page = clamp_page(self.page, total_pages);

        let items = rows
            .into_iter()
            .skip((page - 1) * ITEMS_PER_PAGE)
            .take(ITEMS_PER_PAGE)
            .collect();

        Page {
            items,
            page,
            total_pages,
            total_matches,
        }
    }
}

/// Count per status option of `kind`, in dropdown order, zeros included
pub fn status_counts(kind: RecordKind, records: &[SubmissionRecord]) -> Vec<(&'static str, usize)> {
    kind.status_options()
        .iter()
        .map(|label| {
            let count = records
                .iter()
                .filter(|r| r.kind() == kind && r.status_label() == *label)
                .count();
            (*label, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{BookingRecord, BookingStatus, InquiryRecord, InquiryStatus, ProjectType};
    use chrono::{TimeZone, Utc};

    fn booking(id: i64, name: &str, secs: i64, status: BookingStatus) -> SubmissionRecord {
        SubmissionRecord::Booking(BookingRecord {
            id,
            submitted_at: Utc.timestamp_opt(secs, 0).unwrap(),
            status,
            package_id: 1,
            addon_ids: vec![],
            date: "2025-01-01".into(),
            time: "10:00".into(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            project_details: String::new(),
            package_title: "Solo Artist Demo".into(),
            package_price: "$120".into(),
        })
    }

    fn inquiry(id: i64, name: &str, company: &str) -> SubmissionRecord {
        SubmissionRecord::Inquiry(InquiryRecord {
            id,
            submitted_at: Utc.timestamp_opt(id, 0).unwrap(),
            status: InquiryStatus::New,
            company: company.into(),
            name: name.into(),
            email: "desk@venue.test".into(),
            project_type: ProjectType::CorporateAv,
            description: "Boardroom refit".into(),
        })
    }

    fn ids(page: &Page<'_>) -> Vec<i64> {
        page.items.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let records = vec![
            booking(1, "Ada", 10, BookingStatus::Pending),
            booking(2, "Grace", 20, BookingStatus::Paid),
            booking(3, "Adam", 30, BookingStatus::Paid),
        ];
        let query = AdminQuery::new()
            .with_status(StatusFilter::parse("Paid"))
            .with_search("ADA");
        assert_eq!(ids(&query.run(&records)), vec![3]);
    }

    #[test]
    fn test_filter_accepts_status_update_labels() {
        use crate::db::MemoryStore;
        use crate::submissions::{Collection, SubmissionLog};
        use std::sync::Arc;

        let log = SubmissionLog::new(Arc::new(MemoryStore::new()));
        log.append(Collection::Inquiries, inquiry(1, "Sam", "Harbor Studios")).unwrap();
        assert!(log.update_status(Collection::Inquiries, 1, "proposal-sent").unwrap());

        let records = log.load(Collection::Inquiries).unwrap();
        for label in ["proposal-sent", "Proposal Sent", "PROPOSAL SENT"] {
            let query = AdminQuery::new().with_status(StatusFilter::parse(label));
            assert_eq!(ids(&query.run(&records)), vec![1], "filter {:?}", label);
        }
        let query = AdminQuery::new().with_status(StatusFilter::parse("Paid"));
        assert!(query.run(&records).items.is_empty());
    }

    #[test]
    fn test_search_covers_company_and_email() {
        let records = vec![inquiry(1, "Sam", "Harbor Studios"), inquiry(2, "Lee", "Acme")];
        assert_eq!(ids(&AdminQuery::new().with_search("harbor").run(&records)), vec![1]);
        assert_eq!(ids(&AdminQuery::new().with_search("venue.TEST").run(&records)).len(), 2);
    }

    #[test]
    fn test_newest_first_is_stable_on_ties() {
        let records = vec![
            booking(1, "A", 100, BookingStatus::Pending),
            booking(2, "B", 100, BookingStatus::Pending),
            booking(3, "C", 50, BookingStatus::Pending),
        ];
        assert_eq!(ids(&AdminQuery::new().run(&records)), vec![1, 2, 3]);
        assert_eq!(
            ids(&AdminQuery::new().with_sort(SortKey::Oldest).run(&records)),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_name_sort_falls_back_to_company() {
        let records = vec![
            inquiry(1, "zoe", "Acme"),
            inquiry(2, "", "Beacon"),
            inquiry(3, "Adele", "Zed"),
        ];
        let page = AdminQuery::new().with_sort(SortKey::Name).run(&records);
        assert_eq!(ids(&page), vec![3, 2, 1]);
    }

    #[test]
    fn test_pagination_clamps() {
        let records: Vec<_> = (0..40)
            .map(|i| booking(i, "Ada", i, BookingStatus::Pending))
            .collect();

        let first = AdminQuery::new().with_page(0).run(&records);
        assert_eq!(first.page, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), ITEMS_PER_PAGE);

        let last = AdminQuery::new().with_page(4).run(&records);
        assert_eq!(last.page, 3);
        assert_eq!(last.items.len(), 10);
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let page = AdminQuery::new().with_page(5).run(&[]);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_control_changes_reset_page() {
        let mut query = AdminQuery::new().with_page(3);
        query.set_search("x");
        assert_eq!(query.page(), 1);
        query.set_page(2);
        query.set_sort(SortKey::Name);
        assert_eq!(query.page(), 1);
        query.set_page(2);
        query.set_status(StatusFilter::All);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_unknown_sort_key_is_newest() {
        assert_eq!(SortKey::parse("price"), SortKey::Newest);
        assert_eq!(SortKey::parse("Name"), SortKey::Name);
    }

    #[test]
    fn test_status_counts_include_zeros() {
        let records = vec![
            booking(1, "A", 1, BookingStatus::Paid),
            booking(2, "B", 2, BookingStatus::Paid),
        ];
        assert_eq!(
            status_counts(RecordKind::Booking, &records),
            vec![("Pending", 0), ("Contacted", 0), ("Paid", 2)]
        );
    }
}
