//! Property-Based Tests for studio-core
//!
//! Uses proptest for the booking reducer, pricing, store and admin query:
//! - Reducer toggles are involutions, reset is total
//! - Totals never drop when an add-on is added
//! - Collections read back exactly what was written
//! - Search and pagination stay within their contracts

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;

use studio_core::admin::{clamp_page, total_pages, AdminQuery, SortKey, ITEMS_PER_PAGE};
use studio_core::booking::{reduce, total_price, BookingAction, BookingField, BookingState};
use studio_core::db::{
    BookingRecord, BookingStatus, CollectionStore, InquiryRecord, InquiryStatus, MemoryStore,
    ProjectType, SubmissionRecord,
};
use studio_core::{Catalog, Collection, SubmissionLog};

// =============================================================================
// Strategies
// =============================================================================

fn package_id_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(
        Catalog::studio()
            .packages()
            .iter()
            .map(|p| p.id)
            .collect::<Vec<_>>(),
    )
}

fn addon_id_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(Catalog::studio().addons().map(|p| p.id).collect::<Vec<_>>())
}

fn field_strategy() -> impl Strategy<Value = BookingField> {
    prop_oneof![
        Just(BookingField::Date),
        Just(BookingField::Time),
        Just(BookingField::Name),
        Just(BookingField::Email),
        Just(BookingField::ProjectDetails),
    ]
}

fn action_strategy() -> impl Strategy<Value = BookingAction> {
    prop_oneof![
        package_id_strategy().prop_map(BookingAction::SelectPackage),
        addon_id_strategy().prop_map(BookingAction::ToggleAddon),
        (field_strategy(), "[a-z0-9 @.:-]{0,12}").prop_map(|(f, v)| BookingAction::SetField(f, v)),
        Just(BookingAction::Reset),
    ]
}

fn state_strategy() -> impl Strategy<Value = BookingState> {
    prop::collection::vec(action_strategy(), 0..20).prop_map(|actions| {
        actions
            .into_iter()
            .fold(BookingState::default(), |state, action| reduce(&state, action))
    })
}

fn record_strategy() -> impl Strategy<Value = SubmissionRecord> {
    let booking = (0i64..1_000, "[A-Za-z ]{0,8}", "[a-z]{1,6}", 0usize..3).prop_map(
        |(secs, name, user, status)| {
            SubmissionRecord::Booking(BookingRecord {
                id: secs,
                submitted_at: Utc.timestamp_opt(secs, 0).unwrap(),
                status: BookingStatus::ALL[status],
                package_id: 1,
                addon_ids: vec![],
                date: "2025-01-01".into(),
                time: "10:00".into(),
                name,
                email: format!("{}@example.com", user),
                project_details: String::new(),
                package_title: "Solo Artist Demo".into(),
                package_price: "$120".into(),
            })
        },
    );
    let inquiry = (0i64..1_000, "[A-Za-z ]{0,8}", "[A-Za-z]{0,8}", 0usize..3).prop_map(
        |(secs, name, company, status)| {
            SubmissionRecord::Inquiry(InquiryRecord {
                id: secs,
                submitted_at: Utc.timestamp_opt(secs, 0).unwrap(),
                status: InquiryStatus::ALL[status],
                company,
                name,
                email: "desk@venue.test".into(),
                project_type: ProjectType::Other,
                description: String::new(),
            })
        },
    );
    prop_oneof![booking, inquiry]
}

// =============================================================================
// Booking Reducer & Pricing
// =============================================================================

proptest! {
    /// Selecting the same primary package twice leaves no selection
    #[test]
    fn select_twice_clears(state in state_strategy(), id in package_id_strategy()) {
        let mut cleared = state.clone();
        cleared.package_id = None;
        let once = reduce(&cleared, BookingAction::SelectPackage(id));
        let twice = reduce(&once, BookingAction::SelectPackage(id));
        prop_assert_eq!(once.package_id, Some(id));
        prop_assert_eq!(twice.package_id, None);
    }

    /// toggleAddon twice restores the add-on set
    #[test]
    fn toggle_addon_involution(state in state_strategy(), id in addon_id_strategy()) {
        let once = reduce(&state, BookingAction::ToggleAddon(id));
        let twice = reduce(&once, BookingAction::ToggleAddon(id));
        prop_assert_eq!(&twice.addon_ids, &state.addon_ids);
    }

    /// Reset from any state is the initial state
    #[test]
    fn reset_is_initial(state in state_strategy()) {
        prop_assert_eq!(reduce(&state, BookingAction::Reset), BookingState::default());
    }

    /// Adding an add-on never lowers the total
    #[test]
    fn total_non_decreasing(state in state_strategy(), id in addon_id_strategy()) {
        prop_assume!(!state.addon_ids.contains(&id));
        let catalog = Catalog::studio();
        let before = total_price(catalog, &state);
        let after = total_price(catalog, &reduce(&state, BookingAction::ToggleAddon(id)));
        prop_assert!(after >= before);
    }
}

// =============================================================================
// Store & Admin Query
// =============================================================================

proptest! {
    /// load(save(X)) == X
    #[test]
    fn save_then_load_round_trip(records in prop::collection::vec(record_strategy(), 0..20)) {
        let store = MemoryStore::new();
        store.save("underla_bookings", &records).unwrap();
        let loaded: Vec<SubmissionRecord> = store.load("underla_bookings").unwrap();
        prop_assert_eq!(loaded, records);
    }

    /// Appends keep order and never lose a record, even on id collisions
    #[test]
    fn append_keeps_every_record(records in prop::collection::vec(record_strategy(), 0..20)) {
        let log = SubmissionLog::new(Arc::new(MemoryStore::new()));
        let bookings: Vec<_> = records
            .into_iter()
            .filter(|r| matches!(r, SubmissionRecord::Booking(_)))
            .collect();
        for record in &bookings {
            log.append(Collection::Bookings, record.clone()).unwrap();
        }
        let stored = log.load(Collection::Bookings).unwrap();
        prop_assert_eq!(stored.len(), bookings.len());
        let mut ids: Vec<_> = stored.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), bookings.len());
    }

    /// Search never returns a record whose name, company and email all miss the query
    #[test]
    fn search_results_match(
        records in prop::collection::vec(record_strategy(), 0..40),
        query in "[a-z]{1,3}",
    ) {
        let rows = AdminQuery::new().with_search(query.clone()).select(&records);
        for row in rows {
            let hit = row.name().to_lowercase().contains(&query)
                || row.company().map_or(false, |c| c.to_lowercase().contains(&query))
                || row.email().to_lowercase().contains(&query);
            prop_assert!(hit);
        }
    }

    /// Newest-first is descending by submission time
    #[test]
    fn newest_first_is_sorted(records in prop::collection::vec(record_strategy(), 0..40)) {
        let rows = AdminQuery::new().with_sort(SortKey::Newest).select(&records);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].submitted_at() >= pair[1].submitted_at());
        }
    }

    /// Page count is ceil(n / 15) and any requested page lands in range
    #[test]
    fn pagination_in_range(n in 0usize..200, requested in 0usize..30) {
        let pages = total_pages(n);
        prop_assert_eq!(pages, (n + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE);
        let page = clamp_page(requested, pages);
        prop_assert!(page >= 1);
        prop_assert!(page <= pages.max(1));
        prop_assert_eq!(clamp_page(0, pages), 1);
        prop_assert_eq!(clamp_page(pages + 1, pages), pages.max(1));
    }

    /// Every page holds at most 15 rows and pages partition the matches
    #[test]
    fn pages_partition_matches(records in prop::collection::vec(record_strategy(), 0..50)) {
        let first = AdminQuery::new().run(&records);
        let mut seen = 0;
        for page in 1..=first.total_pages.max(1) {
            let shown = AdminQuery::new().with_page(page).run(&records);
            prop_assert!(shown.items.len() <= ITEMS_PER_PAGE);
            seen += shown.items.len();
        }
        prop_assert_eq!(seen, records.len());
    }
}

#[test]
fn scenario_solo_demo_with_engineer() {
    let mut state = BookingState::default();
    state.select_package(1);
    state.toggle_addon(10);
    assert_eq!(total_price(Catalog::studio(), &state), 270);
}
