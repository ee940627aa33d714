//! ============================================================================
//! Pricing - Derived totals for a booking selection
//! ============================================================================
//! Recomputed from scratch on every state change, never stored.
//! Hourly add-ons are estimated at a fixed number of hours.
//! ============================================================================

use serde::Serialize;

use super::state::BookingState;
use crate::catalog::{Catalog, Package};

/// Estimated hours billed for "Studio Engineer (Hourly)"
pub const ENGINEER_EST_HOURS: u32 = 3;

/// Estimated hours billed for "Session Musician"
pub const MUSICIAN_EST_HOURS: u32 = 2;

/// Quantity multiplier for an add-on, keyed by exact title
pub fn addon_multiplier(title: &str) -> u32 {
    match title {
        "Studio Engineer (Hourly)" => ENGINEER_EST_HOURS,
        "Session Musician" => MUSICIAN_EST_HOURS,
        _ => 1,
    }
}

/// Resolved selection and estimated total
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote<'a> {
    pub selected_package: Option<&'a Package>,
    /// Catalog order, not selection order
    pub selected_addons: Vec<&'a Package>,
    pub total_price: u32,
}

impl<'a> Quote<'a> {
    pub fn for_state(catalog: &'a Catalog, state: &BookingState) -> Self {
        let selected_package = state.package_id.and_then(|id| catalog.get(id));
        let selected_addons: Vec<&Package> = catalog
            .packages()
            .iter()
            .filter(|p| state.addon_ids.contains(&p.id))
            .collect();

        let base = selected_package.map(|p| p.price).unwrap_or(0);
        let addons: u32 = selected_addons
            .iter()
            .map(|a| a.price * addon_multiplier(&a.title))
            .sum();

        Self {
            selected_package,
            selected_addons,
            total_price: base + addons,
        }
    }
}

/// Shorthand for `Quote::for_state(..).total_price`
pub fn total_price(catalog: &Catalog, state: &BookingState) -> u32 {
    Quote::for_state(catalog, state).total_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Package::new(1, Category::RecordingTracking, "Solo Artist Demo", 120, "$120", &[], ""),
            Package::new(10, Category::EngineerAddons, "Studio Engineer (Hourly)", 50, "+$50 / hour", &[], ""),
            Package::new(11, Category::EngineerAddons, "Live Stream Technician", 150, "+$150 / event", &[], ""),
        ])
    }

    #[test]
    fn test_solo_demo_with_engineer() {
        let catalog = small_catalog();
        let mut state = BookingState::new();
        state.select_package(1);
        state.toggle_addon(10);
        assert_eq!(total_price(&catalog, &state), 120 + 50 * 3);
    }

    #[test]
    fn test_empty_selection_is_free() {
        let catalog = small_catalog();
        let quote = Quote::for_state(&catalog, &BookingState::new());
        assert!(quote.selected_package.is_none());
        assert!(quote.selected_addons.is_empty());
        assert_eq!(quote.total_price, 0);
    }

    #[test]
    fn test_addons_without_package() {
        let catalog = small_catalog();
        let mut state = BookingState::new();
        state.toggle_addon(11);
        assert_eq!(total_price(&catalog, &state), 150);
    }

    #[test]
    fn test_addons_listed_in_catalog_order() {
        let catalog = Catalog::studio();
        let mut state = BookingState::new();
        state.toggle_addon(19);
        state.toggle_addon(10);
        state.toggle_addon(11);
        let quote = Quote::for_state(catalog, &state);
        let ids: Vec<_> = quote.selected_addons.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 11, 19]);
    }

    #[test]
    fn test_session_musician_multiplier() {
        let catalog = Catalog::studio();
        let mut state = BookingState::new();
        state.select_package(7);
        state.toggle_addon(18);
        assert_eq!(total_price(catalog, &state), 80 + 100 * 2);
    }

    #[test]
    fn test_unknown_package_id_ignored() {
        let catalog = small_catalog();
        let mut state = BookingState::new();
        state.select_package(42);
        assert_eq!(total_price(&catalog, &state), 0);
    }
}
