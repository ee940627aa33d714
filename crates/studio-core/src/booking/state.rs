//! ============================================================================
//! Booking Selection State - Reducer over user actions
//! ============================================================================
//! One primary package (exclusive, re-select toggles off), any number of
//! add-ons, and free-form contact fields. All operations are total; nothing
//! is validated until submit.
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Catalog, PackageId};

/// In-progress booking, owned by the booking form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingState {
    pub package_id: Option<PackageId>,
    pub addon_ids: BTreeSet<PackageId>,
    pub date: String,
    pub time: String,
    pub name: String,
    pub email: String,
    pub project_details: String,
}

/// Editable contact/session field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Date,
    Time,
    Name,
    Email,
    ProjectDetails,
}

impl BookingField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "projectdetails" | "project_details" | "project-details" | "details" => {
                Some(Self::ProjectDetails)
            }
            _ => None,
        }
    }
}

/// Discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    SelectPackage(PackageId),
    ToggleAddon(PackageId),
    SetField(BookingField, String),
    Reset,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action in place
    pub fn apply(&mut self, action: BookingAction) {
        match action {
            BookingAction::SelectPackage(id) => self.select_package(id),
            BookingAction::ToggleAddon(id) => self.toggle_addon(id),
            BookingAction::SetField(field, value) => self.set_field(field, value),
            BookingAction::Reset => self.reset(),
        }
    }

    /// Selecting the current package clears it
    pub fn select_package(&mut self, id: PackageId) {
        self.package_id = if self.package_id == Some(id) { None } else { Some(id) };
    }

    pub fn toggle_addon(&mut self, id: PackageId) {
        if !self.addon_ids.remove(&id) {
            self.addon_ids.insert(id);
        }
    }

    pub fn set_field(&mut self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookingField::Date => self.date = value,
            BookingField::Time => self.time = value,
            BookingField::Name => self.name = value,
            BookingField::Email => self.email = value,
            BookingField::ProjectDetails => self.project_details = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Package-card click: add-ons toggle, primary packages select.
    /// Ids missing from the catalog are ignored.
    pub fn choose(&mut self, catalog: &Catalog, id: PackageId) {
        match catalog.get(id) {
            Some(pkg) if pkg.is_addon() => self.toggle_addon(id),
            Some(_) => self.select_package(id),
            None => {}
        }
    }

    /// Add-on ids as a sorted list, the form they take once serialized
    pub fn addon_list(&self) -> Vec<PackageId> {
        self.addon_ids.iter().copied().collect()
    }
}

/// Pure reducer: next state from the current one
pub fn reduce(state: &BookingState, action: BookingAction) -> BookingState {
    let mut next = state.clone();
    next.apply(action);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_package_toggles_off() {
        let mut state = BookingState::new();
        state.select_package(1);
        assert_eq!(state.package_id, Some(1));
        state.select_package(1);
        assert_eq!(state.package_id, None);
    }

    #[test]
    fn test_select_other_package_replaces() {
        let state = reduce(&BookingState::new(), BookingAction::SelectPackage(1));
        let state = reduce(&state, BookingAction::SelectPackage(2));
        assert_eq!(state.package_id, Some(2));
    }

    #[test]
    fn test_toggle_addon_is_involution() {
        let mut state = BookingState::new();
        state.toggle_addon(11);
        let before = state.addon_ids.clone();
        state.toggle_addon(10);
        state.toggle_addon(10);
        assert_eq!(state.addon_ids, before);
    }

    #[test]
    fn test_set_field_and_reset() {
        let mut state = BookingState::new();
        state.apply(BookingAction::SelectPackage(3));
        state.apply(BookingAction::ToggleAddon(10));
        state.apply(BookingAction::SetField(BookingField::Name, "Ada".into()));
        state.apply(BookingAction::SetField(BookingField::ProjectDetails, "EP".into()));
        assert_eq!(state.name, "Ada");
        assert_eq!(state.project_details, "EP");

        state.apply(BookingAction::Reset);
        assert_eq!(state, BookingState::default());
    }

    #[test]
    fn test_choose_routes_by_package_kind() {
        let catalog = Catalog::studio();
        let mut state = BookingState::new();
        state.choose(catalog, 1);
        state.choose(catalog, 10);
        state.choose(catalog, 18);
        state.choose(catalog, 9999);
        assert_eq!(state.package_id, Some(1));
        assert_eq!(state.addon_list(), vec![10, 18]);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(BookingField::from_str("EMAIL"), Some(BookingField::Email));
        assert_eq!(BookingField::from_str("projectDetails"), Some(BookingField::ProjectDetails));
        assert_eq!(BookingField::from_str("phone"), None);
    }
}
