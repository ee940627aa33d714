//! ============================================================================
//! Assistant Tools - Function declarations and pure handlers
//! ============================================================================
//! Handlers only compute. Persisting a booking and sending its confirmation
//! happen in the session, while it is executing the tool.
//! ============================================================================

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::types::ToolCall;
use crate::catalog::Catalog;
use crate::db::{BookingRecord, BookingStatus};
use crate::error::AssistantError;

pub const GET_STUDIO_PACKAGES: &str = "getStudioPackages";
pub const CREATE_STUDIO_BOOKING: &str = "createStudioBooking";

/// `projectDetails` of every chat-created booking
pub const CHAT_BOOKING_DETAILS: &str = "Booked via Chatbot Assistant";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackagesArgs {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingArgs {
    pub package_name: String,
    pub date: String,
    pub time: String,
    pub name: String,
    pub email: String,
}

/// A validated tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    GetPackages(PackagesArgs),
    CreateBooking(BookingArgs),
}

impl ToolRequest {
    /// Decode the model's call; unknown names and bad arguments are malformed
    pub fn parse(call: &ToolCall) -> Result<Self, AssistantError> {
        let args = if call.args.is_null() { json!({}) } else { call.args.clone() };
        match call.name.as_str() {
            GET_STUDIO_PACKAGES => serde_json::from_value(args)
                .map(Self::GetPackages)
                .map_err(|e| AssistantError::Malformed(format!("{}: {}", call.name, e))),
            CREATE_STUDIO_BOOKING => serde_json::from_value(args)
                .map(Self::CreateBooking)
                .map_err(|e| AssistantError::Malformed(format!("{}: {}", call.name, e))),
            other => Err(AssistantError::Malformed(format!("unknown tool '{}'", other))),
        }
    }
}

/// A booking the model asked for, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub record: BookingRecord,
    pub confirmation: String,
}

/// `{ "result": { "packages": [...] } }`
pub fn get_studio_packages(catalog: &Catalog, args: &PackagesArgs) -> Value {
    let packages = catalog.by_category(args.category.as_deref());
    json!({ "result": { "packages": packages } })
}

/// Resolve the package by title and build a pending booking.
/// Err carries the message returned to the model.
pub fn create_studio_booking(
    catalog: &Catalog,
    args: &BookingArgs,
    now: DateTime<Utc>,
) -> Result<BookingDraft, String> {
    let package = catalog
        .find_by_title(&args.package_name)
        .ok_or_else(|| format!("Package '{}' not found.", args.package_name))?;

    let record = BookingRecord {
        id: now.timestamp_millis(),
        submitted_at: now,
        status: BookingStatus::Pending,
        package_id: package.id,
        addon_ids: Vec::new(),
        date: args.date.clone(),
        time: args.time.clone(),
        name: args.name.clone(),
        email: args.email.clone(),
        project_details: CHAT_BOOKING_DETAILS.to_string(),
        package_title: package.title.clone(),
        package_price: package.price_display.clone(),
    };
    let confirmation = format!(
        "Booking request for {} on {} at {} submitted for {}. A confirmation email was sent.",
        args.package_name, args.date, args.time, args.name
    );

    Ok(BookingDraft {
        record,
        confirmation,
    })
}

/// Function-calling result payload sent back to the model
pub fn booking_response(outcome: &Result<String, String>) -> Value {
    match outcome {
        Ok(confirmation) => json!({ "result": { "success": true, "confirmation": confirmation } }),
        Err(error) => json!({ "result": { "success": false, "error": error } }),
    }
}

/// Declarations for both tools, in the model's function-calling schema
pub fn function_declarations() -> Value {
    json!([
        {
            "name": GET_STUDIO_PACKAGES,
            "description": "Retrieves a list of available studio packages, optionally filtered by category.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "category": {
                        "type": "STRING",
                        "description": "The category to filter by, e.g., \"Recording & Tracking\", \"Production & Mixing\"."
                    }
                },
                "required": []
            }
        },
        {
            "name": CREATE_STUDIO_BOOKING,
            "description": "Creates a new booking request for a studio session.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "packageName": { "type": "STRING", "description": "The exact name of the package to book." },
                    "date": { "type": "STRING", "description": "The desired date for the booking in YYYY-MM-DD format." },
                    "time": { "type": "STRING", "description": "The desired time for the booking in 24-hour HH:MM format." },
                    "name": { "type": "STRING", "description": "The full name of the person booking." },
                    "email": { "type": "STRING", "description": "The email address of the person booking." }
                },
                "required": ["packageName", "date", "time", "name", "email"]
            }
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(package: &str) -> BookingArgs {
        BookingArgs {
            package_name: package.into(),
            date: "2025-06-01".into(),
            time: "14:00".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn test_parse_known_tools() {
        let call = ToolCall {
            name: GET_STUDIO_PACKAGES.into(),
            args: Value::Null,
        };
        assert_eq!(
            ToolRequest::parse(&call).unwrap(),
            ToolRequest::GetPackages(PackagesArgs::default())
        );

        let call = ToolCall {
            name: CREATE_STUDIO_BOOKING.into(),
            args: json!({
                "packageName": "Drum Tracking", "date": "2025-06-01",
                "time": "14:00", "name": "Ada", "email": "ada@example.com"
            }),
        };
        assert_eq!(
            ToolRequest::parse(&call).unwrap(),
            ToolRequest::CreateBooking(args("Drum Tracking"))
        );
    }

    #[test]
    fn test_parse_rejects_missing_args_and_unknown_tools() {
        let call = ToolCall {
            name: CREATE_STUDIO_BOOKING.into(),
            args: json!({ "packageName": "Drum Tracking" }),
        };
        assert!(matches!(ToolRequest::parse(&call), Err(AssistantError::Malformed(_))));

        let call = ToolCall {
            name: "deleteEverything".into(),
            args: json!({}),
        };
        assert!(matches!(ToolRequest::parse(&call), Err(AssistantError::Malformed(_))));
    }

    #[test]
    fn test_get_packages_filters_by_category() {
        let catalog = Catalog::studio();
        let all = get_studio_packages(catalog, &PackagesArgs::default());
        assert_eq!(all["result"]["packages"].as_array().unwrap().len(), 18);

        let addons = get_studio_packages(
            catalog,
            &PackagesArgs {
                category: Some("engineer add-ons".into()),
            },
        );
        let titles: Vec<_> = addons["result"]["packages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles.len(), 4);
        assert!(titles.contains(&"Session Musician".to_string()));
    }

    #[test]
    fn test_create_booking_by_title() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap();
        let draft = create_studio_booking(Catalog::studio(), &args("drum tracking"), now).unwrap();
        assert_eq!(draft.record.package_id, 3);
        assert_eq!(draft.record.package_title, "Drum Tracking");
        assert_eq!(draft.record.project_details, CHAT_BOOKING_DETAILS);
        assert_eq!(draft.record.status, BookingStatus::Pending);
        assert_eq!(
            draft.confirmation,
            "Booking request for drum tracking on 2025-06-01 at 14:00 submitted for Ada. \
             A confirmation email was sent."
        );
    }

    #[test]
    fn test_create_booking_unknown_package() {
        let err = create_studio_booking(Catalog::studio(), &args("Karaoke Night"), Utc::now()).unwrap_err();
        assert_eq!(err, "Package 'Karaoke Night' not found.");
        assert_eq!(booking_response(&Err(err))["result"]["success"], false);
    }
}
