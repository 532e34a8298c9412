//! Enum-keyed lookup tables shared by the dashboard pages.
//!
//! Each claim, engineer response and contemporaneous record type maps to one
//! immutable [`LookupEntry`]: its display title, the category it is grouped
//! under, the RC 128 article that governs it, and the form fields a
//! submission of that type must carry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Static metadata for one type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    pub code: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub statutory_article: &'static str,
    pub required_fields: &'static [&'static str],
}

impl LookupEntry {
    /// Required fields that are absent or blank in `fields`.
    pub fn missing_fields(&self, fields: &BTreeMap<String, String>) -> Vec<&'static str> {
        self.required_fields
            .iter()
            .copied()
            .filter(|name| {
                fields
                    .get(*name)
                    .is_none_or(|value| value.trim().is_empty())
            })
            .collect()
    }
}

/// A type-code enum backed by a static table.
pub trait LookupTable: Copy + Sized + 'static {
    /// Table name used in error messages and CLI output.
    const TABLE: &'static str;

    fn all() -> &'static [Self];

    fn entry(&self) -> &'static LookupEntry;

    fn parse_code(code: &str) -> Result<Self, ModelError> {
        let wanted = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|item| item.entry().code.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownCode {
                table: Self::TABLE,
                code: code.to_string(),
            })
    }

    fn by_category(category: &str) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|item| item.entry().category.eq_ignore_ascii_case(category))
            .collect()
    }

    fn missing_fields(&self, fields: &BTreeMap<String, String>) -> Vec<&'static str> {
        self.entry().missing_fields(fields)
    }
}

macro_rules! lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $table:literal, {
            $($variant:ident => $entry:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl LookupTable for $name {
            const TABLE: &'static str = $table;

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn entry(&self) -> &'static LookupEntry {
                match self {
                    $($name::$variant => {
                        const ENTRY: LookupEntry = $entry;
                        &ENTRY
                    })+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.entry().title)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_code(s)
            }
        }
    };
}

const fn entry(
    code: &'static str,
    title: &'static str,
    category: &'static str,
    statutory_article: &'static str,
    required_fields: &'static [&'static str],
) -> LookupEntry {
    LookupEntry {
        code,
        title,
        category,
        statutory_article,
        required_fields,
    }
}

lookup_enum! {
    /// Contractor claim types.
    ClaimType, "claim type", {
        ExtensionOfTime => entry(
            "extension_of_time",
            "Extension of Time",
            "time",
            "Article 43",
            &["title", "event_date", "notice_date", "days_claimed", "description"],
        ),
        Acceleration => entry(
            "acceleration",
            "Acceleration",
            "time",
            "Article 44",
            &["title", "instruction_ref", "days_recovered", "amount"],
        ),
        Suspension => entry(
            "suspension",
            "Suspension of Works",
            "time",
            "Article 45",
            &["title", "suspension_date", "instruction_ref", "description"],
        ),
        AdditionalPayment => entry(
            "additional_payment",
            "Additional Payment",
            "cost",
            "Article 61",
            &["title", "event_date", "notice_date", "amount", "description"],
        ),
        Disruption => entry(
            "disruption",
            "Disruption and Loss of Productivity",
            "cost",
            "Article 62",
            &["title", "event_date", "amount", "records_ref"],
        ),
        VariationValuation => entry(
            "variation_valuation",
            "Valuation of Variation",
            "cost",
            "Article 58",
            &["title", "variation_ref", "amount"],
        ),
        Termination => entry(
            "termination",
            "Termination",
            "contractual",
            "Article 79",
            &["title", "notice_date", "grounds", "description"],
        ),
    }
}

lookup_enum! {
    /// Engineer response types.
    ResponseType, "response type", {
        Acknowledgement => entry(
            "acknowledgement",
            "Acknowledgement of Notice",
            "procedural",
            "Article 46",
            &["claim_ref", "response_date"],
        ),
        RequestForParticulars => entry(
            "request_for_particulars",
            "Request for Further Particulars",
            "procedural",
            "Article 46",
            &["claim_ref", "response_date", "particulars_requested", "due_date"],
        ),
        Determination => entry(
            "determination",
            "Engineer's Determination",
            "decision",
            "Article 47",
            &["claim_ref", "response_date", "determination", "days_awarded", "amount_awarded"],
        ),
        Rejection => entry(
            "rejection",
            "Rejection",
            "decision",
            "Article 47",
            &["claim_ref", "response_date", "grounds"],
        ),
        Agreement => entry(
            "agreement",
            "Agreement",
            "decision",
            "Article 48",
            &["claim_ref", "response_date", "agreed_terms"],
        ),
    }
}

lookup_enum! {
    /// Contemporaneous record types.
    RecordType, "record type", {
        SiteDiary => entry(
            "site_diary",
            "Site Diary",
            "site",
            "Article 52",
            &["record_date", "weather", "activities"],
        ),
        LabourReturn => entry(
            "labour_return",
            "Labour Return",
            "resources",
            "Article 53",
            &["record_date", "trade", "headcount"],
        ),
        PlantReturn => entry(
            "plant_return",
            "Plant Return",
            "resources",
            "Article 53",
            &["record_date", "plant_item", "hours_working", "hours_idle"],
        ),
        ProgressPhotograph => entry(
            "progress_photograph",
            "Progress Photograph",
            "site",
            "Article 52",
            &["record_date", "location", "attachment"],
        ),
        Correspondence => entry(
            "correspondence",
            "Correspondence",
            "communication",
            "Article 54",
            &["record_date", "reference", "sender", "recipient"],
        ),
        MeetingMinutes => entry(
            "meeting_minutes",
            "Meeting Minutes",
            "communication",
            "Article 54",
            &["record_date", "attendees", "minutes"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_parse() {
        for claim in ClaimType::all() {
            assert_eq!(claim.entry().code.parse::<ClaimType>().unwrap(), *claim);
        }
        for response in ResponseType::all() {
            assert_eq!(
                response.entry().code.parse::<ResponseType>().unwrap(),
                *response
            );
        }
        for record in RecordType::all() {
            assert_eq!(record.entry().code.parse::<RecordType>().unwrap(), *record);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Extension_Of_Time".parse::<ClaimType>().unwrap(),
            ClaimType::ExtensionOfTime
        );
    }

    #[test]
    fn unknown_code_names_its_table() {
        let err = "nope".parse::<RecordType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown record type code: nope");
    }
}
