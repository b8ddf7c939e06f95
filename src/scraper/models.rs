use crate::scraper::ScraperError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// envelope
//  ├── result                  "SUCCESS" | ...
//  ├── totalAvailableResults
//  ├── searchableLocation
//  │    └── name
//  └── properties[]            raw listings, see RawListing

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    pub result: String,
    // Failure envelopes may omit it; a success envelope must carry it.
    pub total_available_results: Option<u64>,
    pub searchable_location: Option<SearchableLocation>,

    // Kept untyped so one bad listing doesn't sink the whole page.
    #[serde(default)]
    pub properties: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchableLocation {
    pub name: String,
}

impl SearchEnvelope {
    pub const SUCCESS: &'static str = "SUCCESS";

    pub fn is_success(&self) -> bool {
        self.result == Self::SUCCESS
    }

    pub fn total(&self) -> Result<u64, ScraperError> {
        self.total_available_results.ok_or_else(|| {
            ScraperError::UnexpectedShape("totalAvailableResults missing".to_string())
        })
    }

    pub fn location_name(&self) -> Result<&str, ScraperError> {
        self.searchable_location
            .as_ref()
            .map(|l| l.name.as_str())
            .ok_or_else(|| ScraperError::UnexpectedShape("searchableLocation missing".to_string()))
    }
}

/// One property as the API returns it. Every field is required; the
/// nullable ones must still be present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub address: String,
    pub bedrooms: u32,
    pub distance: f64,
    pub photo_count: u32,
    pub property_type: String,
    pub price: u64,
    pub update_date: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub floorplan_count: u32,
    pub sort_date: i64,
    pub identifier: u64,
    pub premium_display: bool,
    #[serde(deserialize_with = "present_or_null")]
    pub auto_email_reason_type: Option<String>,
    #[serde(deserialize_with = "present_or_null")]
    pub price_qualifier: Option<String>,
}

// With `deserialize_with` serde no longer defaults a missing Option to None,
// so the key has to be there even when its value is null.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_properties_parses() {
        let env: SearchEnvelope = serde_json::from_value(json!({
            "result": "SUCCESS",
            "totalAvailableResults": 0,
            "searchableLocation": { "name": "Lee Station" }
        }))
        .unwrap();

        assert!(env.is_success());
        assert_eq!(env.total().unwrap(), 0);
        assert_eq!(env.location_name().unwrap(), "Lee Station");
        assert!(env.properties.is_empty());
    }

    #[test]
    fn failure_envelope_is_not_success() {
        let env: SearchEnvelope = serde_json::from_value(json!({ "result": "FAILURE" })).unwrap();
        assert!(!env.is_success());
        assert!(matches!(env.total(), Err(ScraperError::UnexpectedShape(_))));
        assert!(matches!(env.location_name(), Err(ScraperError::UnexpectedShape(_))));
    }

    #[test]
    fn nullable_fields_must_be_present() {
        let mut raw = json!({
            "address": "High Street, St Albans",
            "bedrooms": 3,
            "distance": 0.4,
            "photoCount": 12,
            "propertyType": "Detached",
            "price": 450000,
            "updateDate": 1_600_000_000_000_i64,
            "latitude": 51.75,
            "longitude": -0.33,
            "floorplanCount": 1,
            "sortDate": 1_600_000_000_000_i64,
            "identifier": 123,
            "premiumDisplay": false,
            "autoEmailReasonType": null,
            "priceQualifier": "Guide Price"
        });

        let listing: RawListing = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(listing.auto_email_reason_type, None);
        assert_eq!(listing.price_qualifier.as_deref(), Some("Guide Price"));

        raw.as_object_mut().unwrap().remove("autoEmailReasonType");
        assert!(serde_json::from_value::<RawListing>(raw).is_err());
    }
}
