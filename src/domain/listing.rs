// src/domain/listing.rs

use crate::scraper::models::RawListing;
use crate::scraper::ScraperError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// A listing flattened into one table row, tagged with the location whose
/// search produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub address: String,
    pub bedrooms: u32,
    pub distance: f64,
    pub photo_count: u32,
    pub property_type: String,
    pub price: u64,
    pub update_date: DateTime<Utc>,
    pub update_date_str: String,
    pub latitude: f64,
    pub longitude: f64,
    pub floorplan_count: u32,
    pub sort_date: DateTime<Utc>,
    pub sort_date_str: String,
    pub identifier: u64,
    pub premium_display: bool,
    pub auto_email_reason_type: Option<String>,
    pub price_qualifier: Option<String>,
    pub scrape_date: DateTime<Utc>,
    pub days_since_post: i64,
    pub searched_location: String,
}

impl Listing {
    /// Parses and flattens one untyped listing from a search envelope.
    pub fn normalize(
        raw: &Value,
        searched_location: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<Self, ScraperError> {
        let raw: RawListing = serde_json::from_value(raw.clone())
            .map_err(|e| ScraperError::MalformedListing(e.to_string()))?;
        Self::from_raw_listing(&raw, searched_location, scraped_at)
    }

    pub fn from_raw_listing(
        raw: &RawListing,
        searched_location: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<Self, ScraperError> {
        let update_date = from_epoch_millis(raw.update_date, "updateDate")?;
        let sort_date = from_epoch_millis(raw.sort_date, "sortDate")?;

        Ok(Listing {
            address: raw.address.clone(),
            bedrooms: raw.bedrooms,
            distance: raw.distance,
            photo_count: raw.photo_count,
            property_type: raw.property_type.clone(),
            price: raw.price,
            update_date_str: update_date.format(DISPLAY_DATE_FORMAT).to_string(),
            update_date,
            latitude: raw.latitude,
            longitude: raw.longitude,
            floorplan_count: raw.floorplan_count,
            sort_date_str: sort_date.format(DISPLAY_DATE_FORMAT).to_string(),
            sort_date,
            identifier: raw.identifier,
            premium_display: raw.premium_display,
            auto_email_reason_type: raw.auto_email_reason_type.clone(),
            price_qualifier: raw.price_qualifier.clone(),
            scrape_date: scraped_at,
            days_since_post: days_between(sort_date, scraped_at),
            searched_location: searched_location.to_string(),
        })
    }
}

fn from_epoch_millis(millis: i64, field: &str) -> Result<DateTime<Utc>, ScraperError> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        ScraperError::MalformedListing(format!("{field} out of range: {millis}"))
    })
}

/// Whole days from `from` to `to`, truncated toward zero.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw_listing(sort_date: i64) -> Value {
        json!({
            "address": "Clarence Road, St Albans",
            "bedrooms": 3,
            "distance": 0.7,
            "photoCount": 18,
            "propertyType": "Semi-Detached",
            "price": 475000,
            "updateDate": 1_600_300_000_000_i64,
            "latitude": 51.7547,
            "longitude": -0.3284,
            "floorplanCount": 1,
            "sortDate": sort_date,
            "identifier": 91_234_567,
            "premiumDisplay": true,
            "autoEmailReasonType": "new",
            "priceQualifier": null
        })
    }

    #[test]
    fn normalizes_fields_and_display_dates() {
        let scraped_at = Utc.with_ymd_and_hms(2020, 9, 20, 12, 0, 0).unwrap();
        let listing = Listing::normalize(
            &raw_listing(1_600_000_000_000),
            "St Albans Station",
            scraped_at,
        )
        .unwrap();

        assert_eq!(listing.identifier, 91_234_567);
        assert_eq!(listing.price, 475_000);
        assert_eq!(listing.sort_date_str, "2020-09-13");
        assert_eq!(listing.update_date_str, "2020-09-16");
        assert_eq!(listing.auto_email_reason_type.as_deref(), Some("new"));
        assert_eq!(listing.price_qualifier, None);
        assert_eq!(listing.scrape_date, scraped_at);
        assert_eq!(listing.searched_location, "St Albans Station");
    }

    #[test]
    fn days_since_post_is_whole_days() {
        let sort_ms = 1_600_000_000_000_i64;
        let scraped_at = DateTime::<Utc>::from_timestamp_millis(sort_ms + 259_200_000).unwrap();

        let listing = Listing::normalize(&raw_listing(sort_ms), "Lee Station", scraped_at).unwrap();
        assert_eq!(listing.days_since_post, 3);

        // one millisecond short of three days truncates to two
        let scraped_at = DateTime::<Utc>::from_timestamp_millis(sort_ms + 259_199_999).unwrap();
        let listing = Listing::normalize(&raw_listing(sort_ms), "Lee Station", scraped_at).unwrap();
        assert_eq!(listing.days_since_post, 2);
    }

    #[test]
    fn missing_field_is_malformed() {
        let mut raw = raw_listing(1_600_000_000_000);
        raw.as_object_mut().unwrap().remove("price");

        let err = Listing::normalize(&raw, "Lee Station", Utc::now()).unwrap_err();
        assert!(matches!(err, ScraperError::MalformedListing(_)));
    }

    #[test]
    fn out_of_range_timestamp_is_malformed() {
        let raw = raw_listing(i64::MAX);
        let err = Listing::normalize(&raw, "Lee Station", Utc::now()).unwrap_err();
        assert!(matches!(err, ScraperError::MalformedListing(msg) if msg.contains("sortDate")));
    }
}
