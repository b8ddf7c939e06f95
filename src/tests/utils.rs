use crate::domain::listing::Listing;
use crate::scraper::{ScraperError, Transport};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

pub const LOCATION_NAME: &str = "St Albans Station";

/// Fixed scrape time used by fixtures built directly as `Listing`s.
pub fn scrape_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 10, 1, 9, 0, 0).unwrap()
}

/// A well-formed API listing; every field derives from `id`, so equal ids
/// give equal listings.
pub fn raw_listing(id: u64) -> Value {
    let posted = scrape_time().timestamp_millis() - (id as i64) * 86_400_000;
    json!({
        "address": format!("{id} Example Road, St Albans"),
        "bedrooms": 3,
        "distance": 0.1 * id as f64,
        "photoCount": 10,
        "propertyType": "Detached",
        "price": 400_000 + id * 1_000,
        "updateDate": posted,
        "latitude": 51.75,
        "longitude": -0.33,
        "floorplanCount": 1,
        "sortDate": posted,
        "identifier": id,
        "premiumDisplay": false,
        "autoEmailReasonType": null,
        "priceQualifier": "Offers in Region of"
    })
}

pub fn listing(id: u64) -> Listing {
    Listing::normalize(&raw_listing(id), LOCATION_NAME, scrape_time()).unwrap()
}

pub fn envelope(total: u64, listings: Vec<Value>) -> String {
    json!({
        "result": "SUCCESS",
        "totalAvailableResults": total,
        "searchableLocation": { "name": LOCATION_NAME },
        "properties": listings
    })
    .to_string()
}

/// Scripted API: answers by the `index` query parameter and records every
/// index it was asked for.
#[derive(Default)]
pub struct MockTransport {
    pages: HashMap<u32, Result<String, String>>,
    probe: Option<Result<String, String>>,
    calls: RefCell<Vec<u32>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body returned for `index`; also used for the probe when index is 0
    /// and no separate probe body was set.
    pub fn page(mut self, index: u32, body: String) -> Self {
        self.pages.insert(index, Ok(body));
        self
    }

    pub fn failing_page(mut self, index: u32, message: &str) -> Self {
        self.pages.insert(index, Err(message.to_string()));
        self
    }

    /// The first request of a run gets this instead of the index-0 page.
    pub fn probe(mut self, body: String) -> Self {
        self.probe = Some(Ok(body));
        self
    }

    pub fn failing_probe(mut self, message: &str) -> Self {
        self.probe = Some(Err(message.to_string()));
        self
    }

    pub fn requested_indexes(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, _url: &Url, query: &[(&'static str, String)]) -> Result<String, ScraperError> {
        let index = query
            .iter()
            .find(|(k, _)| *k == "index")
            .and_then(|(_, v)| v.parse::<u32>().ok())
            .unwrap_or_default();

        let first_call = self.calls.borrow().is_empty();
        self.calls.borrow_mut().push(index);

        let answer = match (&self.probe, first_call) {
            (Some(probe), true) => probe.clone(),
            _ => self
                .pages
                .get(&index)
                .cloned()
                .unwrap_or_else(|| Err(format!("no page scripted for index {index}"))),
        };

        answer.map_err(ScraperError::Network)
    }
}
