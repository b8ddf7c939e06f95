// src/domain/search.rs

use crate::config::RESULTS_PER_PAGE;
use crate::domain::location::{LocationRegistry, DEFAULT_LOCATION};
use crate::errors::SearchError;
use serde_json::Value;
use tracing::warn;

/// Query parameter names, verbatim as the API expects them.
pub const SEARCH_KEYS: [&str; 12] = [
    "index",
    "sortType",
    "numberOfPropertiesRequested",
    "locationIdentifier",
    "minBedrooms",
    "maxBedrooms",
    "propertyTypes",
    "primaryDisplayPropertyType",
    "minPrice",
    "maxPrice",
    "radius",
    "apiApplication",
];

/// One property search. The key set is closed; callers change it through
/// `apply_overrides` or the public fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpec {
    pub index: u32,
    pub sort_type: u32,
    pub number_of_properties_requested: u32,
    pub location_identifier: String,
    pub min_bedrooms: u32,
    pub max_bedrooms: u32,
    pub property_types: String,
    pub primary_display_property_type: String,
    pub min_price: u64,
    pub max_price: u64,
    pub radius: f64,
    pub api_application: String,
}

impl Default for SearchSpec {
    fn default() -> Self {
        let location = LocationRegistry::builtin()
            .resolve(DEFAULT_LOCATION)
            .unwrap_or_default();

        Self {
            index: 0,
            sort_type: 1,
            number_of_properties_requested: RESULTS_PER_PAGE,
            location_identifier: location.to_string(),
            min_bedrooms: 3,
            max_bedrooms: 3,
            property_types: "detached".to_string(),
            primary_display_property_type: "houses".to_string(),
            min_price: 400_000,
            max_price: 500_000,
            radius: 2.0,
            api_application: "IPAD".to_string(),
        }
    }
}

/// Which override keys were taken and which were not understood.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OverrideReport {
    pub applied: Vec<String>,
    pub rejected: Vec<String>,
}

impl SearchSpec {
    /// Applies a JSON object of overrides, all or nothing.
    ///
    /// `locationIdentifier` takes a location *name*, which is resolved through
    /// the registry before it is stored. Keys outside [`SEARCH_KEYS`] are
    /// logged and listed in the report but never stored. Any error leaves
    /// `self` exactly as it was.
    pub fn apply_overrides(&mut self, overrides: &Value) -> Result<OverrideReport, SearchError> {
        self.apply_overrides_with(LocationRegistry::builtin(), overrides)
    }

    pub fn apply_overrides_with(
        &mut self,
        registry: &LocationRegistry,
        overrides: &Value,
    ) -> Result<OverrideReport, SearchError> {
        let map = overrides.as_object().ok_or_else(|| {
            SearchError::InvalidSpecification(format!(
                "overrides must be an object, got {}",
                json_kind(overrides)
            ))
        })?;

        let mut next = self.clone();
        let mut report = OverrideReport::default();

        for (key, value) in map {
            match key.as_str() {
                "index" => next.index = as_u32(key, value)?,
                "sortType" => next.sort_type = as_u32(key, value)?,
                "numberOfPropertiesRequested" => {
                    next.number_of_properties_requested = as_u32(key, value)?
                }
                "locationIdentifier" => {
                    let name = as_str(key, value)?;
                    next.location_identifier = registry.resolve(name)?.to_string();
                }
                "minBedrooms" => next.min_bedrooms = as_u32(key, value)?,
                "maxBedrooms" => next.max_bedrooms = as_u32(key, value)?,
                "propertyTypes" => next.property_types = as_str(key, value)?.to_string(),
                "primaryDisplayPropertyType" => {
                    next.primary_display_property_type = as_str(key, value)?.to_string()
                }
                "minPrice" => next.min_price = as_u64(key, value)?,
                "maxPrice" => next.max_price = as_u64(key, value)?,
                "radius" => next.radius = as_f64(key, value)?,
                "apiApplication" => next.api_application = as_str(key, value)?.to_string(),
                _ => {
                    warn!(key = %key, "search parameter not understood, skipping");
                    report.rejected.push(key.clone());
                    continue;
                }
            }
            report.applied.push(key.clone());
        }

        *self = next;
        Ok(report)
    }

    pub fn reset_paging(&mut self) {
        self.index = 0;
    }

    /// Current parameters as (API name, value) pairs, in [`SEARCH_KEYS`] order.
    pub fn snapshot(&self) -> Vec<(&'static str, String)> {
        vec![
            ("index", self.index.to_string()),
            ("sortType", self.sort_type.to_string()),
            (
                "numberOfPropertiesRequested",
                self.number_of_properties_requested.to_string(),
            ),
            ("locationIdentifier", self.location_identifier.clone()),
            ("minBedrooms", self.min_bedrooms.to_string()),
            ("maxBedrooms", self.max_bedrooms.to_string()),
            ("propertyTypes", self.property_types.clone()),
            (
                "primaryDisplayPropertyType",
                self.primary_display_property_type.clone(),
            ),
            ("minPrice", self.min_price.to_string()),
            ("maxPrice", self.max_price.to_string()),
            // Debug keeps the trailing ".0" on whole radii
            ("radius", format!("{:?}", self.radius)),
            ("apiApplication", self.api_application.clone()),
        ]
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn type_error(key: &str, expected: &str, value: &Value) -> SearchError {
    SearchError::InvalidSpecification(format!(
        "{key} must be {expected}, got {}",
        json_kind(value)
    ))
}

fn as_u64(key: &str, value: &Value) -> Result<u64, SearchError> {
    value
        .as_u64()
        .ok_or_else(|| type_error(key, "a non-negative integer", value))
}

fn as_u32(key: &str, value: &Value) -> Result<u32, SearchError> {
    as_u64(key, value).and_then(|n| {
        u32::try_from(n).map_err(|_| {
            SearchError::InvalidSpecification(format!("{key} is out of range: {n}"))
        })
    })
}

fn as_f64(key: &str, value: &Value) -> Result<f64, SearchError> {
    value
        .as_f64()
        .ok_or_else(|| type_error(key, "a number", value))
}

fn as_str<'a>(key: &str, value: &'a Value) -> Result<&'a str, SearchError> {
    value
        .as_str()
        .ok_or_else(|| type_error(key, "a string", value))
}
