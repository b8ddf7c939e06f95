// src/domain/location.rs

use crate::errors::SearchError;
use std::collections::BTreeMap;

/// Stations the search is run around, keyed by the name a caller passes in.
/// Identifiers are stored decoded; the query encoder escapes the `^`.
const LOCATIONS: &[(&str, &str)] = &[
    ("st albans station", "STATION^8573"),
    ("richmond station", "STATION^7703"),
    ("west dulwich station", "STATION^9827"),
    ("stevenage station", "STATION^8732"),
    ("welwyn north station", "STATION^9770"),
    ("welwyn garden city station", "STATION^9767"),
    ("sevenoaks station", "STATION^8081"),
    ("dunton green station", "STATION^3002"),
    ("cambridge station", "STATION^1703"),
    ("norbiton station", "STATION^6686"),
    ("crystal palace station", "STATION^2507"),
    ("thames ditton station", "STATION^9092"),
    ("harpenden station", "STATION^4262"),
    ("surbiton station", "STATION^8912"),
    ("hitchin station", "STATION^4646"),
    ("mottingham station", "STATION^6425"),
    ("chislehurst station", "STATION^2078"),
    ("sidcup station", "STATION^8252"),
    ("new eltham station", "STATION^6551"),
    ("lee station", "STATION^5459"),
];

pub const DEFAULT_LOCATION: &str = "st albans station";

#[derive(Debug, Clone)]
pub struct LocationRegistry {
    entries: BTreeMap<&'static str, &'static str>,
}

impl LocationRegistry {
    /// The built-in station table.
    pub fn builtin() -> &'static LocationRegistry {
        static REGISTRY: std::sync::OnceLock<LocationRegistry> = std::sync::OnceLock::new();
        REGISTRY.get_or_init(|| LocationRegistry {
            entries: LOCATIONS.iter().copied().collect(),
        })
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Result<&'static str, SearchError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| SearchError::UnknownLocation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// (name, identifier) pairs in alphabetical order of name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(name, id)| (*name, *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
