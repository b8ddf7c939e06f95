use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "listing_scraper",
    version,
    about = "Collect property-for-sale listings around named stations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the known location names and their identifiers.
    Locations,
    /// Run a search for each location and report on the collected listings.
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Location name, repeatable. Rows from every location land in one table.
    #[arg(long = "location", required = true)]
    pub locations: Vec<String>,

    #[arg(long)]
    pub min_price: Option<u64>,

    #[arg(long)]
    pub max_price: Option<u64>,

    #[arg(long)]
    pub min_bedrooms: Option<u32>,

    #[arg(long)]
    pub max_bedrooms: Option<u32>,

    #[arg(long)]
    pub radius: Option<f64>,

    /// Raw search parameter, e.g. `--set sortType=6`. Values are read as JSON
    /// when they parse, otherwise as strings.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, Value)>,

    #[arg(long)]
    pub max_pages: Option<u32>,

    #[arg(long)]
    pub base_url: Option<Url>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Write an HTML report with both histograms and the listing table.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Print every collected row.
    #[arg(long, default_value_t = false)]
    pub show_rows: bool,
}

impl SearchArgs {
    /// Overrides shared by every location, as the JSON object the search
    /// specification takes.
    pub fn overrides(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (key, value) in &self.overrides {
            map.insert(key.clone(), value.clone());
        }

        let typed = [
            ("minPrice", self.min_price.map(Value::from)),
            ("maxPrice", self.max_price.map(Value::from)),
            ("minBedrooms", self.min_bedrooms.map(Value::from)),
            ("maxBedrooms", self.max_bedrooms.map(Value::from)),
            ("radius", self.radius.map(Value::from)),
        ];
        for (key, value) in typed {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }
        map
    }
}

fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
