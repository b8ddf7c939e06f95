// scraper.rs
use crate::config::ScraperConfig;
use crate::domain::listing::Listing;
use crate::domain::search::{OverrideReport, SearchSpec};
use crate::domain::table::ListingTable;
use crate::errors::SearchError;
use crate::scraper::models::SearchEnvelope;
use crate::scraper::transport::{HttpTransport, Transport};
use crate::scraper::ScraperError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Runs one search specification page by page and owns the table the
/// results accumulate in.
pub struct SearchRunner<T: Transport = HttpTransport> {
    transport: T,
    config: ScraperConfig,
    spec: SearchSpec,
    table: ListingTable,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The probe request failed; nothing was fetched.
    ProbeFailed(ScraperError),
    /// The probe succeeded but reported no results.
    NoResults,
    Completed(RunSummary),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub pages_planned: u64,
    pub pages_fetched: u64,
    pub skipped_pages: Vec<SkippedPage>,
    pub listings_added: usize,
    pub listings_rejected: usize,
    pub duplicates_removed: usize,
    pub table_len: usize,
}

#[derive(Debug)]
pub struct SkippedPage {
    pub page: u64,
    pub error: ScraperError,
}

#[derive(Debug, Default)]
struct PageListings {
    listings: Vec<Listing>,
    rejected: usize,
}

impl SearchRunner<HttpTransport> {
    pub fn new(config: ScraperConfig, spec: SearchSpec) -> Result<Self, ScraperError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, spec, transport))
    }
}

impl<T: Transport> SearchRunner<T> {
    pub fn with_transport(config: ScraperConfig, spec: SearchSpec, transport: T) -> Self {
        Self {
            transport,
            config,
            spec,
            table: ListingTable::new(),
        }
    }

    pub fn spec(&self) -> &SearchSpec {
        &self.spec
    }

    pub fn spec_mut(&mut self) -> &mut SearchSpec {
        &mut self.spec
    }

    pub fn table(&self) -> &ListingTable {
        &self.table
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Applies `overrides` to the specification, then runs it.
    pub fn search(&mut self, overrides: &Value) -> Result<(OverrideReport, RunOutcome), SearchError> {
        let report = self.spec.apply_overrides(overrides)?;
        Ok((report, self.run()))
    }

    /// Total results the API reports for the current specification.
    /// A non-success envelope counts as zero; a success envelope without a
    /// total is an error.
    pub fn probe_total_count(&mut self) -> Result<u64, ScraperError> {
        self.spec.reset_paging();

        let envelope = self.fetch_envelope()?;
        if !envelope.is_success() {
            debug!(result = %envelope.result, "probe not successful, treating as empty");
            return Ok(0);
        }

        let total = envelope.total()?;
        info!(
            total,
            location = envelope.location_name().unwrap_or_default(),
            "probe complete"
        );
        Ok(total)
    }

    /// Pages needed for the current specification, or `None` when the probe
    /// failed.
    pub fn required_page_count(&mut self) -> Option<u64> {
        match self.probe_page_count() {
            Ok(pages) => Some(pages),
            Err(e) => {
                warn!(error = %e, "probe failed");
                None
            }
        }
    }

    fn probe_page_count(&mut self) -> Result<u64, ScraperError> {
        let total = self.probe_total_count()?;
        let pages = self.config.pages_for(total);
        debug!(
            total,
            pages,
            results_per_page = self.config.results_per_page,
            "pages needed"
        );
        Ok(pages)
    }

    /// Fetches every page of the current specification into the table.
    ///
    /// No page failure stops the run. Afterwards the paging index is back to
    /// zero and the table holds no duplicate rows.
    pub fn run(&mut self) -> RunOutcome {
        let required = match self.probe_page_count() {
            Ok(0) => {
                info!("no results, nothing to fetch");
                return RunOutcome::NoResults;
            }
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "probe failed, skipping run");
                return RunOutcome::ProbeFailed(e);
            }
        };

        let planned = self.config.capped_pages(required);
        if planned < required {
            info!(required, max_pages = self.config.max_pages, "capping page count");
        }

        // One timestamp per run so overlapping pages produce identical rows.
        let scraped_at = Utc::now();
        let mut summary = RunSummary {
            pages_planned: planned,
            ..RunSummary::default()
        };

        for page in 0..planned {
            self.spec.index = self.page_index(page);
            debug!(page = page + 1, of = planned, index = self.spec.index, "fetching page");

            match self.fetch_listings(scraped_at) {
                Ok(PageListings { listings, rejected }) => {
                    debug!(page = page + 1, listings = listings.len(), rejected, "page parsed");
                    summary.pages_fetched += 1;
                    summary.listings_added += listings.len();
                    summary.listings_rejected += rejected;
                    self.table.append_batch(listings);
                }
                Err(error) => {
                    warn!(page = page + 1, error = %error, "skipping page");
                    summary.skipped_pages.push(SkippedPage { page, error });
                }
            }
        }

        self.spec.reset_paging();
        summary.duplicates_removed = self.table.dedup();
        summary.table_len = self.table.len();

        info!(
            pages = summary.pages_fetched,
            skipped = summary.skipped_pages.len(),
            added = summary.listings_added,
            duplicates = summary.duplicates_removed,
            rows = summary.table_len,
            "search complete"
        );

        RunOutcome::Completed(summary)
    }

    fn page_index(&self, page: u64) -> u32 {
        let index = u64::from(self.config.results_per_page).saturating_mul(page);
        u32::try_from(index).unwrap_or(u32::MAX)
    }

    fn fetch_envelope(&self) -> Result<SearchEnvelope, ScraperError> {
        let body = self
            .transport
            .get(&self.config.base_url, &self.spec.snapshot())?;
        serde_json::from_str(&body).map_err(|e| ScraperError::JsonParse(e.to_string()))
    }

    fn fetch_listings(&self, scraped_at: DateTime<Utc>) -> Result<PageListings, ScraperError> {
        let envelope = self.fetch_envelope()?;
        if !envelope.is_success() {
            return Err(ScraperError::Unsuccessful(envelope.result));
        }

        let mut page = PageListings::default();
        if envelope.total()? == 0 {
            return Ok(page);
        }

        // every row is tagged with it, so a page without one is unusable
        let location = envelope.location_name()?;
        for raw in &envelope.properties {
            match Listing::normalize(raw, location, scraped_at) {
                Ok(listing) => page.listings.push(listing),
                Err(e) => {
                    warn!(error = %e, "skipping listing");
                    page.rejected += 1;
                }
            }
        }

        Ok(page)
    }
}
