use crate::domain::table::ListingTable;
use std::fmt;

pub const PRICE_BIN_WIDTH: i64 = 25_000;
pub const DAYS_BIN_WIDTH: i64 = 10;

/// Most buckets a histogram will hold.
pub const MAX_BUCKETS: i128 = 1_000;

const BAR_WIDTH: usize = 40;

/// `[lower, upper)`, except the last bucket of a histogram which also takes
/// values equal to its `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower: i64,
    pub upper: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub bin_width: i64,
    pub buckets: Vec<Bucket>,
    /// Values that fell outside the bucketed range.
    pub skipped: usize,
}

impl Histogram {
    /// Buckets `values` from `start` up to and including `end`.
    ///
    /// The bucket count is capped at [`MAX_BUCKETS`]; a wider range widens the
    /// buckets instead.
    pub fn build(
        title: impl Into<String>,
        values: impl IntoIterator<Item = i64>,
        start: i64,
        end: i64,
        bin_width: i64,
    ) -> Self {
        let mut hist = Histogram {
            title: title.into(),
            bin_width: bin_width.max(1),
            buckets: Vec::new(),
            skipped: 0,
        };

        let values: Vec<i64> = values.into_iter().collect();
        if end < start {
            hist.skipped = values.len();
            return hist;
        }

        // i128 so the span and bucket edges can't overflow near i64::MAX
        let span = i128::from(end) - i128::from(start);
        let mut width = i128::from(hist.bin_width);
        let mut n = ceil_div(span, width).max(1);
        if n > MAX_BUCKETS {
            width = ceil_div(span, MAX_BUCKETS);
            n = ceil_div(span, width).max(1);
        }
        hist.bin_width = clamp_i64(width);

        let edge = |i: i128| clamp_i64(i128::from(start) + i * width);
        hist.buckets = (0..n)
            .map(|i| Bucket {
                lower: edge(i),
                upper: edge(i + 1),
                count: 0,
            })
            .collect();

        for v in values {
            if v < start || v > end {
                hist.skipped += 1;
                continue;
            }
            let i = ((i128::from(v) - i128::from(start)) / width).min(n - 1) as usize;
            hist.buckets[i].count += 1;
        }

        hist
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Listings by price, 25k buckets over the observed price range.
pub fn price_histogram(table: &ListingTable, title_suffix: Option<&str>) -> Histogram {
    let title = match title_suffix {
        Some(suffix) => format!("Houses by price {suffix}"),
        None => "Houses by price".to_string(),
    };

    let Some((min, max)) = table.price_range() else {
        return Histogram::build(title, std::iter::empty(), 0, -1, PRICE_BIN_WIDTH);
    };

    let prices = table.rows().iter().map(|r| to_i64(r.price));
    Histogram::build(title, prices, to_i64(min), to_i64(max), PRICE_BIN_WIDTH)
}

/// Listings by days since posting, 10-day buckets from zero.
pub fn days_posted_histogram(table: &ListingTable) -> Histogram {
    let title = "Houses by days since post";
    let Some(max) = table.max_days_since_post() else {
        return Histogram::build(title, std::iter::empty(), 0, -1, DAYS_BIN_WIDTH);
    };

    let days = table.rows().iter().map(|r| r.days_since_post);
    Histogram::build(title, days, 0, max, DAYS_BIN_WIDTH)
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn clamp_i64(n: i128) -> i64 {
    i64::try_from(n).unwrap_or(if n < 0 { i64::MIN } else { i64::MAX })
}

fn ceil_div(a: i128, b: i128) -> i128 {
    (a + b - 1) / b
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.buckets.is_empty() {
            return writeln!(f, "  (no data)");
        }

        let peak = self.buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let label_width = self
            .buckets
            .iter()
            .map(|b| b.upper.to_string().len())
            .max()
            .unwrap_or(1);

        for b in &self.buckets {
            let bar = "#".repeat(b.count * BAR_WIDTH / peak);
            writeln!(
                f,
                "  {:>w$} - {:>w$} | {bar} {}",
                b.lower,
                b.upper,
                b.count,
                w = label_width
            )?;
        }

        if self.skipped > 0 {
            writeln!(f, "  ({} outside range)", self.skipped)?;
        }
        Ok(())
    }
}
