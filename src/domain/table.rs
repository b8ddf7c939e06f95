// src/domain/table.rs

use crate::domain::listing::Listing;

/// Rows accumulated across pages (and across searches) by one runner.
/// A row's index is its position; dedup keeps first occurrences in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListingTable {
    rows: Vec<Listing>,
}

impl ListingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Listing] {
        &self.rows
    }

    /// (index, row) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Listing)> {
        self.rows.iter().enumerate()
    }

    pub fn append_batch(&mut self, batch: Vec<Listing>) {
        self.rows.extend(batch);
    }

    /// Drops rows equal in every field to an earlier row. Returns how many
    /// were removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        let mut kept: Vec<Listing> = Vec::with_capacity(before);

        for row in self.rows.drain(..) {
            if !kept.contains(&row) {
                kept.push(row);
            }
        }

        self.rows = kept;
        before - self.rows.len()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn price_range(&self) -> Option<(u64, u64)> {
        let min = self.rows.iter().map(|r| r.price).min()?;
        let max = self.rows.iter().map(|r| r.price).max()?;
        Some((min, max))
    }

    pub fn max_days_since_post(&self) -> Option<i64> {
        self.rows.iter().map(|r| r.days_since_post).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{listing, scrape_time};

    #[test]
    fn append_keeps_every_distinct_listing() {
        let mut table = ListingTable::new();
        table.append_batch((1..=10).map(listing).collect());
        table.append_batch((11..=15).map(listing).collect());

        assert_eq!(table.len(), 15);
        assert_eq!(table.dedup(), 0);
        assert_eq!(table.len(), 15);
    }

    #[test]
    fn dedup_removes_full_duplicates_and_keeps_order() {
        let mut table = ListingTable::new();
        table.append_batch(vec![listing(1), listing(2), listing(3)]);
        table.append_batch(vec![listing(2), listing(4), listing(1)]);

        assert_eq!(table.dedup(), 2);

        let ids: Vec<_> = table.iter().map(|(i, r)| (i, r.identifier)).collect();
        assert_eq!(ids, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let mut table = ListingTable::new();
        table.append_batch(vec![listing(1), listing(1), listing(2), listing(2), listing(3)]);

        table.dedup();
        let once = table.clone();
        assert_eq!(table.dedup(), 0);
        assert_eq!(table, once);
    }

    #[test]
    fn rows_differing_in_one_field_are_kept() {
        let mut repriced = listing(7);
        repriced.price += 5_000;

        let mut table = ListingTable::new();
        table.append_batch(vec![listing(7), repriced]);

        assert_eq!(table.dedup(), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn signed_zero_distance_counts_as_equal() {
        let mut at_centre = listing(3);
        at_centre.distance = 0.0;
        let mut negative_zero = listing(3);
        negative_zero.distance = -0.0;

        let mut table = ListingTable::new();
        table.append_batch(vec![at_centre, negative_zero]);

        assert_eq!(table.dedup(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clear_and_ranges() {
        let mut table = ListingTable::new();
        assert_eq!(table.price_range(), None);
        assert_eq!(table.max_days_since_post(), None);

        table.append_batch((1..=4).map(listing).collect());
        let (min, max) = table.price_range().unwrap();
        assert!(min <= max);
        assert!(table.max_days_since_post().is_some());
        assert!(table.rows().iter().all(|r| r.scrape_date == scrape_time()));

        table.clear();
        assert!(table.is_empty());
    }
}
