//! Least-stock-first allocation.
//!
//! For each order line, in request order, locations of the line's item are
//! drained smallest first (ties by ascending id) until the line is covered.
//! Every line reads the unchanged snapshot; nothing is reserved between lines.
//! If any line cannot be covered the whole plan is dropped.

use std::collections::HashMap;

use wms_core::ItemId;
use wms_inventory::{InventoryLookup, LookupError, StockLevel};

use crate::error::AllocationError;
use crate::order::{OrderLine, Pick};

/// Point-in-time stock per item, captured once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockSnapshot {
    levels: HashMap<ItemId, Vec<StockLevel>>,
}

impl StockSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query `lookup` once per distinct item referenced by `lines`.
    pub fn capture<L>(lookup: &L, lines: &[OrderLine]) -> Result<Self, LookupError>
    where
        L: InventoryLookup + ?Sized,
    {
        let mut snapshot = Self::new();
        for line in lines {
            if snapshot.levels.contains_key(&line.item_id) {
                continue;
            }
            let levels = lookup.stock_locations(line.item_id)?;
            snapshot.insert(line.item_id, levels);
        }
        Ok(snapshot)
    }

    /// Record an item's levels: empty locations dropped, depletion order enforced.
    pub fn insert(&mut self, item_id: ItemId, levels: impl IntoIterator<Item = StockLevel>) {
        let mut levels: Vec<StockLevel> = levels.into_iter().filter(|l| l.stock > 0).collect();
        levels.sort_by_key(StockLevel::depletion_key);
        self.levels.insert(item_id, levels);
    }

    pub fn with_item(
        mut self,
        item_id: ItemId,
        levels: impl IntoIterator<Item = StockLevel>,
    ) -> Self {
        self.insert(item_id, levels);
        self
    }

    /// Levels for `item_id` in visit order; empty for items never captured.
    pub fn levels(&self, item_id: ItemId) -> &[StockLevel] {
        self.levels.get(&item_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Compute the pick plan for `lines` against `snapshot`.
///
/// Pure and deterministic. On success the picks are concatenated in line order,
/// each line's picks in visit order. Zero-quantity lines contribute nothing.
pub fn allocate(
    lines: &[OrderLine],
    snapshot: &StockSnapshot,
) -> Result<Vec<Pick>, AllocationError> {
    let mut picks = Vec::new();

    for line in lines {
        let mut remaining = line.quantity;
        if remaining == 0 {
            continue;
        }

        for level in snapshot.levels(line.item_id) {
            let quantity = level.stock.min(remaining);
            picks.push(Pick::new(level.location_id, quantity));
            remaining -= quantity;
            if remaining == 0 {
                break;
            }
        }

        if remaining > 0 {
            return Err(AllocationError::InsufficientStock {
                item_id: line.item_id,
                requested: line.quantity,
                shortfall: remaining,
            });
        }
    }

    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wms_core::LocationId;

    fn level(location: i64, stock: u64) -> StockLevel {
        StockLevel::new(LocationId::new(location), stock)
    }

    fn line(item: i64, quantity: u64) -> OrderLine {
        OrderLine::new(ItemId::new(item), quantity)
    }

    fn pick(location: i64, quantity: u64) -> Pick {
        Pick::new(LocationId::new(location), quantity)
    }

    fn two_item_snapshot() -> StockSnapshot {
        StockSnapshot::new()
            .with_item(ItemId::new(1), [level(1, 5), level(2, 100)])
            .with_item(ItemId::new(2), [level(3, 100)])
    }

    #[test]
    fn drains_smallest_location_first_across_lines() {
        let picks = allocate(&[line(1, 12), line(2, 2)], &two_item_snapshot()).unwrap();
        assert_eq!(picks, vec![pick(1, 5), pick(2, 7), pick(3, 2)]);
    }

    #[test]
    fn insufficient_stock_fails_the_whole_request() {
        let err = allocate(&[line(1, 120)], &two_item_snapshot()).unwrap_err();
        assert_eq!(
            err,
            AllocationError::InsufficientStock {
                item_id: ItemId::new(1),
                requested: 120,
                shortfall: 15,
            }
        );
    }

    #[test]
    fn a_later_short_line_discards_earlier_picks() {
        let result = allocate(&[line(2, 2), line(1, 500)], &two_item_snapshot());
        assert!(result.is_err());
    }

    #[test]
    fn zero_quantity_line_needs_no_stock() {
        let picks = allocate(&[line(1, 0)], &StockSnapshot::new()).unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn item_without_locations_cannot_supply_anything() {
        let snapshot = StockSnapshot::new().with_item(ItemId::new(1), Vec::<StockLevel>::new());
        assert!(allocate(&[line(1, 1)], &snapshot).is_err());
    }

    #[test]
    fn exact_fit_stops_at_the_covering_location() {
        let snapshot = StockSnapshot::new().with_item(ItemId::new(1), [level(1, 5), level(2, 5)]);
        let picks = allocate(&[line(1, 5)], &snapshot).unwrap();
        assert_eq!(picks, vec![pick(1, 5)]);
    }

    #[test]
    fn ties_in_stock_are_broken_by_location_id() {
        let snapshot =
            StockSnapshot::new().with_item(ItemId::new(1), [level(9, 4), level(2, 4), level(5, 1)]);
        let picks = allocate(&[line(1, 6)], &snapshot).unwrap();
        assert_eq!(picks, vec![pick(5, 1), pick(2, 4), pick(9, 1)]);
    }

    #[test]
    fn repeated_item_lines_each_read_the_full_snapshot() {
        let snapshot = StockSnapshot::new().with_item(ItemId::new(1), [level(1, 5), level(2, 10)]);
        let picks = allocate(&[line(1, 3), line(1, 3)], &snapshot).unwrap();
        assert_eq!(picks, vec![pick(1, 3), pick(1, 3)]);

        let picks = allocate(&[line(1, 10), line(1, 6)], &snapshot).unwrap();
        assert_eq!(picks, vec![pick(1, 5), pick(2, 5), pick(1, 5), pick(2, 1)]);
    }

    #[test]
    fn repeated_item_lines_against_a_single_location() {
        let snapshot = StockSnapshot::new().with_item(ItemId::new(1), [level(1, 5)]);
        let picks = allocate(&[line(1, 5), line(1, 5)], &snapshot).unwrap();
        assert_eq!(picks, vec![pick(1, 5), pick(1, 5)]);

        let err = allocate(&[line(1, 5), line(1, 6)], &snapshot).unwrap_err();
        assert_eq!(
            err,
            AllocationError::InsufficientStock {
                item_id: ItemId::new(1),
                requested: 6,
                shortfall: 1,
            }
        );
    }

    #[test]
    fn insert_drops_empty_levels_and_sorts() {
        let snapshot = StockSnapshot::new()
            .with_item(ItemId::new(1), [level(1, 100), level(2, 0), level(3, 5)]);
        assert_eq!(snapshot.levels(ItemId::new(1)), &[level(3, 5), level(1, 100)]);
        assert!(snapshot.levels(ItemId::new(42)).is_empty());
    }

    fn arb_case() -> impl Strategy<Value = (Vec<Vec<u64>>, Vec<(usize, u64)>)> {
        prop::collection::vec(prop::collection::vec(0u64..40, 0..6), 1..5).prop_flat_map(|items| {
            let n = items.len();
            let lines = prop::collection::vec((0..n, 0u64..80), 1..8);
            (Just(items), lines)
        })
    }

    fn build(items: &[Vec<u64>], lines: &[(usize, u64)]) -> (StockSnapshot, Vec<OrderLine>) {
        let mut snapshot = StockSnapshot::new();
        let mut next_location = 1;
        for (i, stocks) in items.iter().enumerate() {
            let levels: Vec<StockLevel> = stocks
                .iter()
                .map(|s| {
                    let l = level(next_location, *s);
                    next_location += 1;
                    l
                })
                .collect();
            snapshot.insert(ItemId::new(i as i64), levels);
        }
        let lines = lines.iter().map(|(i, q)| line(*i as i64, *q)).collect();
        (snapshot, lines)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a plan exists exactly when every line fits in its item's
        /// snapshot on its own. Each line's picks sum to its quantity, stay within
        /// location stock, and visit locations in depletion order.
        #[test]
        fn feasible_plans_respect_stock_and_order((items, raw_lines) in arb_case()) {
            let (snapshot, lines) = build(&items, &raw_lines);

            let total = |item: ItemId| snapshot.levels(item).iter().map(|l| l.stock).sum::<u64>();
            let feasible = lines.iter().all(|l| total(l.item_id) >= l.quantity);

            match allocate(&lines, &snapshot) {
                Ok(picks) => {
                    prop_assert!(feasible);

                    let mut rest = picks.as_slice();
                    for l in &lines {
                        let levels = snapshot.levels(l.item_id);
                        let mut covered = 0u64;
                        let mut visited = 0usize;
                        while covered < l.quantity {
                            let (p, tail) = rest.split_first().ok_or_else(|| {
                                TestCaseError::fail("ran out of picks")
                            })?;
                            let expected = &levels[visited];
                            prop_assert_eq!(p.location_id, expected.location_id);
                            prop_assert!(p.quantity > 0);
                            prop_assert!(p.quantity <= expected.stock);
                            covered += p.quantity;
                            visited += 1;
                            rest = tail;
                        }
                        prop_assert_eq!(covered, l.quantity);
                    }
                    prop_assert!(rest.is_empty());
                }
                Err(AllocationError::InsufficientStock { .. }) => {
                    prop_assert!(!feasible);
                }
            }
        }

        /// Property: same inputs, same plan.
        #[test]
        fn allocation_is_deterministic((items, raw_lines) in arb_case()) {
            let (snapshot, lines) = build(&items, &raw_lines);
            prop_assert_eq!(allocate(&lines, &snapshot), allocate(&lines, &snapshot.clone()));
        }
    }
}
