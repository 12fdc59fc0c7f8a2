//! Property tests for tranche and mask invariants.
//!
//! Uses proptest to verify:
//! 1. Equal split: allocations sum to 100 and each is 100/N
//! 2. Add spacing: the k-th added row has profit 2k
//! 3. Removal: any removal re-equalizes to 100/(N-1)
//! 4. Format stability: re-formatting a parsed formatted value changes nothing
//! 5. Manual recompute never touches allocations

use proptest::prelude::*;
use placeorder_core::config::TakeProfitLimits;
use placeorder_core::domain::{EntryContext, OrderSide, TrancheField};
use placeorder_core::mask::{clear_value, format_value, parse_number, MaskOptions};
use placeorder_core::tranche::TrancheList;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_side() -> impl Strategy<Value = OrderSide> {
    prop_oneof![Just(OrderSide::Buy), Just(OrderSide::Sell)]
}

fn arb_entry() -> impl Strategy<Value = EntryContext> {
    (arb_side(), 0.01..100_000.0_f64, 0.0001..1_000.0_f64)
        .prop_map(|(side, price, amount)| EntryContext::new(side, price, amount))
}

fn limits(max_rows: usize) -> TakeProfitLimits {
    TakeProfitLimits {
        max_rows,
        ..TakeProfitLimits::default()
    }
}

fn build(entry: &EntryContext, rows: usize) -> TrancheList {
    let limits = limits(rows);
    (0..rows).fold(TrancheList::new(), |list, _| list.add(entry, &limits).unwrap())
}

// ── 1–3. Tranche list shape ──────────────────────────────────────────

proptest! {
    #[test]
    fn equal_split_sums_to_hundred(entry in arb_entry(), rows in 1usize..12) {
        let list = build(&entry, rows).rebalance_equal(&entry);
        let share = 100.0 / rows as f64;
        prop_assert!((list.allocation_sum() - 100.0).abs() < 1e-9);
        for row in &list {
            prop_assert!((row.allocation_percent - share).abs() < 1e-12);
        }
    }

    #[test]
    fn added_rows_step_by_two(entry in arb_entry(), rows in 1usize..12) {
        let list = build(&entry, rows);
        for (k, row) in list.iter().enumerate() {
            prop_assert!((row.profit_percent - 2.0 * (k as f64 + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn removal_re_equalizes(
        entry in arb_entry(),
        rows in 2usize..10,
        pick in any::<prop::sample::Index>(),
        edited in 0.0..100.0_f64,
    ) {
        let list = build(&entry, rows)
            .edit(0, TrancheField::AllocationPercent, edited, &entry)
            .unwrap();
        let victim = list.rows()[pick.index(rows)].id;
        let list = list.remove(victim, &entry).unwrap();
        prop_assert_eq!(list.len(), rows - 1);
        let share = 100.0 / (rows - 1) as f64;
        for row in &list {
            prop_assert!((row.allocation_percent - share).abs() < 1e-12);
        }
    }

    #[test]
    fn manual_recompute_keeps_allocations(
        entry in arb_entry(),
        moved in arb_entry(),
        rows in 1usize..8,
        edited in 0.0..100.0_f64,
    ) {
        let list = build(&entry, rows)
            .edit(0, TrancheField::AllocationPercent, edited, &entry)
            .unwrap();
        let recomputed = list.recompute_from_manual_allocations(&moved);
        for (before, after) in list.iter().zip(recomputed.iter()) {
            prop_assert_eq!(before.allocation_percent, after.allocation_percent);
            prop_assert_eq!(before.id, after.id);
        }
    }
}

// ── 4. Format stability ──────────────────────────────────────────────

proptest! {
    #[test]
    fn format_parse_format_is_stable(
        cents in -100_000_000i64..100_000_000,
        scale in prop_oneof![Just(None::<u32>), Just(Some(0u32)), (2u32..8).prop_map(Some)],
    ) {
        // whole cents never truncate to a trailing zero at these scales
        let value = cents as f64 / 100.0;
        let mut options = MaskOptions::default().with_prefix("$").with_suffix(" USDT");
        options.decimal_scale = scale;
        let once = format_value(Some(value), &options);
        let parsed = parse_number(&clear_value(&once, &options));
        let twice = format_value(parsed, &options);
        prop_assert_eq!(once, twice);
    }
}
