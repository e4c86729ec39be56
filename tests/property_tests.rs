//! Property-based tests for scheduling, numbering and tolerance checks.
//!
//! These tests use proptest to verify invariants across a wide range of inputs,
//! helping to catch edge cases that unit tests might miss.

use chrono::{DateTime, Duration, TimeZone, Utc};
use precision_oms::{
    entities::{
        production_metric::within_bounds,
        production_order::{self, MaterialType, Priority, ProductionStatus},
    },
    services::production_orders::{format_order_number, pack_schedule, scheduling_order},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

// (priority, start offset in hours, duration in hours)
fn order_strategy() -> impl Strategy<Value = (Priority, i64, i64)> {
    (priority_strategy(), 0i64..2_000, 0i64..500)
}

fn build_orders(specs: &[(Priority, i64, i64)]) -> Vec<production_order::Model> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (priority, offset, hours))| {
            let start = base() + Duration::hours(*offset);
            production_order::Model {
                id: i as i32 + 1,
                order_number: format!("TST-{:03}", i + 1),
                part_number: "TB-001".into(),
                part_description: None,
                quantity: 1,
                quantity_completed: 0,
                status: ProductionStatus::Planned,
                priority: *priority,
                scheduled_start_date: start,
                scheduled_end_date: start + Duration::hours(*hours),
                actual_start_date: None,
                actual_end_date: None,
                facility_id: 1,
                customer_name: "Aero Corp".into(),
                customer_order_number: None,
                material_type: MaterialType::InconelAlloy,
                estimated_cost: Decimal::ZERO,
                actual_cost: Decimal::ZERO,
                created_date: start,
                notes: None,
            }
        })
        .collect()
}

// Property: packing keeps every order's duration and leaves the configured gap
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn packed_schedule_preserves_durations(
        specs in prop::collection::vec(order_strategy(), 0..20),
        gap_hours in 0i64..48,
    ) {
        let orders = build_orders(&specs);
        let gap = Duration::hours(gap_hours);
        let slots = pack_schedule(&orders, base(), gap);

        prop_assert_eq!(slots.len(), orders.len());
        for (slot, order) in slots.iter().zip(&orders) {
            prop_assert_eq!(slot.order_id, order.id);
            prop_assert_eq!(
                slot.scheduled_end_date - slot.scheduled_start_date,
                order.scheduled_duration()
            );
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[1].scheduled_start_date, pair[0].scheduled_end_date + gap);
        }
        if let Some(first) = slots.first() {
            prop_assert_eq!(first.scheduled_start_date, base());
        }
    }

    #[test]
    fn sorted_orders_ascend_by_priority_code(
        specs in prop::collection::vec(order_strategy(), 0..30),
    ) {
        let mut orders = build_orders(&specs);
        orders.sort_by(scheduling_order);

        for pair in orders.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                prop_assert!(pair[0].scheduled_start_date <= pair[1].scheduled_start_date);
            }
        }
    }
}

// Property: order numbers follow the code-date-sequence layout
proptest! {
    #[test]
    fn order_numbers_are_zero_padded(
        code in "[A-Z]{2,10}",
        days in 0i64..20_000,
        sequence in 1u64..1_000,
    ) {
        let day = base() + Duration::days(days);
        let number = format_order_number(Some(&code), day, sequence);
        let expected = format!("{}-{}-{:03}", code, day.format("%Y%m%d"), sequence);
        prop_assert_eq!(number, expected);
    }
}

// Property: tolerance bounds are inclusive
proptest! {
    #[test]
    fn values_between_bounds_are_within_tolerance(
        lo in -10_000i64..10_000,
        width in 0i64..10_000,
        pick in 0i64..10_000,
    ) {
        let min = Decimal::new(lo, 2);
        let max = Decimal::new(lo + width, 2);
        let value = Decimal::new(lo + pick.min(width), 2);
        prop_assert!(within_bounds(value, Some(min), Some(max)));
        prop_assert!(!within_bounds(max + Decimal::new(1, 2), Some(min), Some(max)));
        prop_assert!(!within_bounds(min - Decimal::new(1, 2), Some(min), Some(max)));
    }
}
