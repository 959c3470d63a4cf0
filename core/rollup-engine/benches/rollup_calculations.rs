//! FILENAME: core/rollup-engine/benches/rollup_calculations.rs
//! Benchmarks for the rollup aggregations on a large budget tree.

use std::sync::Arc;

use budget_engine::{Activity, Budget, Goal, LineItem, NodeId, QuarterDetail, LEDGERS};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rollup_engine::{build_dashboard, ledger_totals, quarterly_totals, strategy_totals, DashboardOptions};

/// goals x activities x line items, every line item booked against a ledger.
fn create_budget(goals: usize, activities: usize, items: usize) -> Budget {
    let goals = (0..goals)
        .map(|g| {
            let mut goal = Goal::new(NodeId::generate(), format!("Goal {}", g));
            goal.activities = (0..activities)
                .map(|a| {
                    let mut activity = Activity::new(NodeId::generate(), format!("Strategy {}.{}", g, a));
                    activity.line_items = (0..items)
                        .map(|i| {
                            let ledger = &LEDGERS[(g + a + i) % LEDGERS.len()];
                            let mut item = LineItem::new(NodeId::generate());
                            item.select_ledger(ledger.name);
                            item.q1 = QuarterDetail::new(100.0 + i as f64, 2.0);
                            item.q2 = QuarterDetail::new(50.0, (a + 1) as f64);
                            item.q3 = QuarterDetail::new(10.0 * g as f64, 3.0);
                            item.q4 = QuarterDetail::new(1.5, i as f64);
                            Arc::new(item)
                        })
                        .collect();
                    Arc::new(activity)
                })
                .collect();
            goal
        })
        .collect();
    Budget::from_goals(goals)
}

fn bench_rollups(c: &mut Criterion) {
    let budget = create_budget(20, 10, 50);

    c.bench_function("quarterly_totals_10k", |b| {
        b.iter(|| quarterly_totals(black_box(&budget)))
    });

    c.bench_function("ledger_totals_10k", |b| {
        b.iter(|| ledger_totals(black_box(&budget)))
    });

    c.bench_function("strategy_totals_10k", |b| {
        b.iter(|| strategy_totals(black_box(&budget)))
    });

    let options = DashboardOptions::default();
    c.bench_function("build_dashboard_10k", |b| {
        b.iter(|| build_dashboard(black_box(&budget), &options))
    });
}

criterion_group!(benches, bench_rollups);
criterion_main!(benches);
