use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ordermill_aggregate::{build_customer_directory, build_item_catalog};
use ordermill_core::{ItemLine, LoadedOrder, OrderRecord, PhonePattern};

/// Deterministic order batch: 800 distinct customers, a 50-item menu,
/// three lines per order.
fn synthetic_orders(count: usize) -> Vec<LoadedOrder> {
    (0..count)
        .map(|index| LoadedOrder {
            index,
            record: OrderRecord {
                timestamp: None,
                name: format!("Customer {}", index % 800),
                phone: format!("609-555-{:04}", index % 800),
                items: (0..3)
                    .map(|line| ItemLine {
                        name: format!("Item {}", (index + line) % 50),
                        price: 4.0 + ((index + line) % 50) as f64 * 0.25,
                    })
                    .collect(),
                notes: None,
            },
        })
        .collect()
}

fn bench_customer_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("customer_directory_fold");
    let pattern = PhonePattern::default();

    for size in [100usize, 1_000, 10_000] {
        let orders = synthetic_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| build_customer_directory(black_box(orders), &pattern));
        });
    }

    group.finish();
}

fn bench_item_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("item_catalog_fold");

    for size in [100usize, 1_000, 10_000] {
        let orders = synthetic_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| build_item_catalog(black_box(orders)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_customer_directory, bench_item_catalog);
criterion_main!(benches);
