use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stockroom_core::RecordId;
use stockroom_infra::{Collection, InMemoryRecordStore, StockService, StoreConfig};
use stockroom_inventory::{
    MovementRecord, MovementType, compute_current_stock, compute_current_stock_for_product,
    stock_by_product,
};
use stockroom_products::{CategoryRecord, build_flat_with_level, build_tree};

fn movements(count: usize, products: usize) -> Vec<MovementRecord> {
    (0..count)
        .map(|i| MovementRecord {
            id: RecordId::from(format!("m{i}")),
            movement_type: if i % 3 == 0 { MovementType::Out } else { MovementType::In },
            quantity: (i % 10) as u64 + 1,
            product_id: RecordId::from(format!("p{}", i % products)),
            note: None,
            created_at: None,
        })
        .collect()
}

/// Balanced-ish forest: every category hangs under one of the earlier ones.
fn categories(count: usize) -> Vec<CategoryRecord> {
    (0..count)
        .map(|i| CategoryRecord {
            id: RecordId::from(format!("c{i}")),
            name: format!("Category {}", count - i),
            parent_id: if i < 4 { None } else { Some(RecordId::from(format!("c{}", i / 4))) },
            description: None,
        })
        .collect()
}

fn bench_stock_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_accumulation");

    for count in [100usize, 1_000, 10_000].iter() {
        let history = movements(*count, 50);
        let product = RecordId::from("p7");
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("single_product", count), &history, |b, h| {
            b.iter(|| compute_current_stock(black_box(h)));
        });
        group.bench_with_input(BenchmarkId::new("filtered_by_product", count), &history, |b, h| {
            b.iter(|| compute_current_stock_for_product(black_box(h), &product));
        });
        group.bench_with_input(BenchmarkId::new("all_products", count), &history, |b, h| {
            b.iter(|| stock_by_product(black_box(h)));
        });
    }

    group.finish();
}

fn bench_category_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_views");

    for count in [10usize, 100, 1_000].iter() {
        let cats = categories(*count);
        group.bench_with_input(BenchmarkId::new("build_tree", count), &cats, |b, cats| {
            b.iter(|| build_tree(black_box(cats)));
        });
        group.bench_with_input(BenchmarkId::new("build_flat_with_level", count), &cats, |b, cats| {
            b.iter(|| build_flat_with_level(black_box(cats)).unwrap());
        });
    }

    group.finish();
}

fn bench_store_backed_stock(c: &mut Criterion) {
    let config = StoreConfig::from_env().unwrap_or_default();
    config.init_tracing();

    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let mut group = c.benchmark_group("store_backed_stock");

    for count in [100usize, 1_000].iter() {
        let store = InMemoryRecordStore::new();
        store.insert_all(Collection::Movements, &movements(*count, 20)).unwrap();
        let service = StockService::new(store, &config);
        let product = RecordId::from("p3");

        group.bench_with_input(BenchmarkId::new("current_stock", count), count, |b, _| {
            b.iter(|| rt.block_on(service.current_stock(black_box(&product))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_stock_accumulation,
    bench_category_views,
    bench_store_backed_stock
);
criterion_main!(benches);
