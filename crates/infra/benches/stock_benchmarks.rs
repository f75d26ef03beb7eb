use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use rust_decimal::Decimal;
use stockyard_catalog::{InMemoryProductCatalog, InMemoryStoreDirectory};
use stockyard_core::{ProductId, StoreId};
use stockyard_infra::InMemoryStockRepository;
use stockyard_stock::{
    InMemoryTouchSink, NewStock, StockFacade, StockHooks, StockProductEntry,
};

const SKU: &str = "bench-sku";

/// One concrete product spread over `warehouses` active warehouses, all
/// related to one store.
fn setup_facade(warehouses: usize) -> StockFacade<InMemoryStockRepository> {
    let repository = Arc::new(InMemoryStockRepository::new());

    let products = Arc::new(InMemoryProductCatalog::new());
    products.add_concrete(SKU, ProductId::new(1), None);

    let stores = Arc::new(InMemoryStoreDirectory::new());
    stores.add_store("DE", StoreId::new(1));

    let facade = StockFacade::new(
        repository,
        products,
        stores,
        Arc::new(InMemoryTouchSink::new()),
        StockHooks::default(),
    );

    for i in 0..warehouses {
        let mut new = NewStock::named(format!("Warehouse-{i}"));
        new.store_ids = vec![StoreId::new(1)];
        let response = facade.create_stock(&new).expect("create stock");
        assert!(response.is_successful);

        facade
            .create_stock_product(
                &StockProductEntry::new(SKU, format!("Warehouse-{i}"))
                    .with_quantity(Decimal::new(1025, 1)),
            )
            .expect("create stock product");
    }

    facade
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_aggregation");

    for warehouses in [1usize, 10, 50] {
        group.throughput(Throughput::Elements(warehouses as u64));
        group.bench_with_input(
            BenchmarkId::new("calculate_stock_for_product", warehouses),
            &warehouses,
            |b, &warehouses| {
                let facade = setup_facade(warehouses);
                b.iter(|| black_box(facade.calculate_stock_for_product(black_box(SKU)).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_mutation");

    group.bench_function("increment_decrement_round_trip", |b| {
        let facade = setup_facade(1);
        let delta = Decimal::new(10, 0);
        b.iter(|| {
            facade
                .increment_stock_product(SKU, "Warehouse-0", black_box(delta))
                .unwrap();
            facade
                .decrement_stock_product(SKU, "Warehouse-0", black_box(delta))
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_mutation);
criterion_main!(benches);
