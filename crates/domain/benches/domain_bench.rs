use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Address, Basket, BasketItem, CatalogSnapshot, Money, build_order};

fn address() -> Address {
    Address::new("1 Main St", "Springfield", "OR", "USA", "97477")
}

fn bench_build_order(c: &mut Criterion) {
    let items: Vec<BasketItem> = (0..50)
        .map(|i| BasketItem::new(i, Money::from_cents(999), 2))
        .collect();
    let basket = Basket::new(1, 7, items);
    let snapshots: Vec<CatalogSnapshot> = (0..50)
        .map(|i| CatalogSnapshot::new(i, format!("Item {i}"), format!("/pics/{i}.png")))
        .collect();

    c.bench_function("domain/build_order_50_items", |b| {
        b.iter(|| build_order(&basket, address(), &snapshots).unwrap());
    });
}

fn bench_order_total(c: &mut Criterion) {
    let items: Vec<BasketItem> = (0..50)
        .map(|i| BasketItem::new(i, Money::from_cents(999), 2))
        .collect();
    let basket = Basket::new(1, 7, items);
    let snapshots: Vec<CatalogSnapshot> = (0..50)
        .map(|i| CatalogSnapshot::new(i, format!("Item {i}"), format!("/pics/{i}.png")))
        .collect();
    let order = build_order(&basket, address(), &snapshots).unwrap();

    c.bench_function("domain/order_total_50_items", |b| {
        b.iter(|| order.total());
    });
}

criterion_group!(benches, bench_build_order, bench_order_total);
criterion_main!(benches);
