//! MenuClickAggregator 性能基准测试

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use menu_stats::statistic::{ClickEvent, MenuClick, MenuClickAggregator, ResourceLevelCatalog};
use menu_stats::store::MemoryAggregateStore;

fn create_aggregator() -> MenuClickAggregator {
    MenuClickAggregator::new(
        Arc::new(MemoryAggregateStore::new()),
        Arc::new(ResourceLevelCatalog),
    )
}

fn create_batch(menus_per_level: usize) -> Vec<ClickEvent> {
    ["site", "organization", "project", "user"]
        .iter()
        .map(|level| {
            let menus = (0..menus_per_level)
                .map(|i| MenuClick::new(format!("{level}.menu.{i}"), format!("Menu {i}"), Some(1)))
                .collect();
            ClickEvent::new(*level, menus)
        })
        .collect()
}

/// 已存在 key 上的累加吞吐量
fn bench_save_existing_keys(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut group = c.benchmark_group("save_menu_click/existing");

    for menus in [1, 10, 100] {
        let aggregator = create_aggregator();
        let batch = create_batch(menus);
        rt.block_on(aggregator.save_menu_click_on(date, &batch))
            .unwrap();

        group.throughput(Throughput::Elements((menus * 4) as u64));
        group.bench_with_input(BenchmarkId::new("menus", menus), &batch, |b, batch| {
            b.to_async(&rt)
                .iter(|| async { aggregator.save_menu_click_on(date, batch).await.unwrap() });
        });
    }
    group.finish();
}

/// 每次都写入新 key（新建 + 设置过期）
fn bench_save_fresh_keys(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let aggregator = create_aggregator();
    let batch = create_batch(10);
    let mut date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    c.bench_function("save_menu_click/fresh", |b| {
        b.iter(|| {
            date = date.succ_opt().unwrap();
            rt.block_on(aggregator.save_menu_click_on(date, &batch))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_save_existing_keys, bench_save_fresh_keys);
criterion_main!(benches);
