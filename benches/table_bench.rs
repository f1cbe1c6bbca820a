//! Benchmarks for BucketKV table operations

use criterion::{criterion_group, criterion_main, Criterion};

use bucketkv::Table;
use tempfile::TempDir;

fn table_benchmarks(c: &mut Criterion) {
    // Single key write: one bucket rewrite plus one log append
    c.bench_function("set_single_key", |b| {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::new(temp_dir.path(), true, 3).unwrap();
        let mut key = 0i64;
        b.iter(|| {
            key += 1;
            table.set(key, key).unwrap();
        });
    });

    c.bench_function("set_without_log", |b| {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::new(temp_dir.path(), false, 3).unwrap();
        let mut key = 0i64;
        b.iter(|| {
            key += 1;
            table.set(key, key).unwrap();
        });
    });

    c.bench_function("get_hit", |b| {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::new(temp_dir.path(), false, 2).unwrap();
        for key in 0..1024i64 {
            table.set(key, key).unwrap();
        }
        let mut key = 0i64;
        b.iter(|| {
            key = (key + 1) % 1024;
            table.get(key).unwrap()
        });
    });

    c.bench_function("from_log_1000_records", |b| {
        let temp_dir = TempDir::new().unwrap();
        let source = Table::new(temp_dir.path().join("source"), true, 2).unwrap();
        for key in 0..1000i64 {
            source.set(key, -key).unwrap();
        }
        let log = source.log_file_path().unwrap().to_path_buf();
        let target = temp_dir.path().join("target");
        b.iter(|| Table::from_log(&log, &target, 2).unwrap());
    });
}

criterion_group!(benches, table_benchmarks);
criterion_main!(benches);
