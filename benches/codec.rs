//! Codec Benchmark for browserkv
//!
//! Measures encode/decode throughput of the raw-string value codec
//! for typical entry shapes.

use browserkv::codec::{decode, encode};
use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;

/// Benchmark encoding
fn bench_encode(c: &mut Criterion) {
    let expires_at = DateTime::from_timestamp(1_700_000_000, 0);

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    group.bench_function("encode_small", |b| {
        let value = json!("session-token");
        b.iter(|| encode(black_box(&value), expires_at).unwrap());
    });

    group.bench_function("encode_medium", |b| {
        let value = json!({
            "user": "alice",
            "roles": ["admin", "editor"],
            "prefs": {"theme": "dark", "lang": "en"},
        });
        b.iter(|| encode(black_box(&value), expires_at).unwrap());
    });

    group.bench_function("encode_large", |b| {
        let value = json!(vec!["x".repeat(64); 32]);
        b.iter(|| encode(black_box(&value), None).unwrap());
    });

    group.finish();
}

/// Benchmark decoding
fn bench_decode(c: &mut Criterion) {
    let expires_at = DateTime::from_timestamp(1_700_000_000, 0);

    let small = encode(&json!("session-token"), expires_at).unwrap();
    let large = encode(&json!(vec!["x".repeat(64); 32]), expires_at).unwrap();
    let legacy = "not valid json|1700000000".to_string();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    group.bench_function("decode_small", |b| {
        b.iter(|| decode(black_box(&small)));
    });

    group.bench_function("decode_large", |b| {
        b.iter(|| decode(black_box(&large)));
    });

    group.bench_function("decode_legacy_fallback", |b| {
        b.iter(|| decode(black_box(&legacy)));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
