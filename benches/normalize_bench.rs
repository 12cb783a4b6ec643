// ABOUTME: Criterion benchmarks for response normalization and webhook verification
// ABOUTME: Measures tolerant list parsing of large data bodies and HMAC signature checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the response and webhook hot paths.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use terra_client::models::{Activity, Sleep};
use terra_client::{sign_payload, verify_signature, ApiResult, RawResponse, ResponseShape};

fn sleep_record(i: usize) -> Value {
    json!({
        "metadata": {
            "start_time": "2024-03-01T22:00:00Z",
            "end_time": "2024-03-02T06:00:00Z",
            "summary_id": format!("sleep-{i}"),
            "upload_type": 1
        },
        "device_data": {"name": "Ring", "manufacturer": "Oura"}
    })
}

fn activity_record(i: usize) -> Value {
    json!({
        "metadata": {
            "name": format!("Run {i}"),
            "type": 8,
            "start_time": "2024-03-01T07:00:00Z",
            "end_time": "2024-03-01T07:45:00Z"
        },
        "distance_data": {"distance_meters": 8000.0 + i as f64, "steps": 9000.0},
        "calories_data": {"total_burned_calories": 640.0}
    })
}

fn data_body(records: impl Iterator<Item = Value>) -> Bytes {
    let body = json!({
        "status": "success",
        "user": {"user_id": "bench-user", "provider": "OURA"},
        "data": records.collect::<Vec<_>>()
    });
    Bytes::from(serde_json::to_vec(&body).unwrap())
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_data");

    for size in [10_usize, 100, 1000] {
        let body = data_body((0..size).map(sleep_record));
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("sleep", size), &body, |b, body| {
            b.iter(|| {
                ApiResult::<Sleep>::from_response(
                    RawResponse::json(200, body.clone()),
                    ResponseShape::Field("data"),
                    None,
                )
                .unwrap()
            });
        });
    }

    // One in ten records is malformed and skipped
    let body = data_body((0..1000).map(|i| {
        if i % 10 == 0 {
            json!({"metadata": "broken"})
        } else {
            activity_record(i)
        }
    }));
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("activity_with_skips_1000", |b| {
        b.iter(|| {
            ApiResult::<Activity>::from_response(
                RawResponse::json(200, black_box(body.clone())),
                ResponseShape::Field("data"),
                None,
            )
            .unwrap()
        });
    });

    group.finish();
}

fn bench_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhook_signature");
    let body = data_body((0..100).map(sleep_record));
    let header = sign_payload(1_700_000_000, &body, "bench-secret");

    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("verify_100_records", |b| {
        b.iter(|| verify_signature(black_box(&header), black_box(&body), "bench-secret"));
    });
    group.bench_function("reject_malformed_header", |b| {
        b.iter(|| verify_signature(black_box("t=1,s=deadbeef"), black_box(&body), "bench-secret"));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_signature);
criterion_main!(benches);
