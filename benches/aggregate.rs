use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flowtag::{aggregate, FlowRecord, ProtocolTable, TagTable};

fn records(n: usize) -> Vec<FlowRecord> {
    (0..n)
        .map(|i| FlowRecord {
            dst_port: (i % 4096).to_string(),
            protocol_number: if i % 3 == 0 { "17" } else { "6" }.to_string(),
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let input = records(100_000);
    let tags: TagTable = (0..1024)
        .map(|port| (format!("{},tcp", port), format!("sv_P{}", port % 8)))
        .collect();

    c.bench_function("aggregate 100k records", |b| {
        b.iter(|| aggregate(black_box(input.clone()), &tags, ProtocolTable::iana()))
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
