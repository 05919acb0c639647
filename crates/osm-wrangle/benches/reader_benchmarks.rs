//! Streaming reader and pipeline benchmarks.
//!
//! Measures the structure audit and transformer over synthetic extracts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use osm_wrangle::input::ElementReader;
use osm_wrangle::{CorrectionTable, RecordTransformer, RuleSet, StructureAuditor};

const STREETS: [&str; 5] = [
    "Katipunan Ave.",
    "anonas st",
    "Quirino Hiway",
    "15th",
    "Aurora Boulevard",
];

/// Generate a synthetic extract with `nodes` tagged nodes and one way per ten nodes.
fn generate_extract(nodes: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm version=\"0.6\">\n");

    for i in 0..nodes {
        xml.push_str(&format!(
            "  <node id=\"{id}\" lat=\"14.{id:04}\" lon=\"121.{id:04}\" version=\"1\" \
             timestamp=\"2013-08-03T16:43:42Z\" changeset=\"{cs}\" uid=\"{uid}\" user=\"user{uid}\">\n\
             \x20   <tag k=\"addr:street\" v=\"{street}\"/>\n\
             \x20   <tag k=\"addr:postcode\" v=\"{postcode}\"/>\n\
             \x20   <tag k=\"amenity\" v=\"cafe\"/>\n\
             \x20 </node>\n",
            id = i + 1,
            cs = 1000 + i % 50,
            uid = i % 25,
            street = STREETS[i % STREETS.len()],
            postcode = 1100 + i % 150,
        ));
    }

    for w in 0..nodes / 10 {
        xml.push_str(&format!(
            "  <way id=\"{}\" version=\"1\" timestamp=\"2013-08-03T16:43:42Z\" changeset=\"1\" uid=\"1\" user=\"u\">\n",
            100_000 + w
        ));
        for n in 0..10 {
            xml.push_str(&format!("    <nd ref=\"{}\"/>\n", w * 10 + n + 1));
        }
        xml.push_str("    <tag k=\"highway\" v=\"residential\"/>\n  </way>\n");
    }

    xml.push_str("</osm>\n");
    xml
}

/// Benchmark raw element streaming.
fn bench_read_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_elements");

    for nodes in [100, 1_000, 10_000].iter() {
        let data = generate_extract(*nodes);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("nodes", nodes), &data, |b, data| {
            b.iter(|| {
                let count = ElementReader::new(data.as_bytes())
                    .filter(|e| e.is_ok())
                    .count();
                black_box(count)
            })
        });
    }

    group.finish();
}

/// Benchmark the full structure audit.
fn bench_structure_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure_audit");

    for nodes in [100, 1_000, 10_000].iter() {
        let data = generate_extract(*nodes);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("nodes", nodes), &data, |b, data| {
            b.iter(|| {
                let auditor = StructureAuditor::new();
                black_box(auditor.audit_reader(data.as_bytes()).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark shaping and serializing documents.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    let mut corrections = CorrectionTable::new();
    corrections.insert("street", "15th", "15th Avenue");
    let transformer = RecordTransformer::new(RuleSet::default(), corrections);

    for nodes in [100, 1_000, 10_000].iter() {
        let data = generate_extract(*nodes);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("nodes", nodes), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::with_capacity(data.len());
                black_box(transformer.transform_reader(data.as_bytes(), &mut out).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_read_elements,
    bench_structure_audit,
    bench_transform
);
criterion_main!(benches);
