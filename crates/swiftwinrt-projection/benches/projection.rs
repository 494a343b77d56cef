use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::PathBuf;
use swiftwinrt_metadata::MetadataStore;
use swiftwinrt_projection::{generate, Projection, ProjectionConfig};

fn fixture_store() -> MetadataStore {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut store = MetadataStore::new();
    store
        .load_files(&[fixtures.join("windows_foundation.json"), fixtures.join("contoso.json")])
        .unwrap();
    store
}

/// A synthetic assembly with `count` interfaces, each carrying a few properties
fn synthetic_document(count: usize) -> String {
    let types: Vec<String> = (0..count)
        .map(|index| {
            format!(
                r#"{{
                    "namespace": "Bench.Ns{ns}", "name": "IType{index}", "kind": "interface",
                    "guid": "{index:08x}-0000-0000-0000-000000000000",
                    "properties": [
                        {{ "name": "Count", "type": "System.Int32", "getter": "public", "setter": "public" }},
                        {{ "name": "Name", "type": "System.String", "getter": "public" }},
                        {{ "name": "Items", "type": "System.Object[]", "getter": "public" }}
                    ],
                    "methods": [{{ "name": "Run", "params": [{{ "name": "flag", "type": "System.Boolean" }}] }}]
                }}"#,
                ns = index % 8,
                index = index
            )
        })
        .collect();
    format!(
        r#"{{ "assemblies": [{{ "name": "Bench", "types": [{}] }}] }}"#,
        types.join(",")
    )
}

fn bench_type_mapping(c: &mut Criterion) {
    let store = fixture_store();
    let signatures = [
        "System.Int32",
        "Windows.Foundation.Uri",
        "Windows.Foundation.IReference`1<System.Int64>",
        "Windows.Foundation.Collections.IVector`1<System.String>",
    ];
    let nodes: Vec<_> = signatures
        .iter()
        .map(|signature| store.resolve_str(signature).unwrap())
        .collect();

    let mut group = c.benchmark_group("type_projection");
    group.bench_function("cold", |b| {
        b.iter(|| {
            let projection = Projection::new(&store, "CWinRT");
            for node in &nodes {
                black_box(projection.type_projection(node).unwrap());
            }
        });
    });

    let warm = Projection::new(&store, "CWinRT");
    group.bench_function("memoized", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(warm.type_projection(node).unwrap());
            }
        });
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for count in [16usize, 128, 512] {
        let mut store = MetadataStore::new();
        store.load_json(&synthetic_document(count)).unwrap();
        let config = ProjectionConfig::default();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("interfaces", count), &store, |b, store| {
            b.iter(|| generate(black_box(store), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_type_mapping, bench_generate);
criterion_main!(benches);
