use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use graphql_resource_extract::extract;
use graphql_resource_middleware::document_text;
use std::fmt::Write;
use std::hint::black_box;

// A typical client document: named operations, variables, fragments, comments
const CLIENT_DOCUMENT: &str = r#"
# Dashboard screen
query Dashboard($first: Int = 20, $filter: PostFilter = { status: PUBLISHED }) {
  viewer {
    id
    name
    avatar(size: 64)
  }
  feed: posts(first: $first, filter: $filter) @connection(key: "feed") {
    edges { node { ...PostFields } }
    pageInfo { hasNextPage endCursor }
  }
  notifications(unread: true) { totalCount }
}

mutation MarkRead($id: ID!) {
  markNotificationRead(id: $id) { id read }
}

fragment PostFields on Post {
  id
  title
  author { name }
}
"#;

// Root fields without selection sets push extraction into the fallback scanners
const SCALAR_ROOTS: &str = r#"
query Counters {
  totalUsers
  totalPosts(status: "published")
  serverTime
  version
}
"#;

fn envelope(document: &str) -> String {
    let escaped = document.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!(r#"{{"query": "{escaped}", "operationName": "Dashboard", "variables": {{"first": 10}}}}"#)
}

/// `query { f0 { f1 { ... } } }` nested `depth` levels deep.
fn deep_nesting(depth: usize) -> String {
    let mut document = String::from("query Deep ");
    for level in 0..depth {
        document.push_str("{ f");
        document.push_str(&level.to_string());
        document.push(' ');
    }
    document.push_str("{ leaf }");
    document.push_str(&" }".repeat(depth));
    document
}

/// Many sibling operations, each with a handful of root fields.
fn many_operations(count: usize) -> String {
    let mut document = String::new();
    for i in 0..count {
        let _ = writeln!(document, "query Op{i} {{ a{i} {{ id }} b{i}(x: {i}) {{ id }} }}");
    }
    document
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for (name, document) in [("client_document", CLIENT_DOCUMENT), ("scalar_roots", SCALAR_ROOTS)] {
        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_function(name, |b| b.iter(|| extract(black_box(document))));
    }

    for count in [10, 100, 1_000] {
        let document = many_operations(count);
        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("many_operations", count),
            &document,
            |b, document| b.iter(|| extract(black_box(document))),
        );
    }

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_nesting");

    for depth in [10, 100, 1_000] {
        let document = deep_nesting(depth);
        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &document, |b, document| {
            b.iter(|| extract(black_box(document)));
        });
    }

    group.finish();
}

fn bench_request_body(c: &mut Criterion) {
    let body = envelope(CLIENT_DOCUMENT);

    c.bench_function("request_body/envelope", |b| {
        b.iter(|| extract(&document_text(black_box(body.as_bytes()))));
    });
    c.bench_function("request_body/raw", |b| {
        b.iter(|| extract(&document_text(black_box(CLIENT_DOCUMENT.as_bytes()))));
    });
}

criterion_group!(benches, bench_extract, bench_deep_nesting, bench_request_body);
criterion_main!(benches);
