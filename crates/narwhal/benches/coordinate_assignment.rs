use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::{CoordinateOptions, EdgeId, Hierarchy, SimpleGraph, VertexId, layout};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct HierarchySpec {
    /// Rank of every vertex, in insertion order.
    ranks: Vec<usize>,
    /// (source, target, parallel edge count)
    edges: Vec<(usize, usize, usize)>,
}

impl HierarchySpec {
    fn build(&self) -> (Hierarchy, SimpleGraph) {
        let mut g = SimpleGraph::new();
        let mut h = Hierarchy::new();
        let mut ids = Vec::with_capacity(self.ranks.len());
        for (i, &rank) in self.ranks.iter().enumerate() {
            g.add_vertex(VertexId(i), 40.0 + (i % 5) as f64 * 15.0, 30.0);
            ids.push(h.add_vertex(VertexId(i), rank));
        }

        let mut next_edge = 0;
        for &(from, to, parallel) in &self.edges {
            if self.ranks[from] >= self.ranks[to] {
                continue;
            }
            let edges: Vec<EdgeId> = (0..parallel)
                .map(|_| {
                    let e = EdgeId(next_edge);
                    next_edge += 1;
                    g.add_edge(e, VertexId(from));
                    e
                })
                .collect();
            let _ = h.add_edge_chain(ids[from], ids[to], edges, false);
        }
        (h, g)
    }
}

fn build_layered_spec(rank_count: usize, per_rank: usize) -> HierarchySpec {
    let ranks: Vec<usize> = (0..rank_count * per_rank).map(|i| i / per_rank).collect();
    let mut edges = Vec::new();

    for i in 0..ranks.len() {
        // Fan into the next rank, shifted so the layout starts unbalanced.
        let next = i + per_rank + (i % 3);
        if next < ranks.len() {
            edges.push((i, next, 1));
        }
        // A long edge every few vertices, some of them doubled.
        let far = i + per_rank * 3;
        if i % 4 == 0 && far < ranks.len() {
            edges.push((i, far, 1 + i % 2));
        }
    }

    HierarchySpec { ranks, edges }
}

fn bench_coordinate_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_assignment");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("ranks_5_w8", 5usize, 8usize),
        ("ranks_12_w16", 12usize, 16usize),
        ("ranks_24_w32", 24usize, 32usize),
    ];

    let options = CoordinateOptions::default();
    for (name, rank_count, per_rank) in cases {
        let spec = build_layered_spec(rank_count, per_rank);
        group.bench_with_input(BenchmarkId::new("layout", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |(mut h, mut g)| {
                    let result = layout(black_box(&mut h), &mut g, &options);
                    black_box(result.map(|r| r.edges.len()).unwrap_or_default());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_coordinate_assignment);
criterion_main!(benches);
