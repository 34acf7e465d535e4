use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use strata::graph::Graph;
use strata::{LayoutConfig, Size, acyclic, layout, rank};

#[derive(Debug, Clone)]
struct GraphSpec {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl GraphSpec {
    fn build(&self) -> Graph<Size, ()> {
        let mut g: Graph<Size, ()> = Graph::new();
        let nodes: Vec<_> = (0..self.node_count)
            .map(|i| {
                g.new_node(Size::new(20.0 + (i % 7) as f64 * 5.0, 30.0))
                    .expect("unbounded pool")
            })
            .collect();
        for &(from, to) in &self.edges {
            g.new_edge(nodes[from], nodes[to], ()).expect("live endpoints");
        }
        g
    }
}

fn build_spec(node_count: usize, fanout: usize, back_every: usize) -> GraphSpec {
    let mut edges: Vec<(usize, usize)> = Vec::new();

    // A spine to guarantee connectivity.
    for i in 0..node_count.saturating_sub(1) {
        edges.push((i, i + 1));
    }
    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            let to = i + k * 3;
            if to >= node_count {
                break;
            }
            edges.push((i, to));
        }
        // Cycles for the classifier to break.
        if back_every > 0 && i % back_every == 0 && i >= 5 {
            edges.push((i, i - 5));
        }
    }

    GraphSpec { node_count, edges }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("dag_50_f2", build_spec(50, 2, 0)),
        ("dag_400_f3", build_spec(400, 3, 0)),
        ("cyclic_400_f3", build_spec(400, 3, 7)),
    ];
    let config = LayoutConfig::default();

    for (name, spec) in &cases {
        group.bench_with_input(BenchmarkId::new("layout", name), spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut g| {
                    let out = layout(black_box(&mut g), &config).expect("layout succeeds");
                    black_box(out.max_rank);
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("rank", name), spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut g| {
                    let classification = acyclic::run(&mut g).expect("classify");
                    let ranking = rank::run(&mut g, &classification).expect("rank");
                    black_box(ranking.max_rank());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
