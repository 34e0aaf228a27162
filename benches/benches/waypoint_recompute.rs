// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_scroll_tree::{LocalNode, NodeId, Overflow, OverflowStyle, Tree};
use understory_waypoint::adapters::scroll_tree::ScrollTreeHost;
use understory_waypoint::ancestor::{ScrollableAncestor, find_scrollable_ancestor};
use understory_waypoint::position::classify;
use understory_waypoint::tracker::PositionTracker;
use understory_waypoint::{Axis, Bounds, Children, EventKind, Waypoint, WaypointOptions};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_bounds(count: usize, seed: u64) -> Vec<Bounds> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let top = rng.next_f64() * 4000.0 - 2000.0;
            let height = rng.next_f64() * 200.0;
            Bounds {
                waypoint_top: top,
                waypoint_bottom: top + height,
                viewport_top: 0.0,
                viewport_bottom: 800.0,
            }
        })
        .collect()
}

/// A scrolling list of `rows` 20px rows, `depth` levels below the list.
fn gen_list(rows: usize, depth: usize) -> (ScrollTreeHost, NodeId, Vec<NodeId>) {
    let mut tree = Tree::with_viewport(Size::new(1280.0, 800.0));
    let body = tree.insert(
        None,
        LocalNode {
            bounds: Rect::new(0.0, 0.0, 1280.0, 800.0),
            ..Default::default()
        },
    );
    let list = tree.insert(
        Some(body),
        LocalNode {
            bounds: Rect::new(0.0, 0.0, 400.0, 800.0),
            overflow: OverflowStyle::y(Overflow::Auto),
            ..Default::default()
        },
    );
    let mut parent = list;
    for _ in 0..depth {
        parent = tree.insert(
            Some(parent),
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 400.0, 20.0 * rows as f64),
                ..Default::default()
            },
        );
    }
    let leaves = (0..rows)
        .map(|i| {
            let y = 20.0 * i as f64;
            tree.insert(
                Some(parent),
                LocalNode {
                    bounds: Rect::new(0.0, y, 400.0, y + 20.0),
                    ..Default::default()
                },
            )
        })
        .collect();
    (ScrollTreeHost::new(tree), list, leaves)
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for &n in &[1_000_usize, 10_000] {
        let bounds = gen_random_bounds(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_{n}"), |b| {
            b.iter(|| {
                let mut inside = 0_usize;
                for bb in &bounds {
                    if classify(black_box(bb)) == understory_waypoint::Position::Inside {
                        inside += 1;
                    }
                }
                black_box(inside)
            });
        });
        group.bench_function(format!("tracker_{n}"), |b| {
            b.iter_batched(
                PositionTracker::default,
                |mut tracker| {
                    let mut fired = 0_usize;
                    for bb in &bounds {
                        fired += tracker.update(bb).len();
                    }
                    black_box(fired)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_ancestor(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_scrollable_ancestor");
    for &depth in &[1_usize, 16, 64] {
        let (host, _, leaves) = gen_list(16, depth);
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                for leaf in &leaves {
                    black_box(find_scrollable_ancestor(
                        &host,
                        leaf,
                        &ScrollableAncestor::Auto,
                        Axis::Vertical,
                    ));
                }
            });
        });
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    for &rows in &[100_usize, 1_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("scroll_list_{rows}"), |b| {
            b.iter_batched(
                || {
                    let (mut host, list, leaves) = gen_list(rows, 2);
                    let mut waypoints: Vec<Waypoint<NodeId, EventKind, ScrollTreeHost>> = leaves
                        .iter()
                        .map(|leaf| {
                            let mut w =
                                Waypoint::new(WaypointOptions::default(), &Children::None).unwrap();
                            w.set_node(Some(*leaf));
                            w.attach(&mut host);
                            w
                        })
                        .collect();
                    for tick in host.run_ticks() {
                        for w in &mut waypoints {
                            if w.on_tick(&mut host, tick).unwrap() {
                                break;
                            }
                        }
                    }
                    (host, list, waypoints)
                },
                |(mut host, list, mut waypoints)| {
                    for step in 1..=10 {
                        host.tree_mut()
                            .set_scroll_offset(list, Vec2::new(0.0, 200.0 * f64::from(step)));
                        for w in &mut waypoints {
                            black_box(w.handle_event(&mut host, &EventKind::Scroll));
                        }
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_ancestor, bench_recompute);
criterion_main!(benches);
