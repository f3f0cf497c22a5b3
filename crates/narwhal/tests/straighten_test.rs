use narwhal::seed;
use narwhal::straighten::{self, distinct_positions};
use narwhal::{
    CellId, CoordinateAssignment, CoordinateOptions, EdgeId, Error, Hierarchy, SimpleGraph,
    VertexId,
};

/// `a` on rank 0 and `b` on rank 4, joined by a chain with three dummies. When `blocker` is
/// set, an extra 10 wide vertex sits left of the dummy on rank 2.
fn long_chain(blocker: bool) -> (Hierarchy, CoordinateAssignment, CellId, Option<CellId>) {
    let mut g = SimpleGraph::new();
    let mut h = Hierarchy::new();
    g.add_vertex(VertexId(0), 10.0, 10.0);
    g.add_vertex(VertexId(1), 10.0, 10.0);
    let a = h.add_vertex(VertexId(0), 0);
    let b = h.add_vertex(VertexId(1), 4);
    let c = blocker.then(|| {
        g.add_vertex(VertexId(2), 10.0, 10.0);
        h.add_vertex(VertexId(2), 2)
    });
    let chain = h.add_edge_chain(a, b, vec![EdgeId(0)], false).unwrap();

    let mut run = CoordinateAssignment::new(&h, CoordinateOptions::default()).unwrap();
    seed::initial_coords(&mut run, &mut h, &g);
    (h, run, chain, c)
}

fn dummy_xs(h: &Hierarchy, chain: CellId) -> Vec<f64> {
    (1..4).map(|rank| h.committed_x(chain, rank)).collect()
}

fn place(h: &mut Hierarchy, chain: CellId, xs: [f64; 3]) {
    for (k, x) in xs.into_iter().enumerate() {
        h.set_x(chain, k + 1, x);
    }
}

#[test]
fn min_path_prefers_the_forward_scan_on_a_tie() {
    let (mut h, mut run, chain, _) = long_chain(false);
    place(&mut h, chain, [0.0, 30.0, 60.0]);

    straighten::min_path(&mut run, &mut h).unwrap();

    assert_eq!(dummy_xs(&h, chain), vec![0.0, 0.0, 0.0]);
    // Both slots are written.
    assert_eq!(h.trial_x(chain, 3), 0.0);
    assert_eq!(run.stats().straightened_chains, vec![chain]);
}

#[test]
fn min_path_uses_the_backward_scan_when_forward_is_blocked() {
    let (mut h, mut run, chain, c) = long_chain(true);
    h.set_x(c.unwrap(), 2, 50.0);
    place(&mut h, chain, [0.0, 100.0, 100.0]);

    straighten::min_path(&mut run, &mut h).unwrap();

    assert_eq!(dummy_xs(&h, chain), vec![100.0, 100.0, 100.0]);
}

#[test]
fn min_path_leaves_straight_chains_alone() {
    let (mut h, mut run, chain, _) = long_chain(false);
    place(&mut h, chain, [70.0, 70.0, 70.0]);

    straighten::min_path(&mut run, &mut h).unwrap();

    assert_eq!(dummy_xs(&h, chain), vec![70.0, 70.0, 70.0]);
    assert!(run.stats().straightened_chains.is_empty());
}

#[test]
fn min_path_never_adds_distinct_positions() {
    let layouts = [
        [0.0, 30.0, 60.0],
        [0.0, 100.0, 100.0],
        [100.0, 0.0, 100.0],
        [-20.0, 45.0, -20.0],
    ];
    for xs in layouts {
        let (mut h, mut run, chain, c) = long_chain(true);
        h.set_x(c.unwrap(), 2, 50.0);
        place(&mut h, chain, xs);
        let before = distinct_positions(&dummy_xs(&h, chain));

        straighten::min_path(&mut run, &mut h).unwrap();

        assert!(distinct_positions(&dummy_xs(&h, chain)) <= before, "{xs:?}");
    }
}

#[test]
fn reposition_valid_respects_the_neighbour_it_moves_towards() {
    let (mut h, run, chain, c) = long_chain(true);
    h.set_x(c.unwrap(), 2, 50.0);
    h.set_x(chain, 2, 100.0);

    // 50 + 5 + 30 + 0 = 85 is the closest the dummy may come.
    assert!(straighten::reposition_valid(&run, &h, chain, 2, 85.0).unwrap());
    assert!(!straighten::reposition_valid(&run, &h, chain, 2, 84.0).unwrap());
    // Nothing to the right.
    assert!(straighten::reposition_valid(&run, &h, chain, 2, 1000.0).unwrap());
}

#[test]
fn reposition_valid_rejects_cells_outside_the_rank() {
    let (h, run, chain, _) = long_chain(false);
    let err = straighten::reposition_valid(&run, &h, chain, 0, 10.0).unwrap_err();
    assert!(matches!(err, Error::CellNotInRank { rank: 0, .. }));
}
