use narwhal::median;
use narwhal::seed;
use narwhal::{
    CellId, CoordinateAssignment, CoordinateOptions, EdgeId, Hierarchy, SimpleGraph, VertexId,
};

/// Builds ranks of 10x10 vertices and seeds them.
fn seeded(
    ranks: &[usize],
    edges: &[(usize, usize)],
) -> (Hierarchy, CoordinateAssignment, Vec<CellId>) {
    let mut g = SimpleGraph::new();
    let mut h = Hierarchy::new();
    let mut ids = Vec::new();
    for (i, &rank) in ranks.iter().enumerate() {
        g.add_vertex(VertexId(i), 10.0, 10.0);
        ids.push(h.add_vertex(VertexId(i), rank));
    }
    for (i, &(s, t)) in edges.iter().enumerate() {
        h.add_edge_chain(ids[s], ids[t], vec![EdgeId(i)], false).unwrap();
    }
    let mut run = CoordinateAssignment::new(&h, CoordinateOptions::default()).unwrap();
    seed::initial_coords(&mut run, &mut h, &g);
    (h, run, ids)
}

#[test]
fn rank_median_position_moves_to_the_reference_median() {
    let (mut h, mut run, ids) = seeded(&[0, 0, 0, 1], &[(0, 3), (1, 3), (2, 3)]);
    let d = ids[3];
    h.set_x(ids[0], 0, 0.0);
    h.set_x(ids[1], 0, 40.0);
    h.set_x(ids[2], 0, 200.0);
    h.set_x(d, 1, 500.0);

    median::rank_median_position(&mut run, &mut h, 1, 0);

    assert_eq!(h.trial_x(d, 1), 40.0);
    assert_eq!(run.current_x_delta(), 0.0);
}

#[test]
fn rank_median_position_keeps_sweep_results_in_the_trial_slot() {
    let (mut h, mut run, ids) = seeded(&[0, 1], &[(0, 1)]);
    h.set_x(ids[0], 0, 0.0);
    h.set_x(ids[1], 1, 50.0);

    median::median_pos(&mut run, &mut h, 2);
    assert_eq!(h.trial_x(ids[0], 0), 50.0);
    assert_eq!(h.committed_x(ids[0], 0), 0.0);

    h.restore_committed();
    median::median_pos(&mut run, &mut h, 1);
    assert_eq!(h.trial_x(ids[1], 1), 0.0);
    assert_eq!(h.committed_x(ids[1], 1), 50.0);
}

#[test]
fn node_without_reference_neighbours_stays_put_and_adds_no_delta() {
    let (mut h, mut run, ids) = seeded(&[0, 1, 1], &[(0, 1)]);
    let (a, b, lonely) = (ids[0], ids[1], ids[2]);
    h.set_x(a, 0, 100.0);
    h.set_x(b, 1, 90.0);
    h.set_x(lonely, 1, 200.0);

    median::rank_median_position(&mut run, &mut h, 1, 0);

    assert_eq!(h.trial_x(b, 1), 100.0);
    assert_eq!(h.trial_x(lonely, 1), 200.0);
    assert_eq!(run.current_x_delta(), 0.0);
}

#[test]
fn pushing_aside_a_cell_without_reference_neighbours_adds_no_delta() {
    let (mut h, mut run, ids) = seeded(&[0, 1, 1], &[(0, 2)]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    h.set_x(a, 0, 0.0);
    h.set_x(b, 1, 0.0);
    h.set_x(c, 1, 40.0);

    median::rank_median_position(&mut run, &mut h, 1, 0);

    // `c` is heavier and goes first; `b` has no reference neighbour and is pushed left.
    assert_eq!(h.trial_x(c, 1), 0.0);
    assert_eq!(h.trial_x(b, 1), -40.0);
    assert_eq!(run.current_x_delta(), 0.0);
}

#[test]
fn placement_respects_spacing_to_placed_neighbours() {
    let (mut h, mut run, ids) = seeded(&[0, 1, 1], &[(0, 1), (0, 2)]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    h.set_x(a, 0, 100.0);
    h.set_x(b, 1, 0.0);
    h.set_x(c, 1, 300.0);

    median::rank_median_position(&mut run, &mut h, 1, 0);

    // Equal weights keep rank order: `b` takes the median, `c` stops one spacing to its right.
    assert_eq!(h.trial_x(b, 1), 100.0);
    assert_eq!(h.trial_x(c, 1), 140.0);
    assert_eq!(run.current_x_delta(), 40.0);
}

#[test]
fn measure_x_delta_sums_residual_misalignment() {
    let (mut h, run, ids) = seeded(&[0, 1, 2], &[(0, 1), (1, 2)]);
    h.set_x(ids[0], 0, 0.0);
    h.set_x(ids[1], 1, 10.0);
    h.set_x(ids[2], 2, 40.0);
    assert_eq!(median::measure_x_delta(&run, &h), 40.0);
}
