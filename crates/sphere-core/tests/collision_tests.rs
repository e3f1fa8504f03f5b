// Screen-space collision relaxation.

use glam::{Vec2, Vec3};
use sphere_core::*;

fn placed(id: &str, at: Vec2) -> ImageNode {
    let mut n = ImageNode::new(&ImageSource::new(id, id), Vec3::Z, 200.0);
    n.screen_position = at;
    n.scale = 1.0;
    n
}

#[test]
fn sparse_nodes_are_untouched() {
    let config = ViewportConfig::default();
    let mut nodes = vec![
        placed("a", Vec2::new(0.0, 0.0)),
        placed("b", Vec2::new(200.0, 0.0)),
        placed("c", Vec2::new(0.0, 200.0)),
    ];
    let before: Vec<Vec2> = nodes.iter().map(|n| n.screen_position).collect();

    let stats = CollisionResolver::new().resolve(&mut nodes, &config);
    assert_eq!(stats, CollisionStats::default());
    for (n, b) in nodes.iter().zip(before) {
        assert_eq!(n.screen_position, b);
    }
}

#[test]
fn overlap_within_padding_is_tolerated() {
    let config = ViewportConfig::default();
    // footprints 32 + 32, centres 62 apart: 2 px overlap < 4 px padding
    let mut nodes = vec![
        placed("a", Vec2::new(100.0, 100.0)),
        placed("b", Vec2::new(162.0, 100.0)),
    ];
    let stats = CollisionResolver::new().resolve(&mut nodes, &config);
    assert_eq!(stats.passes, 0);
    assert_eq!(nodes[0].screen_position, Vec2::new(100.0, 100.0));
}

#[test]
fn small_overlap_is_split_evenly_along_centre_line() {
    let config = ViewportConfig::default();
    // 64 - 58 - 4 = 2 px beyond tolerance, 1 px each
    let mut nodes = vec![
        placed("a", Vec2::new(100.0, 100.0)),
        placed("b", Vec2::new(158.0, 100.0)),
    ];
    let stats = CollisionResolver::new().resolve(&mut nodes, &config);
    assert_eq!(stats.passes, 1);
    assert_eq!(stats.initial_contacts, 1);
    assert!((nodes[0].screen_position - Vec2::new(99.0, 100.0)).length() < 1e-4);
    assert!((nodes[1].screen_position - Vec2::new(159.0, 100.0)).length() < 1e-4);
}

#[test]
fn displacement_is_capped_per_frame() {
    let config = ViewportConfig::default();
    let mut nodes = vec![
        placed("a", Vec2::new(100.0, 100.0)),
        placed("b", Vec2::new(120.0, 100.0)),
        placed("far", Vec2::new(600.0, 500.0)),
    ];
    CollisionResolver::new().resolve(&mut nodes, &config);

    let cap = config.max_collision_displacement;
    let moved_a = nodes[0].screen_position - Vec2::new(100.0, 100.0);
    let moved_b = nodes[1].screen_position - Vec2::new(120.0, 100.0);
    assert!(moved_a.length() <= cap + 1e-4);
    assert!(moved_b.length() <= cap + 1e-4);
    assert!(moved_a.x < 0.0 && moved_b.x > 0.0, "pushed apart");
    assert!(moved_a.y.abs() < 1e-5 && moved_b.y.abs() < 1e-5);
    // residual overlap is accepted
    let gap = nodes[1].screen_position.x - nodes[0].screen_position.x;
    assert!(gap < 64.0);
    assert_eq!(nodes[2].screen_position, Vec2::new(600.0, 500.0));
}

#[test]
fn coincident_nodes_separate_deterministically() {
    let config = ViewportConfig::default();
    let mk = || {
        vec![
            placed("a", Vec2::new(50.0, 50.0)),
            placed("b", Vec2::new(50.0, 50.0)),
        ]
    };
    let mut first = mk();
    let mut second = mk();
    CollisionResolver::new().resolve(&mut first, &config);
    CollisionResolver::new().resolve(&mut second, &config);

    assert!(first[0].screen_position.distance(first[1].screen_position) > 1.0);
    assert!(first.iter().all(|n| n.screen_position.is_finite()));
    assert_eq!(first[0].screen_position, second[0].screen_position);
    assert_eq!(first[1].screen_position, second[1].screen_position);
}

#[test]
fn larger_scale_means_larger_footprint() {
    let config = ViewportConfig::default();
    // 70 px apart: clear at scale 1.0, overlapping at 1.5 (48 + 48 - 70 - 4 = 22)
    let mut nodes = vec![
        placed("a", Vec2::new(0.0, 0.0)),
        placed("b", Vec2::new(70.0, 0.0)),
    ];
    let mut resolver = CollisionResolver::new();
    assert_eq!(resolver.resolve(&mut nodes, &config).passes, 0);

    nodes[0].scale = 1.5;
    nodes[1].scale = 1.5;
    assert!(resolver.resolve(&mut nodes, &config).passes > 0);
}

#[test]
fn zero_passes_disables_resolution() {
    let config = ViewportConfig {
        collision_passes: 0,
        ..ViewportConfig::default()
    };
    let mut nodes = vec![
        placed("a", Vec2::new(10.0, 10.0)),
        placed("b", Vec2::new(11.0, 10.0)),
    ];
    CollisionResolver::new().resolve(&mut nodes, &config);
    assert_eq!(nodes[0].screen_position, Vec2::new(10.0, 10.0));
    assert_eq!(nodes[1].screen_position, Vec2::new(11.0, 10.0));
}

#[test]
fn resolution_never_touches_spherical_positions() {
    let config = ViewportConfig::default();
    let mut nodes = vec![
        placed("a", Vec2::new(0.0, 0.0)),
        placed("b", Vec2::new(5.0, 0.0)),
    ];
    CollisionResolver::new().resolve(&mut nodes, &config);
    for n in &nodes {
        assert_eq!(n.spherical_position, Vec3::Z);
        assert_eq!(n.rest_position, Vec3::new(0.0, 0.0, 200.0));
    }
}
