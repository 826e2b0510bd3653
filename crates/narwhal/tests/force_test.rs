use narwhal::{Error, Particle, SectorForce, SectorSpec, SimNode, Strength, pack};

fn particles(n: usize) -> Vec<Particle> {
    (0..n).map(|i| Particle::at(i as f64, -(i as f64))).collect()
}

#[test]
fn setters_chain_and_recompute_targets() {
    let nodes = particles(200);
    let mut force = SectorForce::new(0.0, 10.0).unwrap();
    force.initialize(&nodes);
    force
        .set_radiuses([100.0, 500.0])
        .unwrap()
        .set_angles([15.0, 60.0])
        .unwrap()
        .set_strength(0.3);

    assert_eq!(force.radiuses(), [100.0, 500.0]);
    assert_eq!(force.angles(), [15.0, 60.0]);
    assert_eq!(force.strengths(), vec![0.3; 200].as_slice());

    let expected = pack(&SectorSpec::new(100.0, 500.0, 15.0, 60.0).unwrap(), 200);
    assert_eq!(force.targets().collect::<Vec<_>>(), expected);
    assert_eq!(force.xz().len(), 200);
    assert_eq!(force.yz().len(), 200);
}

#[test]
fn rejected_setter_keeps_previous_configuration() {
    let mut force: SectorForce<Particle> = SectorForce::new(10.0, 20.0).unwrap();
    let err = force.set_radiuses([30.0, 20.0]).unwrap_err();
    assert_eq!(
        err,
        Error::InvertedRadii {
            inner: 30.0,
            outer: 20.0
        }
    );
    assert_eq!(force.radiuses(), [10.0, 20.0]);
    assert!(force.set_angles([0.0, f64::NAN]).is_err());
    assert_eq!(force.angles(), [0.0, 360.0]);
}

#[test]
fn apply_nudges_velocity_toward_target() {
    let mut nodes = particles(5);
    let mut force = SectorForce::new(50.0, 100.0).unwrap();
    force.initialize(&nodes);
    force.set_strength(0.5);

    let before = nodes.clone();
    let alpha = 0.25;
    force.apply(&mut nodes, alpha);

    for (i, (node, prev)) in nodes.iter().zip(&before).enumerate() {
        let k = 0.5 * alpha;
        let dvx = (force.xz()[i] - prev.x()) * k;
        let dvy = (force.yz()[i] - prev.y()) * k;
        assert_eq!(node.vx, dvx);
        assert_eq!(node.vy, dvy);
        // Positions are the engine's responsibility.
        assert_eq!(node.x, prev.x);
        assert_eq!(node.y, prev.y);
    }
}

#[test]
fn apply_with_zero_alpha_is_a_no_op() {
    let mut nodes = particles(4);
    let mut force = SectorForce::new(1.0, 5.0).unwrap();
    force.initialize(&nodes);
    force.apply(&mut nodes, 0.0);
    assert!(nodes.iter().all(|n| n.vx == 0.0 && n.vy == 0.0));
}

#[test]
fn apply_reinitializes_when_node_count_changes() {
    let mut nodes = particles(3);
    let mut force = SectorForce::new(0.0, 100.0).unwrap();
    force.initialize(&nodes);
    assert_eq!(force.node_count(), 3);

    nodes.extend(particles(7));
    force.apply(&mut nodes, 1.0);
    assert_eq!(force.node_count(), 10);
    assert_eq!(force.strengths().len(), 10);
    assert_eq!(
        force.targets().collect::<Vec<_>>(),
        pack(force.spec(), 10)
    );
}

#[test]
fn per_node_strength_receives_index_and_slice() {
    let nodes = particles(4);
    let mut force = SectorForce::new(0.0, 100.0).unwrap();
    force.set_strength(Strength::per_node(|node: &Particle, i, all| {
        node.x + i as f64 + all.len() as f64
    }));
    force.initialize(&nodes);
    assert_eq!(force.strengths(), &[4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn repeated_initialize_is_idempotent() {
    let nodes = particles(64);
    let mut force = SectorForce::from_spec(SectorSpec::new(20.0, 200.0, -30.0, 90.0).unwrap());
    force.initialize(&nodes);
    let first: Vec<_> = force.targets().collect();
    force.initialize(&nodes);
    assert_eq!(force.targets().collect::<Vec<_>>(), first);
}

#[test]
fn nodes_settle_on_targets_under_simple_integration() {
    // Host-engine style stepping: velocity decay, then position update.
    let mut nodes = particles(30);
    let mut force = SectorForce::new(40.0, 120.0).unwrap();
    force.set_angles([0.0, 90.0]).unwrap().set_strength(0.3);
    force.initialize(&nodes);

    let mut alpha = 1.0;
    for _ in 0..300 {
        force.apply(&mut nodes, alpha);
        for n in &mut nodes {
            n.vx *= 0.6;
            n.vy *= 0.6;
            n.x += n.vx;
            n.y += n.vy;
        }
        alpha += (0.001 - alpha) * 0.0228;
    }

    for (n, t) in nodes.iter().zip(force.targets()) {
        assert!((n.x - t.x).abs() < 1.0 && (n.y - t.y).abs() < 1.0);
    }
}
