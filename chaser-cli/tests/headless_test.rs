use chaser_cli::{Args, HeadlessRunner};
use chaser_core::TURN_SPEED;
use clap::Parser;
use std::f32::consts::TAU;

/// Per-axis displacement on a toroidal surface.
fn toroidal_delta(from: f32, to: f32, dimension: f32) -> f32 {
    let raw = (to - from).abs();
    raw.min(dimension - raw)
}

#[test]
fn invariants_hold_over_a_long_run() {
    let mut runner = HeadlessRunner::new(800.0, 600.0, 10, -1.0).unwrap();
    runner.run(500, |_| true);

    for chaser in runner.fleet.chasers.iter() {
        // spawn bounds: a chaser reset late in a frame keeps its raw
        // spawn pose until its own next step
        assert!(chaser.heading >= 0.0 && chaser.heading < TAU + 1.0);
        assert!(chaser.position.x >= 0.0 && chaser.position.x <= 800.0);
        assert!(chaser.position.y >= 0.0 && chaser.position.y <= 600.0);
        assert!(chaser.size >= 1.0 && chaser.size <= 2.0);
    }
}

#[test]
fn paused_fleet_never_moves() {
    let mut runner = HeadlessRunner::new(800.0, 600.0, 5, 0.0).unwrap();
    let before = runner.snapshot();

    runner.run(50, |_| true);

    let after = runner.snapshot();
    assert_eq!(after.frame, 50);
    assert_eq!(before.chasers, after.chasers);
    assert_eq!(runner.status().captures, 0);
}

#[test]
fn capture_free_frames_move_chasers_at_most_velocity() {
    let velocity = 3.0_f32;
    let mut runner = HeadlessRunner::new(800.0, 600.0, 8, velocity).unwrap();

    for _ in 0..200 {
        let before = runner.snapshot();
        let captures_before = runner.status().captures;
        runner.tick();

        if runner.status().captures != captures_before {
            // a reset teleports the caught chaser; skip those frames
            continue;
        }

        for (prev, next) in before.chasers.iter().zip(runner.snapshot().chasers.iter()) {
            assert!(toroidal_delta(prev.position.x, next.position.x, 800.0) <= velocity + 1e-3);
            assert!(toroidal_delta(prev.position.y, next.position.y, 600.0) <= velocity + 1e-3);

            let mut arc = (next.heading - prev.heading).rem_euclid(TAU);
            if arc > TAU / 2.0 {
                arc = TAU - arc;
            }
            assert!(arc <= TURN_SPEED + 1e-4);
        }
    }
}

#[test]
fn resize_rewraps_into_new_bounds() {
    let mut runner = HeadlessRunner::new(800.0, 600.0, 6, -2.0).unwrap();
    runner.run(50, |_| true);

    runner.fleet.resize(700.0, 500.0);
    runner.run(200, |_| true);

    for chaser in runner.fleet.chasers.iter() {
        assert!(chaser.position.x >= 0.0 && chaser.position.x <= 700.0);
        assert!(chaser.position.y >= 0.0 && chaser.position.y <= 500.0);
    }
}

#[test]
fn snapshot_serializes_full_fleet() {
    let mut runner = HeadlessRunner::new(800.0, 600.0, 2, -1.0).unwrap();
    runner.run(10, |_| true);

    let value = serde_json::to_value(runner.snapshot()).unwrap();
    assert_eq!(value["frame"], 10);

    let chasers = value["chasers"].as_array().unwrap();
    assert_eq!(chasers.len(), 6);
    for chaser in chasers {
        assert!(chaser["position"]["x"].is_number());
        assert!(chaser["position"]["y"].is_number());
        assert!(chaser["heading"].is_number());
        assert!(chaser["size"].is_number());
        assert!(chaser["color_index"].as_u64().unwrap() < 3);
    }
}

#[test]
fn args_defaults_match_the_visual_demo() {
    let args = Args::try_parse_from(["chaser-cli"]).unwrap();
    assert_eq!(args.width, 800.0);
    assert_eq!(args.height, 600.0);
    assert_eq!(args.cycles, 40);
    assert_eq!(args.velocity, -1.0);
    assert_eq!(args.frames, 600);
    assert!(!args.snapshot);
    assert!(!args.debug);
}

#[test]
fn args_accept_negative_velocity() {
    let args = Args::try_parse_from(["chaser-cli", "--velocity", "-5", "--frames", "100"]).unwrap();
    assert_eq!(args.velocity, -5.0);
    assert_eq!(args.frames, 100);
}
