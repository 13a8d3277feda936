mod common;

use common::{parse_map, TILE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustcaster::input::{apply_event, Direction, InputEvent};
use rustcaster::{Grid, Intent, Viewer};

fn random_intent(rng: &mut StdRng) -> Intent {
    Intent::from_sign(rng.random_range(-1..=1)).unwrap()
}

#[test]
fn test_random_walk_never_enters_wall() {
    let grid = Grid::default_map(TILE).unwrap();

    for (seed, speed) in [(1u64, 2.0), (2, 9.0), (3, 31.0)] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut viewer = Viewer::new(352.0, 352.0, 0.0, speed, 0.2, 3.0);

        for tick in 0..5000 {
            if tick % 12 == 0 {
                let turn = random_intent(&mut rng);
                let movement = random_intent(&mut rng);
                viewer.set_intents(turn, movement);
            }
            viewer.update(&grid);

            let pose = viewer.pose();
            assert!(
                !grid.is_blocked(pose.x, pose.y),
                "seed {} tick {}: viewer inside wall at ({}, {})",
                seed,
                tick,
                pose.x,
                pose.y
            );
        }
    }
}

#[test]
fn test_blocked_step_is_all_or_nothing() {
    let (grid, _) = parse_map(
        "
        ■■■
        ■s■
        ■■■",
    );
    // Facing east, 20 units from the wall face, stepping 25 per tick
    let mut viewer = Viewer::new(108.0, 96.0, 0.0, 25.0, 0.1, 3.0);
    viewer.set_intents(Intent::Neutral, Intent::Positive);

    for _ in 0..10 {
        assert!(!viewer.update(&grid));
    }
    let pose = viewer.pose();
    // Stopped short: no clamping to the wall face, no sliding along it
    assert_eq!((pose.x, pose.y), (108.0, 96.0));
}

#[test]
fn test_turning_still_applies_when_move_is_blocked() {
    let (grid, _) = parse_map(
        "
        ■■■
        ■s■
        ■■■",
    );
    let mut viewer = Viewer::new(120.0, 96.0, 0.0, 10.0, 0.5, 3.0);
    viewer.set_intents(Intent::Positive, Intent::Positive);
    viewer.update(&grid);

    assert!((viewer.pose().heading - 0.5).abs() < 1e-12);
}

#[test]
fn test_key_sequence_drives_viewer() {
    let (grid, pose) = parse_map(
        "
        ■■■■■■■
        ■s□□□□■
        ■■■■■■■",
    );
    let mut viewer = Viewer::new(pose.x, pose.y, 0.0, 4.0, 0.1, 3.0);

    apply_event(&mut viewer, InputEvent::pressed(Direction::MoveForward));
    for _ in 0..10 {
        viewer.update(&grid);
    }
    apply_event(&mut viewer, InputEvent::released(Direction::MoveForward));
    viewer.update(&grid);

    assert!((viewer.pose().x - (pose.x + 40.0)).abs() < 1e-9);
    assert!((viewer.pose().y - pose.y).abs() < 1e-9);
}
