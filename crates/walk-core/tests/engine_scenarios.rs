//! Integration tests for the walking engine.
//!
//! These drive full sessions through the public API against a fixture
//! spiral map, with pacing set to zero so drains settle immediately.

use std::path::Path;

use walk_core::cast::Cast;
use walk_core::config::EngineConfig;
use walk_core::grid::CubeCoord;
use walk_core::logger::EventLogger;
use walk_core::map_data::SpiralMap;
use walk_core::movement::MovementPhase;
use walk_core::store::{CastOutcome, Engine};
use walk_events::{Event, EventDetail, ResourceCause};

fn zero_pacing_config() -> EngineConfig {
    EngineConfig::from_str(
        r#"
        [pacing]
        step_ms = 0
        fall_ms = 0
        respawn_ms = 0
    "#,
    )
    .unwrap()
}

fn load_fixture_map() -> SpiralMap {
    SpiralMap::load(Path::new("tests/fixtures/sample_spiral_map.json"))
}

/// Builds a cast whose changing lines sit at the given positions.
fn cast_with_changing(lines: &[u8]) -> Cast {
    let mut values = [7u8; 6];
    for &line in lines {
        values[(line - 1) as usize] = 9;
    }
    Cast::from_values(values).unwrap()
}

#[test]
fn test_fixture_map_loads() {
    let map = load_fixture_map();
    assert_eq!(map.len(), 4);

    let gates: Vec<u32> = map.aspect_gates().into_iter().collect();
    assert_eq!(gates, vec![13, 41]);
}

/// A full session: walk north off the grid, then recover by covering
/// every aspect gate.
#[tokio::test]
async fn test_fall_and_cycle_recovery_session() {
    let mut engine = Engine::new(zero_pacing_config(), 42);
    engine.set_map(load_fixture_map());

    // Five readings walk straight north to the boundary cell (0, -5).
    for _ in 0..5 {
        assert!(matches!(
            engine.apply_cast(cast_with_changing(&[6])),
            CastOutcome::PlanReady(_)
        ));
        engine.advance_all().await;
    }
    assert_eq!(engine.actor(), CubeCoord::from_axial(0, -5));
    assert_eq!(engine.counters().consulting_interval, 1);

    // The sixth northward step leaves the table: fall, jing penalty,
    // and (independently) the interval expires this reading.
    engine.apply_cast(cast_with_changing(&[6]));
    engine.advance_all().await;
    assert_eq!(engine.actor(), CubeCoord::ORIGIN);
    assert_eq!(engine.phase(), MovementPhase::Idle);
    assert_eq!(engine.counters().jing, 2);
    assert_eq!(engine.counters().qi, 2);
    assert_eq!(engine.counters().consulting_interval, 6);

    let events = engine.drain_events();
    let fell_at = events
        .iter()
        .position(|e| matches!(e.detail, EventDetail::FellOffGrid { .. }))
        .expect("expected a fall");
    let respawned_at = events
        .iter()
        .position(|e| matches!(e.detail, EventDetail::Respawned { .. }))
        .expect("expected a respawn");
    assert!(fell_at < respawned_at, "fall must be observable first");

    // Southwest onto gate 41: the gate bonus restores a point of qi.
    engine.apply_cast(cast_with_changing(&[3]));
    engine.advance_all().await;
    assert_eq!(engine.counters().qi, 3);
    assert_eq!(engine.selected(), Some(engine.actor().to_pos()));

    // Back to the center, then southeast onto gate 13: every known
    // aspect gate has now been visited, which restores jing and resets
    // the cycle.
    engine.apply_cast(cast_with_changing(&[4]));
    engine.advance_all().await;
    engine.apply_cast(cast_with_changing(&[2]));
    engine.advance_all().await;

    assert_eq!(engine.counters().jing, 3);
    assert!(engine.visited_gates().is_empty());

    let events = engine.drain_events();
    let cycles = events
        .iter()
        .filter(|e| matches!(e.detail, EventDetail::CycleCompleted { .. }))
        .count();
    assert_eq!(cycles, 1);
    assert!(events.iter().any(|e| matches!(
        e.detail,
        EventDetail::JingChanged {
            cause: ResourceCause::CycleBonus,
            ..
        }
    )));
}

/// Counters never leave [0, 3] and the actor never rests off the grid,
/// whatever a seeded random session throws at the engine.
#[tokio::test]
async fn test_random_session_stays_bounded() {
    let mut engine = Engine::new(zero_pacing_config(), 7);
    engine.set_map(load_fixture_map());
    let grid = engine.grid().clone();

    for round in 0..100u32 {
        match engine.cast_reading() {
            CastOutcome::PlanReady(_) => {
                engine.advance_all().await;
            }
            CastOutcome::Degenerate(_) => {}
            CastOutcome::Held(_) | CastOutcome::Busy => {
                panic!("unexpected outcome in a non-listening session")
            }
        }
        if round % 7 == 0 {
            engine.charge_qi();
        }
        engine.drain_events();

        let counters = engine.counters();
        assert!(counters.qi <= 3);
        assert!(counters.jing <= 3);
        assert!((1..=6).contains(&counters.consulting_interval));
        assert!(grid.contains(engine.actor()));
        assert_eq!(engine.phase(), MovementPhase::Idle);
    }
}

/// Events written through the logger read back as valid JSONL.
#[tokio::test]
async fn test_session_events_round_trip_through_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");

    let mut engine = Engine::new(zero_pacing_config(), 42);
    engine.set_map(load_fixture_map());

    let mut logger = EventLogger::new(&path).unwrap();
    for _ in 0..5 {
        if matches!(engine.cast_reading(), CastOutcome::PlanReady(_)) {
            engine.advance_all().await;
        }
        logger.log_batch(&engine.drain_events()).unwrap();
    }
    logger.flush().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<Event> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("valid event JSON"))
        .collect();

    assert_eq!(events.len() as u64, logger.event_count());
    assert!(!events.is_empty());
    // Sequences are strictly increasing across the session
    for pair in events.windows(2) {
        assert!(pair[0].sequence < pair[1].sequence);
    }
}

/// A degenerate reading selects the current cell instead of moving.
#[test]
fn test_degenerate_reading_focuses_current_cell() {
    let mut engine = Engine::new(zero_pacing_config(), 42);
    engine.set_map(load_fixture_map());

    let outcome = engine.apply_cast(Cast::from_values([7, 8, 8, 7, 7, 8]).unwrap());
    match outcome {
        CastOutcome::Degenerate(reading) => {
            assert!(reading.changing_lines.is_empty());
            assert_eq!(reading.earthly, reading.heavenly);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(engine.actor(), CubeCoord::ORIGIN);
    assert_eq!(engine.selected(), Some(engine.actor().to_pos()));
}
