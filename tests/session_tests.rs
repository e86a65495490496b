//! Engine session: event ordering and the gravity timer

use blockfall::engine::{EngineConfig, EngineEvent, Session, SessionEvent, StampedEvent};
use blockfall::types::GameAction;

fn session(seed: u32, tick_ms: u32) -> Session {
    let config = EngineConfig::default().with_seed(seed).with_tick_ms(tick_ms);
    let mut session = Session::new(config);
    session.start();
    session.take_events();
    session
}

#[test]
fn test_nothing_happens_before_start() {
    let mut s = Session::new(EngineConfig::default());
    s.push_action(GameAction::MoveRight);
    s.advance(10_000);
    assert!(!s.game().started());
    assert_eq!(s.game().active().x, 0);
    assert_eq!(
        s.take_events(),
        vec![StampedEvent {
            at_ms: 0,
            event: SessionEvent::Rejected {
                action: GameAction::MoveRight
            }
        }]
    );
}

#[test]
fn test_events_are_processed_in_arrival_order() {
    let mut s = session(8, 1200);
    s.push_action(GameAction::MoveRight);
    s.push_action(GameAction::MoveRight);
    s.push_action(GameAction::MoveLeft);
    s.advance(0);

    assert_eq!(s.game().active().x, 1);
    let moved: Vec<GameAction> = s
        .take_events()
        .into_iter()
        .filter_map(|e| match e.event {
            SessionEvent::Moved { action, .. } => Some(action),
            _ => None,
        })
        .collect();
    assert_eq!(
        moved,
        vec![GameAction::MoveRight, GameAction::MoveRight, GameAction::MoveLeft]
    );
}

#[test]
fn test_custom_tick_interval() {
    let mut s = session(8, 100);
    s.advance(350);
    assert_eq!(s.game().active().y, 3);
    assert_eq!(s.timer().deadline_ms(), Some(400));
}

#[test]
fn test_moves_postpone_gravity() {
    let mut s = session(8, 1000);
    for _ in 0..5 {
        s.advance(900);
        s.push_action(GameAction::MoveRight);
        s.push_action(GameAction::MoveLeft);
        s.advance(0);
    }
    // Each successful move restarted the interval.
    assert_eq!(s.game().active().y, 0);
    assert_eq!(s.now_ms(), 4500);
}

#[test]
fn test_timer_event_from_an_older_arming_is_ignored() {
    let mut s = session(8, 1000);
    let old = s.timer().clone();
    s.push_action(GameAction::MoveRight);
    s.advance(0);

    // Replay a fire against the arming that existed before the move.
    let mut replay = old;
    let token = replay.due(1000).expect("old arming fires");
    s.process(EngineEvent::TimerFired(token));
    assert_eq!(s.game().active().y, 0);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::MoveDown,
        GameAction::MoveRight,
    ];
    let run = || {
        let mut s = session(4242, 300);
        for (i, action) in script.iter().cycle().take(400).enumerate() {
            s.push_action(*action);
            s.advance((i % 5) as u32 * 40);
        }
        s.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_zero_tick_period_still_advances() {
    let config = EngineConfig {
        tick_ms: 0,
        seed: 8,
    };
    let mut s = Session::new(config);
    s.start();
    s.advance(3);
    assert_eq!(s.now_ms(), 3);
    assert_eq!(s.game().active().y, 3);
}

#[test]
fn test_gravity_events_are_stamped_at_their_deadlines() {
    let mut s = session(8, 500);
    s.advance(1000);
    s.push_action(GameAction::MoveRight);
    s.advance(700);

    let stamped: Vec<(u64, bool)> = s
        .take_events()
        .into_iter()
        .map(|e| (e.at_ms, matches!(e.event, SessionEvent::Descended { .. })))
        .collect();
    assert_eq!(
        stamped,
        vec![(500, true), (1000, true), (1000, false), (1500, true)]
    );
}
