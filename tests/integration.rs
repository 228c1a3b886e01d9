// Whole-game flows on the host: board rounds, drags resolved into drops,
// connector styling as zones fill, session timers across resets and a
// listen-and-find quiz played to the end.

use body_vocab::anchor::{AnchorProjector, ILLUSTRATION_SIZE, Rect, SceneGeometry};
use body_vocab::board::{label_body, layout};
use body_vocab::quiz::{QuizMode, QuizOutcome};
use body_vocab::drag::{DragTracker, ZoneHitBox, hit_test};
use body_vocab::session::{PlacementSession, QUIZ_FINISH_MS, QuizSession, SessionEvent};
use body_vocab::{ConfigError, DisplayPosition, Outcome, PairConfig, PlacementBoard, WordBank};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pct(part_id: &str, left: f64, top: f64) -> PairConfig {
    PairConfig::new(part_id, DisplayPosition::Percent { left, top })
}

#[test]
fn any_order_of_correct_drops_completes_the_round() {
    let pairs = layout("drag-drop").unwrap().pairs();
    for seed in 0..5 {
        let mut board = PlacementBoard::with_rng(StdRng::seed_from_u64(seed));
        board.configure(&pairs).unwrap();
        // Drop in token display order, which differs per seed.
        let order: Vec<String> = board.tokens().iter().map(|t| t.part_id.clone()).collect();
        for id in &order {
            assert_eq!(board.attempt(id, id), Outcome::Correct);
        }
        assert!(board.is_complete());
        assert_eq!(board.placed_count(), pairs.len());
        assert!(board.tokens().iter().all(|t| t.placed));
    }
}

#[test]
fn duplicate_configuration_creates_nothing() {
    let mut board = PlacementBoard::new();
    let pairs = [pct("head", 50.0, 17.0), pct("head", 50.0, 17.0)];
    let err = board.configure(&pairs).unwrap_err();
    assert_eq!(err, ConfigError::DuplicatePart("head".into()));
    assert_eq!(board.total_pairs(), 0);
    assert!(board.tokens().is_empty());
}

#[test]
fn reset_after_partial_progress_starts_over() {
    let mut board = PlacementBoard::new();
    board.configure(&label_body().pairs()).unwrap();
    board.attempt("head", "head");
    board.attempt("knee", "knee");
    board.reset().unwrap();
    assert_eq!(board.placed_count(), 0);
    assert_eq!(board.tokens().len(), 8);
    assert!(!board.is_complete());
}

#[test]
fn touch_drop_flows_through_drag_tracker_into_board() {
    let mut board = PlacementBoard::new();
    let pairs = [pct("neck", 50.0, 32.0), pct("chin", 50.0, 20.0)];
    board.configure(&pairs).unwrap();
    let boxes = vec![
        ZoneHitBox {
            part_id: "neck".into(),
            rect: Rect::new(100.0, 200.0, 60.0, 24.0),
        },
        ZoneHitBox {
            part_id: "chin".into(),
            rect: Rect::new(100.0, 120.0, 60.0, 24.0),
        },
    ];
    let mut drag = DragTracker::new();

    drag.begin("chin", 10.0, 400.0);
    drag.move_to(120.0, 210.0);
    let intent = drag.finish(hit_test(&boxes, 120.0, 210.0)).unwrap();
    let outcome = board.attempt(&intent.zone_part_id, &intent.token_part_id);
    assert_eq!(outcome, Outcome::Incorrect);

    drag.begin("chin", 10.0, 400.0);
    assert!(drag.finish(hit_test(&boxes, 500.0, 500.0)).is_none());
    assert!(!drag.is_dragging());

    drag.begin("chin", 10.0, 400.0);
    let intent = drag.finish(hit_test(&boxes, 110.0, 130.0)).unwrap();
    let outcome = board.attempt(&intent.zone_part_id, &intent.token_part_id);
    assert_eq!(outcome, Outcome::Correct);
}

#[test]
fn connectors_follow_fill_state_through_a_session() {
    let mut session = PlacementSession::single(label_body()).unwrap();
    let geometry = SceneGeometry {
        container: Rect::new(0.0, 0.0, 300.0, 650.0),
        illustration: Rect::new(50.0, 0.0, 200.0, 325.0),
        intrinsic: ILLUSTRATION_SIZE,
    };
    let projector = AnchorProjector::default();
    let before = projector.connectors(session.board().zones(), &geometry);
    assert_eq!(before.len(), 8);
    assert!(before.iter().all(|c| !c.style.dash.is_empty()));

    session.drop_token("chest", "chest", 0.0);
    let after = projector.connectors(session.board().zones(), &geometry);
    let chest = after.iter().find(|c| c.part_id == "chest").unwrap();
    assert!(chest.style.dash.is_empty());
    assert_eq!(after.iter().filter(|c| c.style.dash.is_empty()).count(), 1);
}

#[test]
fn session_timers_do_not_survive_reset() {
    let mut session = PlacementSession::single(label_body()).unwrap();
    let zones = session.board().zones();
    let ids: Vec<String> = zones.iter().map(|z| z.part_id.clone()).collect();
    for id in &ids {
        session.drop_token(id, id, 100.0);
    }
    assert!(session.is_finished());
    session.reset().unwrap();
    assert_eq!(session.tick(5_000.0), Vec::<SessionEvent>::new());
    assert!(!session.restart_visible());
}

#[test]
fn listen_quiz_celebrates_once_then_restarts_cleanly() {
    let bank = WordBank::body_parts();
    let rng = StdRng::seed_from_u64(3);
    let mut session = QuizSession::with_rng(QuizMode::ListenFind, bank, rng);

    let first = session.quiz().current().unwrap();
    let prompt = session.quiz().listen_prompt().unwrap();
    assert_eq!(prompt, format!("Touch the {}", first.id));
    let wrong = if first.id == "head" { "knee" } else { "head" };
    assert_eq!(session.answer(wrong, 0.0), QuizOutcome::Incorrect);
    assert_eq!(session.feedback().text(), "❌ Try again");

    let mut now = 0.0;
    while let Some(entry) = session.quiz().current() {
        now += 10.0;
        assert_eq!(session.answer(entry.id, now), QuizOutcome::Correct);
    }
    assert_eq!(session.answer("head", now), QuizOutcome::Finished);
    assert!(session.tick(now + QUIZ_FINISH_MS - 1.0).is_empty());
    let events = session.tick(now + QUIZ_FINISH_MS);
    assert_eq!(events, vec![SessionEvent::Celebrate]);
    assert_eq!(session.feedback().text(), "🎉 Excellent! All done!");
    assert!(session.restart_visible());

    session.restart();
    assert!(!session.restart_visible());
    assert_eq!(session.quiz().progress(), 0.0);
    assert!(session.tick(now + 10_000.0).is_empty());
}
