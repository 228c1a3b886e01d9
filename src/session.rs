//! Game flow: feedback, delayed celebration, stages.
//!
//! A placement session runs one or more layouts in sequence. Drag-drop and
//! label-body are single-stage; build-the-body assembles pieces first and
//! then labels them. Finishing a non-final stage advances after
//! [`STAGE_ADVANCE_MS`]; finishing the last one celebrates after
//! [`CELEBRATE_MS`]. Every delayed event belongs to the round it was
//! scheduled in, so a reset (or a stage change) silently discards anything
//! still pending.
//!
//! [`QuizSession`] does the same for the click-word and listen-and-find
//! quizzes.

use std::borrow::Cow;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::board::{ConfigError, LayoutDesc, Outcome, PlacementBoard, build_assembly, build_labels};
use crate::feedback::{FeedbackChannel, FeedbackConfig};
use crate::quiz::{QuizMode, QuizOutcome, WordQuiz};
use crate::timers::RoundTimers;
use crate::words::WordBank;

pub const CELEBRATE_MS: f64 = 500.0;
pub const STAGE_ADVANCE_MS: f64 = 1_000.0;
/// Pause between the last correct quiz answer and the completion message.
pub const QUIZ_FINISH_MS: f64 = 1_200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Final stage complete; restart becomes available.
    Celebrate,
    /// Move on to the next stage's layout.
    AdvanceStage,
}

pub struct PlacementSession<R: Rng = ThreadRng> {
    stages: Vec<Cow<'static, LayoutDesc>>,
    stage: usize,
    board: PlacementBoard<R>,
    feedback: FeedbackChannel,
    timers: RoundTimers<SessionEvent>,
    restart_visible: bool,
}

impl PlacementSession<ThreadRng> {
    pub fn single(layout: &'static LayoutDesc) -> Result<Self, ConfigError> {
        Self::with_rng(vec![Cow::Borrowed(layout)], rand::thread_rng())
    }

    /// One-stage session over a layout built at runtime.
    pub fn custom(layout: LayoutDesc) -> Result<Self, ConfigError> {
        Self::with_rng(vec![Cow::Owned(layout)], rand::thread_rng())
    }

    pub fn build_body() -> Result<Self, ConfigError> {
        let stages = vec![Cow::Borrowed(build_assembly()), Cow::Borrowed(build_labels())];
        Self::with_rng(stages, rand::thread_rng())
    }
}

impl<R: Rng> PlacementSession<R> {
    pub fn with_rng(stages: Vec<Cow<'static, LayoutDesc>>, rng: R) -> Result<Self, ConfigError> {
        let first = stages.first().ok_or(ConfigError::Empty)?;
        let mut board = PlacementBoard::with_rng(rng);
        board.configure(&first.pairs())?;
        Ok(Self {
            stages,
            stage: 0,
            board,
            feedback: FeedbackChannel::new(FeedbackConfig::default()),
            timers: RoundTimers::new(),
            restart_visible: false,
        })
    }

    pub fn layout(&self) -> &LayoutDesc {
        &self.stages[self.stage]
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn board(&self) -> &PlacementBoard<R> {
        &self.board
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn restart_visible(&self) -> bool {
        self.restart_visible
    }

    pub fn is_finished(&self) -> bool {
        self.is_last_stage() && self.board.is_complete()
    }

    fn is_last_stage(&self) -> bool {
        self.stage + 1 == self.stages.len()
    }

    /// Adjudicate a drop and report it. Repeat drops on a filled zone stay silent.
    pub fn drop_token(&mut self, zone_part_id: &str, token_part_id: &str, now_ms: f64) -> Outcome {
        let outcome = self.board.attempt(zone_part_id, token_part_id);
        match outcome {
            Outcome::Correct => {
                self.feedback.notify(true, None, now_ms);
                if self.board.is_complete() {
                    let (delay, event) = if self.is_last_stage() {
                        (CELEBRATE_MS, SessionEvent::Celebrate)
                    } else {
                        (STAGE_ADVANCE_MS, SessionEvent::AdvanceStage)
                    };
                    let round = self.board.round();
                    self.timers.schedule(round, now_ms + delay, event);
                }
            }
            Outcome::Incorrect => {
                self.feedback.notify(false, None, now_ms);
            }
            Outcome::AlreadyFilled => {}
        }
        outcome
    }

    /// Typed labeling: resolve the typed word, then adjudicate it like a drop.
    pub fn type_answer(
        &mut self,
        zone_part_id: &str,
        input: &str,
        bank: &WordBank,
        now_ms: f64,
    ) -> Outcome {
        let token = bank.find_by_word(input).map_or("", |e| e.id);
        self.drop_token(zone_part_id, token, now_ms)
    }

    /// Advance time: expire feedback and run any due events.
    pub fn tick(&mut self, now_ms: f64) -> Vec<SessionEvent> {
        self.feedback.tick(now_ms);
        let events = self.timers.due(now_ms, self.board.round());
        for event in &events {
            match event {
                SessionEvent::Celebrate => {
                    let message = self.layout().completion_message;
                    self.feedback.notify(true, Some(message), now_ms);
                    self.restart_visible = true;
                }
                SessionEvent::AdvanceStage => self.advance(now_ms),
            }
        }
        events
    }

    fn advance(&mut self, now_ms: f64) {
        let Some(next) = self.stages.get(self.stage + 1) else {
            return;
        };
        match self.board.configure(&next.pairs()) {
            Ok(()) => {
                let finished = &self.stages[self.stage];
                log::info!(
                    "stage '{}' complete, starting '{}'",
                    finished.name,
                    next.name
                );
                let message = finished.completion_message;
                self.feedback.notify(true, Some(message), now_ms);
                self.stage += 1;
            }
            Err(err) => log::error!("cannot start stage '{}': {err}", next.name),
        }
    }

    /// Back to the first stage with a fresh shuffle; pending timers and feedback are dropped.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.board.configure(&self.stages[0].pairs())?;
        self.stage = 0;
        self.timers.cancel_all();
        self.feedback.clear();
        self.restart_visible = false;
        Ok(())
    }

    /// (part id, caption) for each unplaced-or-placed token, in display order.
    pub fn token_captions(&self, bank: &WordBank) -> Vec<(String, &'static str)> {
        let layout = self.layout();
        self.board
            .tokens()
            .iter()
            .filter_map(|t| {
                let caption = layout.caption(bank, &t.part_id)?;
                Some((t.part_id.clone(), caption))
            })
            .collect()
    }
}

// --- Quiz ----------------------------------------------------------------------

pub struct QuizSession<R: Rng = ThreadRng> {
    mode: QuizMode,
    quiz: WordQuiz<R>,
    feedback: FeedbackChannel,
    timers: RoundTimers<SessionEvent>,
    round: u64,
    restart_visible: bool,
}

impl QuizSession<ThreadRng> {
    pub fn new(mode: QuizMode) -> Self {
        Self::with_rng(mode, WordBank::body_parts(), rand::thread_rng())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(mode: QuizMode, bank: WordBank, rng: R) -> Self {
        Self {
            mode,
            quiz: WordQuiz::with_rng(bank, rng),
            feedback: FeedbackChannel::new(FeedbackConfig::default()),
            timers: RoundTimers::new(),
            round: 0,
            restart_visible: false,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn quiz(&self) -> &WordQuiz<R> {
        &self.quiz
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn restart_visible(&self) -> bool {
        self.restart_visible
    }

    /// Check a clicked part. Answers after the last word are ignored.
    pub fn answer(&mut self, part_id: &str, now_ms: f64) -> QuizOutcome {
        let outcome = self.quiz.answer(part_id);
        match outcome {
            QuizOutcome::Correct => {
                self.feedback.notify(true, None, now_ms);
                if self.quiz.is_finished() {
                    let due = now_ms + QUIZ_FINISH_MS;
                    let event = SessionEvent::Celebrate;
                    self.timers.schedule(self.round, due, event);
                }
            }
            QuizOutcome::Incorrect => {
                self.feedback.notify(false, None, now_ms);
            }
            QuizOutcome::Finished => {}
        }
        outcome
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<SessionEvent> {
        self.feedback.tick(now_ms);
        let events = self.timers.due(now_ms, self.round);
        if events.contains(&SessionEvent::Celebrate) {
            let message = self.mode.completion_message();
            self.feedback.notify(true, Some(message), now_ms);
            self.restart_visible = true;
            log::info!("{} quiz complete", self.mode.name());
        }
        events
    }

    /// New shuffle from the first word; pending completion and feedback are dropped.
    pub fn restart(&mut self) {
        self.quiz.restart();
        self.round += 1;
        self.timers.cancel_all();
        self.feedback.clear();
        self.restart_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DisplayPosition, PairConfig, drag_drop, label_body};
    use crate::words::LookupError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single(layout: &'static LayoutDesc) -> PlacementSession<StdRng> {
        let stages = vec![Cow::Borrowed(layout)];
        PlacementSession::with_rng(stages, StdRng::seed_from_u64(11)).unwrap()
    }

    fn build_body(seed: u64) -> PlacementSession<StdRng> {
        let stages = vec![Cow::Borrowed(build_assembly()), Cow::Borrowed(build_labels())];
        PlacementSession::with_rng(stages, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn fill_all<R: Rng>(s: &mut PlacementSession<R>, now: f64) {
        let zones = s.board().zones().to_vec();
        for z in zones {
            assert_eq!(s.drop_token(&z.part_id, &z.part_id, now), Outcome::Correct);
        }
    }

    fn pct(part_id: &str, left: f64, top: f64) -> PairConfig {
        PairConfig::new(part_id, DisplayPosition::Percent { left, top })
    }

    fn quiz(mode: QuizMode) -> QuizSession<StdRng> {
        QuizSession::with_rng(mode, WordBank::body_parts(), StdRng::seed_from_u64(2))
    }

    fn answer_all<R: Rng>(q: &mut QuizSession<R>, now: f64) {
        while let Some(entry) = q.quiz().current() {
            assert_eq!(q.answer(entry.id, now), QuizOutcome::Correct);
        }
    }

    #[test]
    fn completion_celebrates_after_delay() {
        let mut s = single(label_body());
        fill_all(&mut s, 1_000.0);
        assert!(s.tick(1_400.0).is_empty());
        assert_eq!(s.tick(1_500.0), vec![SessionEvent::Celebrate]);
        assert_eq!(s.feedback().text(), "🎉 All parts labeled!");
        assert!(s.restart_visible());
        assert!(s.is_finished());
    }

    #[test]
    fn reset_discards_pending_celebration() {
        let mut s = single(drag_drop());
        fill_all(&mut s, 0.0);
        s.reset().unwrap();
        assert!(s.tick(10_000.0).is_empty());
        assert!(!s.restart_visible());
        assert_eq!(s.board().placed_count(), 0);
        assert!(s.feedback().current().is_none());
    }

    #[test]
    fn repeat_drop_is_silent() {
        let mut s = single(label_body());
        s.drop_token("head", "head", 0.0);
        s.tick(2_000.0);
        assert!(s.feedback().current().is_none());
        assert_eq!(
            s.drop_token("head", "head", 2_100.0),
            Outcome::AlreadyFilled
        );
        assert!(s.feedback().current().is_none());
    }

    #[test]
    fn wrong_drop_shows_retry_feedback() {
        let mut s = single(label_body());
        assert_eq!(s.drop_token("head", "foot", 0.0), Outcome::Incorrect);
        assert_eq!(s.feedback().text(), "❌ Try again");
    }

    #[test]
    fn typed_answers_resolve_through_bank() {
        let bank = WordBank::body_parts();
        let mut s = single(label_body());
        let typed = s.type_answer("knee", " KNEE ", &bank, 0.0);
        assert_eq!(typed, Outcome::Correct);
        let typed = s.type_answer("foot", "paw", &bank, 0.0);
        assert_eq!(typed, Outcome::Incorrect);
        let typed = s.type_answer("knee", "knee", &bank, 0.0);
        assert_eq!(typed, Outcome::AlreadyFilled);
    }

    #[test]
    fn build_body_advances_to_labels_then_celebrates() {
        let mut s = build_body(3);
        fill_all(&mut s, 0.0);
        assert!(!s.is_finished());
        assert!(s.tick(999.0).is_empty());
        assert_eq!(s.tick(1_000.0), vec![SessionEvent::AdvanceStage]);
        assert_eq!(s.stage(), 1);
        assert_eq!(s.layout().name, "build-labels");
        assert_eq!(s.board().placed_count(), 0);
        assert_eq!(s.feedback().text(), "✅ Body assembled! Now label it!");
        fill_all(&mut s, 2_000.0);
        assert_eq!(s.tick(2_500.0), vec![SessionEvent::Celebrate]);
        assert!(s.is_finished());
        s.reset().unwrap();
        assert_eq!(s.stage(), 0);
        assert_eq!(s.layout().name, "build-body");
    }

    #[test]
    fn build_captions_use_piece_labels() {
        let stages = vec![Cow::Borrowed(build_assembly())];
        let s = PlacementSession::with_rng(stages, StdRng::seed_from_u64(8)).unwrap();
        let captions = s.token_captions(&WordBank::body_parts());
        assert_eq!(captions.len(), 6);
        assert!(captions.iter().any(|(id, c)| id == "leg" && *c == "Legs"));
    }

    #[test]
    fn no_stages_is_a_config_error() {
        let err = PlacementSession::with_rng(Vec::new(), StdRng::seed_from_u64(0)).err();
        assert_eq!(err, Some(ConfigError::Empty));
    }

    #[test]
    fn custom_layout_is_owned_by_the_session() {
        let bank = WordBank::body_parts();
        let pairs = [pct("chin", 50.0, 20.0), pct("cheek", 82.0, 21.0)];
        let desc = LayoutDesc::custom(&pairs, &bank, true).unwrap();
        let stages = vec![Cow::Owned(desc)];
        let mut s = PlacementSession::with_rng(stages, StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(s.layout().name, "custom");
        assert!(s.layout().connectors);
        fill_all(&mut s, 0.0);
        assert_eq!(s.tick(CELEBRATE_MS), vec![SessionEvent::Celebrate]);
        assert_eq!(s.feedback().text(), "🎉 All labels placed!");
        s.reset().unwrap();
        assert_eq!(s.board().total_pairs(), 2);
    }

    #[test]
    fn custom_layout_with_duplicates_is_rejected() {
        let bank = WordBank::body_parts();
        let pairs = [pct("lip", 0.0, 0.0), pct("lip", 0.0, 0.0)];
        let desc = LayoutDesc::custom(&pairs, &bank, false).unwrap();
        let stages = vec![Cow::Owned(desc)];
        let err = PlacementSession::with_rng(stages, StdRng::seed_from_u64(0)).err();
        assert_eq!(err, Some(ConfigError::DuplicatePart("lip".into())));
        let unknown = [pct("tail", 0.0, 0.0)];
        let err = LayoutDesc::custom(&unknown, &bank, false).unwrap_err();
        assert_eq!(err, LookupError::NotFound("tail".into()));
    }

    #[test]
    fn quiz_answers_show_feedback() {
        let mut q = quiz(QuizMode::ClickWord);
        let first = q.quiz().current().unwrap().id;
        let wrong = if first == "head" { "toe" } else { "head" };
        assert_eq!(q.answer(wrong, 0.0), QuizOutcome::Incorrect);
        assert_eq!(q.feedback().text(), "❌ Try again");
        assert_eq!(q.answer(first, 100.0), QuizOutcome::Correct);
        assert_eq!(q.feedback().text(), "✅ Well done!");
        assert!(q.tick(1_900.0).is_empty());
        assert!(q.feedback().current().is_none());
    }

    #[test]
    fn each_quiz_mode_has_its_own_completion_message() {
        for (mode, message) in [
            (QuizMode::ClickWord, "🎉 Amazing! You got them all!"),
            (QuizMode::ListenFind, "🎉 Excellent! All done!"),
        ] {
            let mut q = quiz(mode);
            answer_all(&mut q, 0.0);
            assert!(q.tick(QUIZ_FINISH_MS - 1.0).is_empty());
            assert!(!q.restart_visible());
            assert_eq!(q.tick(QUIZ_FINISH_MS), vec![SessionEvent::Celebrate]);
            assert_eq!(q.feedback().text(), message);
            assert!(q.restart_visible());
        }
    }

    #[test]
    fn answers_after_completion_are_silent() {
        let mut q = quiz(QuizMode::ListenFind);
        answer_all(&mut q, 0.0);
        q.tick(5_000.0);
        q.tick(10_000.0);
        assert!(q.feedback().current().is_none());
        assert_eq!(q.answer("head", 10_100.0), QuizOutcome::Finished);
        assert!(q.feedback().current().is_none());
    }

    #[test]
    fn quiz_restart_drops_pending_completion() {
        let mut q = quiz(QuizMode::ClickWord);
        answer_all(&mut q, 0.0);
        q.restart();
        assert!(q.tick(10_000.0).is_empty());
        assert!(q.feedback().current().is_none());
        assert!(!q.restart_visible());
        assert_eq!(q.quiz().progress(), 0.0);
    }
}
