//! Transient outcome notice with a debounced auto-clear.
//!
//! Time is supplied by the caller (`performance.now()` in the browser), the
//! same way the board loop feeds frame timestamps into its effects. A new
//! notice always replaces the pending clear instead of stacking another one.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedbackConfig {
    pub clear_after_ms: f64,
    pub correct_message: &'static str,
    pub incorrect_message: &'static str,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: 1_800.0,
            correct_message: "✅ Well done!",
            incorrect_message: "❌ Try again",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub correct: bool,
    pub message: String,
}

impl Notice {
    /// CSS class list for the feedback element.
    pub fn css_class(&self) -> &'static str {
        if self.correct {
            "game-feedback correct anim-pop"
        } else {
            "game-feedback wrong anim-shake"
        }
    }
}

/// Class applied once the notice has cleared.
pub const IDLE_CLASS: &str = "game-feedback";

#[derive(Debug, Default)]
pub struct FeedbackChannel {
    config: FeedbackConfig,
    current: Option<Notice>,
    clear_at_ms: Option<f64>,
}

impl FeedbackChannel {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            current: None,
            clear_at_ms: None,
        }
    }

    pub fn notify(&mut self, correct: bool, message: Option<&str>, now_ms: f64) -> &Notice {
        let fallback = if correct {
            self.config.correct_message
        } else {
            self.config.incorrect_message
        };
        let message = message.unwrap_or(fallback).to_string();
        self.clear_at_ms = Some(now_ms + self.config.clear_after_ms);
        self.current.insert(Notice { correct, message })
    }

    /// Clear the notice once its deadline passes. Returns true when something
    /// was cleared.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.clear_at_ms {
            Some(due) if now_ms >= due => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Drop the notice and its pending clear.
    pub fn clear(&mut self) {
        self.current = None;
        self.clear_at_ms = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn pending_clear_at(&self) -> Option<f64> {
        self.clear_at_ms
    }

    pub fn text(&self) -> &str {
        self.current.as_ref().map_or("", |n| n.message.as_str())
    }

    pub fn css_class(&self) -> &'static str {
        self.current.as_ref().map_or(IDLE_CLASS, Notice::css_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages_per_outcome() {
        let mut f = FeedbackChannel::default();
        assert_eq!(f.notify(true, None, 0.0).message, "✅ Well done!");
        assert_eq!(f.css_class(), "game-feedback correct anim-pop");
        assert_eq!(f.notify(false, None, 0.0).message, "❌ Try again");
        assert_eq!(f.css_class(), "game-feedback wrong anim-shake");
    }

    #[test]
    fn custom_message_wins() {
        let mut f = FeedbackChannel::default();
        f.notify(true, Some("🎉 All parts labeled!"), 10.0);
        assert_eq!(f.text(), "🎉 All parts labeled!");
    }

    #[test]
    fn clears_after_delay() {
        let mut f = FeedbackChannel::default();
        f.notify(true, None, 1_000.0);
        assert!(!f.tick(2_799.0));
        assert!(f.current().is_some());
        assert!(f.tick(2_800.0));
        assert!(f.current().is_none());
        assert_eq!(f.css_class(), IDLE_CLASS);
        assert!(!f.tick(5_000.0));
    }

    #[test]
    fn second_notify_reschedules_instead_of_stacking() {
        let mut f = FeedbackChannel::default();
        f.notify(false, None, 0.0);
        f.notify(true, None, 1_500.0);
        assert_eq!(f.pending_clear_at(), Some(3_300.0));
        // First deadline has passed but was cancelled.
        assert!(!f.tick(1_900.0));
        assert_eq!(f.text(), "✅ Well done!");
        assert!(f.tick(3_300.0));
    }

    #[test]
    fn clear_cancels_pending() {
        let mut f = FeedbackChannel::new(FeedbackConfig {
            clear_after_ms: 100.0,
            ..FeedbackConfig::default()
        });
        f.notify(true, None, 0.0);
        f.clear();
        assert_eq!(f.pending_clear_at(), None);
        assert!(!f.tick(200.0));
    }
}
