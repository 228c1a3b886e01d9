// One-word-at-a-time quiz used by click-the-word and listen-and-find.

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::shuffle::shuffle;
use crate::words::{VocabularyEntry, WordBank};

/// The two quiz games; they differ only in how the word is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizMode {
    /// The word is shown; click its body part.
    ClickWord,
    /// The word is spoken; find its body part.
    ListenFind,
}

impl QuizMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click-word" => Some(QuizMode::ClickWord),
            "listen-find" => Some(QuizMode::ListenFind),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QuizMode::ClickWord => "click-word",
            QuizMode::ListenFind => "listen-find",
        }
    }

    pub fn completion_message(self) -> &'static str {
        match self {
            QuizMode::ClickWord => "🎉 Amazing! You got them all!",
            QuizMode::ListenFind => "🎉 Excellent! All done!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Correct,
    Incorrect,
    /// Every word has already been answered.
    Finished,
}

pub struct WordQuiz<R: Rng = ThreadRng> {
    rng: R,
    bank: WordBank,
    order: Vec<&'static VocabularyEntry>,
    current: usize,
}

impl WordQuiz<ThreadRng> {
    pub fn new(bank: WordBank) -> Self {
        Self::with_rng(bank, rand::thread_rng())
    }
}

impl<R: Rng> WordQuiz<R> {
    pub fn with_rng(bank: WordBank, mut rng: R) -> Self {
        let all: Vec<&'static VocabularyEntry> = bank.all().iter().collect();
        let order = shuffle(&all, &mut rng);
        Self {
            rng,
            bank,
            order,
            current: 0,
        }
    }

    pub fn current(&self) -> Option<&'static VocabularyEntry> {
        self.order.get(self.current).copied()
    }

    /// Check a clicked part against the current word; advances only when correct.
    pub fn answer(&mut self, part_id: &str) -> QuizOutcome {
        let Some(entry) = self.current() else {
            return QuizOutcome::Finished;
        };
        if entry.id == part_id {
            self.current += 1;
            QuizOutcome::Correct
        } else {
            QuizOutcome::Incorrect
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.order.len()
    }

    /// Fraction of words answered, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.order.is_empty() {
            return 1.0;
        }
        self.current as f64 / self.order.len() as f64
    }

    pub fn restart(&mut self) {
        let all: Vec<&'static VocabularyEntry> = self.bank.all().iter().collect();
        self.order = shuffle(&all, &mut self.rng);
        self.current = 0;
    }

    /// Spoken prompt for listen-and-find ("Touch the knee").
    pub fn listen_prompt(&self) -> Option<String> {
        let entry = self.current()?;
        Some(format!("Touch the {}", entry.word.to_lowercase()))
    }
}
