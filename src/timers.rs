// Delayed events owned by one board round.
//
// Every event is stamped with the round it was scheduled in; events from an
// older round are discarded rather than delivered, and `cancel_all` empties
// the queue outright on reset.

#[derive(Clone, Debug, PartialEq)]
struct Pending<E> {
    round: u64,
    due_ms: f64,
    event: E,
}

#[derive(Clone, Debug)]
pub struct RoundTimers<E> {
    pending: Vec<Pending<E>>,
}

impl<E> Default for RoundTimers<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> RoundTimers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, round: u64, due_ms: f64, event: E) {
        self.pending.push(Pending {
            round,
            due_ms,
            event,
        });
    }

    /// Remove and return every event due by `now_ms` for `current_round`,
    /// oldest deadline first.
    pub fn due(&mut self, now_ms: f64, current_round: u64) -> Vec<E> {
        let before = self.pending.len();
        self.pending.retain(|p| p.round == current_round);
        if self.pending.len() != before {
            log::debug!("dropped {} stale timer(s)", before - self.pending.len());
        }
        let (mut ready, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = waiting;
        ready.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        ready.into_iter().map(|p| p.event).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
