//! Placement board: labeled drop zones plus the shuffled word tokens that fill them.
//!
//! A board owns exactly one round. Each zone is a two-state machine
//! (Open -> Filled) that only moves forward through a correct attempt; the
//! only way back is `reset()`, which rebuilds the round with a fresh token
//! shuffle. Incorrect attempts never change state, so they are always
//! retryable, and repeated drops on a filled zone are absorbed as
//! `Outcome::AlreadyFilled` (touch and pointer events can both fire for one
//! gesture).
//!
//! Static per-game layouts live in the `layout_*` child modules.

use std::borrow::Cow;
use std::collections::HashSet;

use rand::Rng;
use rand::rngs::ThreadRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shuffle::shuffle;
use crate::words::{LookupError, WordBank};

mod layout_build_body;
mod layout_drag_drop;
mod layout_label_body;

#[cfg(feature = "serde_json")]
pub use layout_build_body::build_pieces_to_json;
pub use layout_build_body::{BUILD_PIECES, BuildPieceDesc, build_assembly, build_labels};
pub use layout_drag_drop::drag_drop;
pub use layout_label_body::label_body;

// --- Positions / Configuration ----------------------------------------------

/// Where a zone's centre sits inside its container.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "unit", rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayPosition {
    /// Percent of container width / height (may fall outside 0..100 for side labels).
    Percent { left: f64, top: f64 },
    /// Container pixels.
    Pixels { left: f64, top: f64 },
}

impl DisplayPosition {
    /// Container-relative pixel point for a container of the given size.
    pub fn resolve(&self, width: f64, height: f64) -> (f64, f64) {
        match *self {
            DisplayPosition::Percent { left, top } => {
                (width * left / 100.0, height * top / 100.0)
            }
            DisplayPosition::Pixels { left, top } => (left, top),
        }
    }
}

/// One requested pair: a zone position bound to a vocabulary id.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PairConfig {
    pub part_id: String,
    pub position: DisplayPosition,
}

impl PairConfig {
    pub fn new(part_id: impl Into<String>, position: DisplayPosition) -> Self {
        Self {
            part_id: part_id.into(),
            position,
        }
    }
}

/// Static zone entry used by the built-in layouts.
#[derive(Clone, Copy, Debug)]
pub struct ZoneDesc {
    pub part_id: &'static str,
    pub position: DisplayPosition,
}

/// Where token captions come from.
#[derive(Clone, Copy, Debug)]
pub enum LabelSource {
    /// Display word from the word bank.
    Words,
    /// Piece captions ("Arms", "Legs") from the build-the-body set.
    Pieces(&'static [BuildPieceDesc]),
}

/// Named, immutable board layout for one game. Built-in layouts borrow
/// static zone tables; runtime layouts own theirs.
#[derive(Clone, Debug)]
pub struct LayoutDesc {
    pub name: &'static str,
    pub zones: Cow<'static, [ZoneDesc]>,
    pub labels: LabelSource,
    /// Draw connector lines from each zone to its anchor on the illustration.
    pub connectors: bool,
    pub completion_message: &'static str,
}

pub const CUSTOM_COMPLETION: &str = "🎉 All labels placed!";

impl LayoutDesc {
    /// Word-labelled layout from a runtime pair list. Every id must be in `bank`;
    /// duplicates are left for `PlacementBoard::configure` to reject.
    pub fn custom(
        pairs: &[PairConfig],
        bank: &WordBank,
        connectors: bool,
    ) -> Result<Self, LookupError> {
        let zones = pairs
            .iter()
            .map(|p| {
                let entry = bank.lookup(&p.part_id)?;
                Ok(ZoneDesc {
                    part_id: entry.id,
                    position: p.position,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;
        Ok(Self {
            name: "custom",
            zones: Cow::Owned(zones),
            labels: LabelSource::Words,
            connectors,
            completion_message: CUSTOM_COMPLETION,
        })
    }

    pub fn pairs(&self) -> Vec<PairConfig> {
        self.zones
            .iter()
            .map(|z| PairConfig::new(z.part_id, z.position))
            .collect()
    }

    /// Caption for a token of this layout, `None` when the id is unknown.
    pub fn caption(&self, bank: &WordBank, part_id: &str) -> Option<&'static str> {
        match self.labels {
            LabelSource::Words => bank.display_word(part_id),
            LabelSource::Pieces(pieces) => pieces
                .iter()
                .find(|p| p.part_id == part_id)
                .map(|p| p.label),
        }
    }
}

/// Look up a built-in layout by name.
pub fn layout(name: &str) -> Option<&'static LayoutDesc> {
    match name {
        "drag-drop" => Some(drag_drop()),
        "label-body" => Some(label_body()),
        "build-body" => Some(build_assembly()),
        "build-labels" => Some(build_labels()),
        _ => None,
    }
}

#[cfg(feature = "serde_json")]
pub fn pairs_from_json(json: &str) -> Result<Vec<PairConfig>, serde_json::Error> {
    serde_json::from_str(json)
}

// --- Round State -------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub part_id: String,
    pub filled: bool,
    pub position: DisplayPosition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub part_id: String,
    pub placed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    AlreadyFilled,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::AlreadyFilled => "already-filled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board configuration has no pairs")]
    Empty,
    #[error("duplicate part id in board configuration: {0}")]
    DuplicatePart(String),
}

pub struct PlacementBoard<R: Rng = ThreadRng> {
    rng: R,
    pairs: Vec<PairConfig>,
    zones: Vec<Zone>,
    tokens: Vec<Token>, // display order
    placed_count: usize,
    round: u64,
}

impl PlacementBoard<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for PlacementBoard<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlacementBoard<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            pairs: Vec::new(),
            zones: Vec::new(),
            tokens: Vec::new(),
            placed_count: 0,
            round: 0,
        }
    }

    /// Start a new round. Validation happens before any state changes, so a
    /// rejected configuration leaves the current round as it was.
    pub fn configure(&mut self, pairs: &[PairConfig]) -> Result<(), ConfigError> {
        validate(pairs)?;
        self.pairs = pairs.to_vec();
        self.rebuild();
        Ok(())
    }

    /// Replay the last configuration with a fresh token shuffle.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        validate(&self.pairs)?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.zones = self
            .pairs
            .iter()
            .map(|p| Zone {
                part_id: p.part_id.clone(),
                filled: false,
                position: p.position,
            })
            .collect();
        self.tokens = shuffle(&self.pairs, &mut self.rng)
            .into_iter()
            .map(|p| Token {
                part_id: p.part_id,
                placed: false,
            })
            .collect();
        self.placed_count = 0;
        self.round += 1;
        log::debug!(
            "board round {} configured with {} pairs",
            self.round,
            self.zones.len()
        );
    }

    pub fn attempt(&mut self, zone_part_id: &str, token_part_id: &str) -> Outcome {
        let zones = &mut self.zones;
        let Some(zone) = zones.iter_mut().find(|z| z.part_id == zone_part_id) else {
            log::warn!("drop on unknown zone '{zone_part_id}' treated as incorrect");
            return Outcome::Incorrect;
        };
        if zone.filled {
            return Outcome::AlreadyFilled;
        }
        if zone_part_id != token_part_id {
            log::debug!("'{token_part_id}' rejected by zone '{zone_part_id}'");
            return Outcome::Incorrect;
        }
        zone.filled = true;
        if let Some(token) = self
            .tokens
            .iter_mut()
            .find(|t| t.part_id == token_part_id && !t.placed)
        {
            token.placed = true;
        }
        self.placed_count += 1;
        log::debug!(
            "'{token_part_id}' placed ({}/{})",
            self.placed_count,
            self.zones.len()
        );
        Outcome::Correct
    }

    pub fn is_complete(&self) -> bool {
        !self.zones.is_empty() && self.placed_count == self.zones.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed_count
    }

    pub fn total_pairs(&self) -> usize {
        self.zones.len()
    }

    /// Zones in layout order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Tokens in (shuffled) display order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn zone(&self, part_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.part_id == part_id)
    }

    /// Round counter; bumped by every configure / reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// (part id, display word) for each token in display order. Tokens whose
    /// id is missing from the bank are skipped.
    pub fn token_labels(&self, bank: &WordBank) -> Vec<(&str, &'static str)> {
        self.tokens
            .iter()
            .filter_map(|t| {
                let word = bank.display_word(&t.part_id)?;
                Some((t.part_id.as_str(), word))
            })
            .collect()
    }
}

fn validate(pairs: &[PairConfig]) -> Result<(), ConfigError> {
    if pairs.is_empty() {
        return Err(ConfigError::Empty);
    }
    let mut seen = HashSet::new();
    for p in pairs {
        if !seen.insert(p.part_id.as_str()) {
            return Err(ConfigError::DuplicatePart(p.part_id.clone()));
        }
    }
    Ok(())
}
