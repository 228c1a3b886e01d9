//! Static bilingual word bank shared by every game.
//!
//! Entries are `'static` and never mutated; callers hold plain references.
//! Primary translation is Russian, secondary is Belarusian.

#[cfg(feature = "serde")]
use serde::Serialize;

/// One vocabulary record.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub id: &'static str,
    pub word: &'static str,
    pub transcription: &'static str,
    pub translation_primary: &'static str,
    pub translation_secondary: &'static str,
}

const fn entry(
    id: &'static str,
    word: &'static str,
    transcription: &'static str,
    translation_primary: &'static str,
    translation_secondary: &'static str,
) -> VocabularyEntry {
    VocabularyEntry {
        id,
        word,
        transcription,
        translation_primary,
        translation_secondary,
    }
}

pub static BODY_PARTS: [VocabularyEntry; 21] = [
    entry("head", "Head", "/hed/", "Голова", "Галава"),
    entry("hair", "Hair", "/heər/", "Волосы", "Валасы"),
    entry("forehead", "Forehead", "/ˈfɔːrhed/", "Лоб", "Лоб"),
    entry("eye", "Eye", "/aɪ/", "Глаз", "Вока"),
    entry("ear", "Ear", "/ɪər/", "Ухо", "Вуха"),
    entry("nose", "Nose", "/noʊz/", "Нос", "Нос"),
    entry("cheek", "Cheek", "/tʃiːk/", "Щека", "Шчака"),
    entry("mouth", "Mouth", "/maʊθ/", "Рот", "Рот"),
    entry("lip", "Lip", "/lɪp/", "Губа", "Губа"),
    entry("chin", "Chin", "/tʃɪn/", "Подбородок", "Падбародак"),
    entry("neck", "Neck", "/nek/", "Шея", "Шыя"),
    entry("shoulder", "Shoulder", "/ˈʃoʊldər/", "Плечо", "Плячо"),
    entry("chest", "Chest", "/tʃest/", "Грудь", "Грудзі"),
    entry("arm", "Arm", "/ɑːrm/", "Рука", "Рука"),
    entry("elbow", "Elbow", "/ˈelboʊ/", "Локоть", "Локаць"),
    entry("stomach", "Stomach", "/ˈstʌmək/", "Живот", "Жывот"),
    entry(
        "finger",
        "Finger",
        "/ˈfɪŋɡər/",
        "Палец (руки)",
        "Палец (рукі)",
    ),
    entry("leg", "Leg", "/leɡ/", "Нога", "Нага"),
    entry("knee", "Knee", "/niː/", "Колено", "Калена"),
    entry("foot", "Foot", "/fʊt/", "Стопа", "Ступня"),
    entry("toe", "Toe", "/toʊ/", "Палец (ноги)", "Палец (нагі)"),
];

/// Major parts used by the build-the-body game.
pub const BUILD_PARTS: [&str; 6] = ["head", "chest", "stomach", "arm", "leg", "foot"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown vocabulary id: {0}")]
    NotFound(String),
}

/// Read-only view over an ordered entry table.
#[derive(Clone, Copy, Debug)]
pub struct WordBank {
    entries: &'static [VocabularyEntry],
}

impl WordBank {
    pub const fn new(entries: &'static [VocabularyEntry]) -> Self {
        Self { entries }
    }

    pub const fn body_parts() -> Self {
        Self::new(&BODY_PARTS)
    }

    /// Entries in insertion order.
    pub fn all(&self) -> &'static [VocabularyEntry] {
        self.entries
    }

    pub fn lookup(&self, id: &str) -> Result<&'static VocabularyEntry, LookupError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    /// Resolve typed text ("  knee ", "KNEE") to the entry whose display word matches.
    pub fn find_by_word(&self, text: &str) -> Option<&'static VocabularyEntry> {
        let wanted = text.trim();
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.word.eq_ignore_ascii_case(wanted))
    }

    /// Display word for `id`, or `None` (logged) when the id drifted out of the bank.
    pub fn display_word(&self, id: &str) -> Option<&'static str> {
        match self.lookup(id) {
            Ok(e) => Some(e.word),
            Err(err) => {
                log::warn!("skipping label: {err}");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::body_parts()
    }
}

#[cfg(feature = "serde_json")]
pub fn word_bank_to_json(bank: &WordBank) -> Result<String, serde_json::Error> {
    serde_json::to_string(bank.all())
}
