// Build-the-body layouts: phase 1 assembles coloured pieces on a silhouette,
// phase 2 labels the assembled figure.
use super::{DisplayPosition, LabelSource, LayoutDesc, ZoneDesc};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A body piece for the assembly phase. `rect` is (x, y, w, h) in target pixels.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, Debug)]
pub struct BuildPieceDesc {
    pub part_id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub rect: (f64, f64, f64, f64),
}

impl BuildPieceDesc {
    pub fn center(&self) -> (f64, f64) {
        let (x, y, w, h) = self.rect;
        (x + w / 2.0, y + h / 2.0)
    }
}

const fn piece(
    part_id: &'static str,
    label: &'static str,
    color: &'static str,
    rect: (f64, f64, f64, f64),
) -> BuildPieceDesc {
    BuildPieceDesc {
        part_id,
        label,
        color,
        rect,
    }
}

pub static BUILD_PIECES: [BuildPieceDesc; 6] = [
    piece("head", "Head", "#FFDBB4", (100.0, 10.0, 100.0, 100.0)),
    piece("chest", "Chest", "#4A90D9", (75.0, 110.0, 150.0, 100.0)),
    piece("stomach", "Stomach", "#4A90D9", (85.0, 200.0, 130.0, 80.0)),
    piece("arm", "Arms", "#FFDBB4", (10.0, 120.0, 65.0, 140.0)),
    piece("leg", "Legs", "#5B6EAE", (90.0, 280.0, 120.0, 140.0)),
    piece("foot", "Feet", "#E74C3C", (80.0, 410.0, 140.0, 50.0)),
];

/// Pieces with their colours and target rects, for drawing the palette.
#[cfg(feature = "serde_json")]
pub fn build_pieces_to_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&BUILD_PIECES)
}

pub fn build_assembly() -> &'static LayoutDesc {
    static LD: OnceLock<LayoutDesc> = OnceLock::new();
    LD.get_or_init(|| {
        let zones: Vec<ZoneDesc> = BUILD_PIECES
            .iter()
            .map(|p| {
                let (left, top) = p.center();
                ZoneDesc {
                    part_id: p.part_id,
                    position: DisplayPosition::Pixels { left, top },
                }
            })
            .collect();
        LayoutDesc {
            name: "build-body",
            zones: Cow::Owned(zones),
            labels: LabelSource::Pieces(&BUILD_PIECES),
            connectors: false,
            completion_message: "✅ Body assembled! Now label it!",
        }
    })
}

const fn at(part_id: &'static str, left: f64, top: f64) -> ZoneDesc {
    ZoneDesc {
        part_id,
        position: DisplayPosition::Percent { left, top },
    }
}

static BUILD_LABEL_ZONES: [ZoneDesc; 6] = [
    at("head", 50.0, 12.0),
    at("chest", 50.0, 32.0),
    at("stomach", 50.0, 48.0),
    at("arm", 15.0, 38.0),
    at("leg", 50.0, 70.0),
    at("foot", 50.0, 88.0),
];

static BUILD_LABELS: LayoutDesc = LayoutDesc {
    name: "build-labels",
    zones: Cow::Borrowed(&BUILD_LABEL_ZONES),
    labels: LabelSource::Pieces(&BUILD_PIECES),
    connectors: false,
    completion_message: "🎉 Fantastic! Body complete and labeled!",
};

pub fn build_labels() -> &'static LayoutDesc {
    &BUILD_LABELS
}
