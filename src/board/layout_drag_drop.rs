// Drag & drop layout: word cards dropped straight onto the illustration.
use super::{DisplayPosition, LabelSource, LayoutDesc, ZoneDesc};
use std::borrow::Cow;

const fn at(part_id: &'static str, left: f64, top: f64) -> ZoneDesc {
    ZoneDesc {
        part_id,
        position: DisplayPosition::Percent { left, top },
    }
}

static DRAG_DROP_ZONES: [ZoneDesc; 17] = [
    at("hair", 50.0, 8.0),
    at("head", 50.0, 17.0),
    at("eye", 82.0, 17.0),
    at("ear", 18.0, 19.0),
    at("nose", 82.0, 22.0),
    at("mouth", 82.0, 26.0),
    at("neck", 50.0, 32.0),
    at("shoulder", 18.0, 34.0),
    at("chest", 50.0, 40.0),
    at("arm", 10.0, 48.0),
    at("elbow", 10.0, 46.0),
    at("stomach", 50.0, 53.0),
    at("finger", 10.0, 58.0),
    at("leg", 82.0, 70.0),
    at("knee", 82.0, 73.0),
    at("foot", 50.0, 88.0),
    at("toe", 50.0, 92.0),
];

static DRAG_DROP: LayoutDesc = LayoutDesc {
    name: "drag-drop",
    zones: Cow::Borrowed(&DRAG_DROP_ZONES),
    labels: LabelSource::Words,
    connectors: false,
    completion_message: "🎉 Perfect! All labels placed!",
};

pub fn drag_drop() -> &'static LayoutDesc {
    &DRAG_DROP
}
