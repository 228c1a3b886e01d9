// Label-the-body layout. Zones sit either side of the figure (negative and
// >100% offsets) and are joined to their anchors by connector lines.
use super::{DisplayPosition, LabelSource, LayoutDesc, ZoneDesc};
use std::borrow::Cow;

const fn side(part_id: &'static str, left: f64, top: f64) -> ZoneDesc {
    ZoneDesc {
        part_id,
        position: DisplayPosition::Percent { left, top },
    }
}

static LABEL_BODY_ZONES: [ZoneDesc; 8] = [
    side("head", 105.0, 14.0),
    side("shoulder", -5.0, 32.0),
    side("chest", 105.0, 38.0),
    side("arm", -5.0, 43.0),
    side("stomach", 105.0, 50.0),
    side("leg", 105.0, 68.0),
    side("knee", -5.0, 72.0),
    side("foot", -5.0, 85.0),
];

static LABEL_BODY: LayoutDesc = LayoutDesc {
    name: "label-body",
    zones: Cow::Borrowed(&LABEL_BODY_ZONES),
    labels: LabelSource::Words,
    connectors: true,
    completion_message: "🎉 All parts labeled!",
};

pub fn label_body() -> &'static LayoutDesc {
    &LABEL_BODY
}
