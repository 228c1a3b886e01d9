//! Connector overlay: lines from each zone to its body part on the illustration.
//!
//! Anchors live in the illustration's intrinsic coordinate space (the SVG
//! viewBox, 400×650). Projection maps both ends into container pixels; the
//! overlay is always redrawn from scratch, so callers simply invoke
//! [`AnchorProjector::render`] again after a resize or a fill change.

use crate::board::Zone;

// --- Geometry ----------------------------------------------------------------

/// Axis-aligned box in one shared coordinate space (viewport pixels in the browser).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let inside_x = px >= self.x && px <= self.x + self.width;
        let inside_y = py >= self.y && py <= self.y + self.height;
        inside_x && inside_y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Intrinsic size of the body illustration.
pub const ILLUSTRATION_SIZE: Size = Size {
    width: 400.0,
    height: 650.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Everything a full redraw needs to know about the current layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGeometry {
    pub container: Rect,
    pub illustration: Rect,
    pub intrinsic: Size,
}

// --- Anchors -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorPoint {
    pub part_id: &'static str,
    pub x: f64,
    pub y: f64,
}

const fn anchor(part_id: &'static str, x: f64, y: f64) -> AnchorPoint {
    AnchorPoint { part_id, x, y }
}

pub static BODY_ANCHORS: [AnchorPoint; 21] = [
    anchor("hair", 200.0, 85.0),
    anchor("head", 200.0, 105.0),
    anchor("forehead", 200.0, 90.0),
    anchor("eye", 220.0, 115.0),
    anchor("ear", 145.0, 120.0),
    anchor("nose", 200.0, 130.0),
    anchor("cheek", 232.0, 135.0),
    anchor("mouth", 200.0, 153.0),
    anchor("lip", 200.0, 147.0),
    anchor("chin", 200.0, 168.0),
    anchor("neck", 200.0, 188.0),
    anchor("shoulder", 135.0, 210.0),
    anchor("chest", 200.0, 240.0),
    anchor("arm", 95.0, 310.0),
    anchor("elbow", 105.0, 282.0),
    anchor("stomach", 200.0, 325.0),
    anchor("finger", 83.0, 355.0),
    anchor("leg", 157.0, 445.0),
    anchor("knee", 157.0, 468.0),
    anchor("foot", 152.0, 548.0),
    anchor("toe", 151.0, 573.0),
];

// --- Styling -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorStyle {
    pub color: &'static str,
    pub line_alpha: f64,
    pub dot_alpha: f64,
    pub line_width: f64,
    /// Empty slice means a solid line.
    pub dash: &'static [f64],
}

pub const OPEN_STYLE: ConnectorStyle = ConnectorStyle {
    color: "#4A90D9",
    line_alpha: 0.4,
    dot_alpha: 0.5,
    line_width: 1.5,
    dash: &[6.0, 4.0],
};
pub const FILLED_STYLE: ConnectorStyle = ConnectorStyle {
    color: "#27ae60",
    line_alpha: 0.8,
    dot_alpha: 0.8,
    line_width: 1.5,
    dash: &[],
};
pub const ANCHOR_DOT_RADIUS: f64 = 3.0;

impl ConnectorStyle {
    pub fn for_fill(filled: bool) -> Self {
        if filled { FILLED_STYLE } else { OPEN_STYLE }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    pub part_id: String,
    pub segment: LineSegment,
    pub style: ConnectorStyle,
}

/// Drawing target for the overlay. The browser implementation wraps a 2D canvas.
pub trait ConnectorSurface {
    /// Drop everything drawn so far and size the surface to the container.
    fn clear(&mut self, width: f64, height: f64);
    fn draw_connector(&mut self, connector: &Connector);
}

// --- Projector ---------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub struct AnchorProjector {
    anchors: &'static [AnchorPoint],
}

impl Default for AnchorProjector {
    fn default() -> Self {
        Self::new(&BODY_ANCHORS)
    }
}

impl AnchorProjector {
    pub const fn new(anchors: &'static [AnchorPoint]) -> Self {
        Self { anchors }
    }

    pub fn anchor(&self, part_id: &str) -> Option<&'static AnchorPoint> {
        self.anchors.iter().find(|a| a.part_id == part_id)
    }

    /// Segment from the zone centre to its anchor, in container pixels.
    /// `None` when the part has no anchor.
    pub fn project(
        &self,
        zone: &Zone,
        container: Rect,
        illustration: Rect,
        intrinsic: Size,
    ) -> Option<LineSegment> {
        let anchor = self.anchor(&zone.part_id)?;
        if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
            return None;
        }
        let (x1, y1) = zone.position.resolve(container.width, container.height);
        let scale_x = illustration.width / intrinsic.width;
        let scale_y = illustration.height / intrinsic.height;
        let off_x = illustration.x - container.x;
        let off_y = illustration.y - container.y;
        Some(LineSegment {
            x1,
            y1,
            x2: off_x + anchor.x * scale_x,
            y2: off_y + anchor.y * scale_y,
        })
    }

    pub fn connectors(&self, zones: &[Zone], geometry: &SceneGeometry) -> Vec<Connector> {
        let SceneGeometry {
            container,
            illustration,
            intrinsic,
        } = *geometry;
        zones
            .iter()
            .filter_map(|z| {
                let segment = self.project(z, container, illustration, intrinsic)?;
                Some(Connector {
                    part_id: z.part_id.clone(),
                    segment,
                    style: ConnectorStyle::for_fill(z.filled),
                })
            })
            .collect()
    }

    /// Full redraw; returns how many connectors were drawn.
    pub fn render<S: ConnectorSurface + ?Sized>(
        &self,
        zones: &[Zone],
        geometry: &SceneGeometry,
        surface: &mut S,
    ) -> usize {
        surface.clear(geometry.container.width, geometry.container.height);
        let connectors = self.connectors(zones, geometry);
        for c in &connectors {
            surface.draw_connector(c);
        }
        connectors.len()
    }
}
