//! Pointer / touch drag tracking for word tokens.
//!
//! The input layer reports press, move and release; resolving the release
//! point to a zone is done with [`hit_test`] against zone boxes the input
//! layer measured. There is at most one active drag, and it is cleared at
//! release whether or not a zone was hit.

use crate::anchor::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
    pub part_id: String,
    pub origin: (f64, f64),
    pub pointer: (f64, f64),
}

/// A completed drop, ready for `PlacementBoard::attempt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropIntent {
    pub zone_part_id: String,
    pub token_part_id: String,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `part_id`. A drag already in flight is replaced.
    pub fn begin(&mut self, part_id: &str, x: f64, y: f64) {
        if let Some(prev) = self.active.take() {
            log::debug!("drag of '{}' superseded", prev.part_id);
        }
        self.active = Some(ActiveDrag {
            part_id: part_id.to_string(),
            origin: (x, y),
            pointer: (x, y),
        });
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Option<&ActiveDrag> {
        let drag = self.active.as_mut()?;
        drag.pointer = (x, y);
        Some(&*drag)
    }

    /// End the gesture. Returns a drop intent only if a drag was active and
    /// the input layer resolved a zone under the pointer.
    pub fn finish(&mut self, zone_under_pointer: Option<&str>) -> Option<DropIntent> {
        let drag = self.active.take()?;
        let zone = zone_under_pointer?;
        Some(DropIntent {
            zone_part_id: zone.to_string(),
            token_part_id: drag.part_id,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

/// Measured on-screen box of one zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneHitBox {
    pub part_id: String,
    pub rect: Rect,
}

/// Zone under a point. Later boxes win on overlap, matching paint order.
pub fn hit_test(boxes: &[ZoneHitBox], x: f64, y: f64) -> Option<&str> {
    boxes
        .iter()
        .rev()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.part_id.as_str())
}
