//! Axis-aligned physics body: real-valued position, integer bounding box.

use crate::entities::Rect;

/// Returns every candidate box that overlaps `rect`.
pub fn collision_test(rect: &Rect, candidates: &[Rect]) -> Vec<Rect> {
    candidates
        .iter()
        .filter(|other| rect.overlaps(other))
        .copied()
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisAlignedBody {
    x: f64,
    y: f64,
    rect: Rect,
}

impl AxisAlignedBody {
    pub fn new(x: f64, y: f64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            rect: Rect::new(x.floor() as i32, y.floor() as i32, width as i32, height as i32),
        }
    }

    /// Translate by `delta` and report which of `candidates` the new box overlaps.
    pub fn move_by(&mut self, delta: (f64, f64), candidates: &[Rect]) -> Vec<Rect> {
        self.x += delta.0;
        self.y += delta.1;
        self.rect.left = self.x.floor() as i32;
        self.rect.top = self.y.floor() as i32;
        collision_test(&self.rect, candidates)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.rect.left + self.rect.width / 2,
            self.rect.top + self.rect.height / 2,
        )
    }
}
