use rand::Rng;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Shrinks the size so it fits inside `bounds`. Negative sizes become zero.
    pub fn capped_to(self, bounds: Size) -> Size {
        Size {
            width: self.width.clamp(0, bounds.width.max(0)),
            height: self.height.clamp(0, bounds.height.max(0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, width: size.width, height: size.height }
    }

    /// Axis aligned overlap test. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn is_inside(&self, bounds: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= bounds.width
            && self.y + self.height <= bounds.height
    }
}

// --- Find a spot for a new item that does not cover the existing ones ---
//
// Rejection sampling with a bounded number of attempts. When the container is
// too crowded the last resort is a random spot that only respects the bounds.
pub fn find_position<R: Rng + ?Sized>(
    rng: &mut R,
    size: Size,
    bounds: Size,
    occupied: &[Rect],
) -> (i32, i32) {
    let max_x = (bounds.width - size.width).max(0);
    let max_y = (bounds.height - size.height).max(0);

    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Rect::new(
            rng.random_range(0..=max_x),
            rng.random_range(0..=max_y),
            size,
        );
        if !occupied.iter().any(|rect| rect.overlaps(&candidate)) {
            return (candidate.x, candidate.y);
        }
    }

    let mut x = rng.random_range(0..=max_x);
    let mut y = rng.random_range(0..=max_y);

    if x + size.width > bounds.width {
        x = bounds.width - size.width;
    }
    if y + size.height > bounds.height {
        y = bounds.height - size.height;
    }
    (x.max(0), y.max(0))
}
