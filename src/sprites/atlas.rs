//! Frame regions within a sprite sheet.

use serde::{Deserialize, Serialize};

/// A source rectangle within a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRegion {
    /// X position in pixels.
    pub x: u32,
    /// Y position in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameRegion {
    /// Create a new frame region.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate just past the right edge, if it fits in a `u32`.
    pub const fn right_edge(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// The region directly to the right of this one, same size and row.
    pub fn next_in_row(&self) -> Option<Self> {
        self.right_edge().map(|x| Self::new(x, self.y, self.width, self.height))
    }

    /// Lay out `count` frames left-to-right starting at `first`.
    ///
    /// `None` if any frame's right edge falls outside the `u32` range.
    pub fn strip(first: FrameRegion, count: usize) -> Option<Vec<FrameRegion>> {
        let mut frames = Vec::with_capacity(count);
        let mut frame = first;
        for i in 0..count {
            if i > 0 {
                frame = frame.next_in_row()?;
            }
            frame.right_edge()?;
            frames.push(frame);
        }
        Some(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_steps_by_width() {
        let frames = FrameRegion::strip(FrameRegion::new(0, 200, 100, 200), 4).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], FrameRegion::new(0, 200, 100, 200));
        assert_eq!(frames[3], FrameRegion::new(300, 200, 100, 200));
        assert!(frames.iter().all(|f| f.y == 200 && f.height == 200));
    }

    #[test]
    fn test_strip_past_coordinate_range() {
        let near_edge = FrameRegion::new(u32::MAX - 250, 0, 100, 200);
        assert_eq!(FrameRegion::strip(near_edge, 2).map(|f| f.len()), Some(2));
        assert_eq!(FrameRegion::strip(near_edge, 3), None);

        // A single frame that already spills over
        let spilling = FrameRegion::new(u32::MAX - 50, 0, 100, 200);
        assert_eq!(spilling.right_edge(), None);
        assert_eq!(FrameRegion::strip(spilling, 1), None);
    }
}
