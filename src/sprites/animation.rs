//! Frame-driven animation clock.
//!
//! A prototype describes an animation once (frame layout, rate, looping);
//! every combatant plays its own clock instantiated from it so that two
//! entities sharing art never share a timer.

use std::sync::Arc;

use crate::core::error::{DuelError, Result};
use crate::sprites::atlas::FrameRegion;
use crate::sprites::library::AnimationKind;

/// Immutable description of an animation strip.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPrototype {
    frames: Arc<[FrameRegion]>,
    frames_per_second: u32,
    looping: bool,
}

impl AnimationPrototype {
    /// Build a prototype of `frame_count` frames laid out left-to-right from `first_frame`.
    ///
    /// Fails when the frame count or rate is zero, or when the strip would run
    /// past the `u32` coordinate range.
    pub fn new(
        kind: AnimationKind,
        first_frame: FrameRegion,
        frame_count: u32,
        frames_per_second: u32,
        looping: bool,
    ) -> Result<Self> {
        if frame_count == 0 {
            return Err(DuelError::InvalidAnimation {
                kind,
                reason: "frame count must be positive".into(),
            });
        }
        if frames_per_second == 0 {
            return Err(DuelError::InvalidAnimation {
                kind,
                reason: "frames per second must be positive".into(),
            });
        }

        let frames = FrameRegion::strip(first_frame, frame_count as usize).ok_or_else(|| {
            DuelError::InvalidAnimation {
                kind,
                reason: "frame strip runs past the sprite sheet coordinate range".into(),
            }
        })?;

        Ok(Self {
            frames: frames.into(),
            frames_per_second,
            looping,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Create a fresh clock playing this animation from frame 0.
    pub fn instantiate(&self) -> AnimationClock {
        AnimationClock {
            frames: Arc::clone(&self.frames),
            frame_interval: 1.0 / self.frames_per_second as f32,
            frames_per_second: self.frames_per_second,
            elapsed: 0.0,
            current: 0,
            looping: self.looping,
        }
    }
}

/// Playback state for one animation on one entity.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    frames: Arc<[FrameRegion]>,
    /// Seconds each frame is displayed.
    frame_interval: f32,
    frames_per_second: u32,
    /// Time accumulated since the last frame step.
    elapsed: f32,
    current: usize,
    looping: bool,
}

impl AnimationClock {
    /// Accumulate `dt` seconds and take at most one frame step.
    ///
    /// Returns true if the frame changed. A non-looping clock resting on its
    /// last frame keeps accumulating time (that is what eventually makes it
    /// finished) but never changes frame again.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;

        if !self.looping && self.on_last_frame() {
            return false;
        }

        if self.elapsed >= self.frame_interval {
            self.elapsed -= self.frame_interval;
            self.current = if self.current + 1 < self.frames.len() {
                self.current + 1
            } else {
                0
            };
            return true;
        }
        false
    }

    /// Source rectangle of the frame currently displayed.
    pub fn current_frame(&self) -> FrameRegion {
        self.frames[self.current]
    }

    pub fn frame_index(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_interval(&self) -> f32 {
        self.frame_interval
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Looping clocks report finished whenever they sit on the last frame.
    /// Non-looping clocks additionally require the last frame to have been
    /// shown for a full frame interval.
    pub fn finished(&self) -> bool {
        if self.looping {
            self.on_last_frame()
        } else {
            self.on_last_frame() && self.elapsed >= self.frame_interval
        }
    }

    /// Rewind to frame 0 with an empty timer.
    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
    }

    /// Independent copy with the same strip, rate and looping, but a fresh timer.
    pub fn duplicate(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
            frame_interval: self.frame_interval,
            frames_per_second: self.frames_per_second,
            elapsed: 0.0,
            current: 0,
            looping: self.looping,
        }
    }

    fn on_last_frame(&self) -> bool {
        self.current == self.frames.len() - 1
    }
}
