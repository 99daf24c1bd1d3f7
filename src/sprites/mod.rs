//! Sprite animation: frame regions, animation clocks and prototype libraries.

pub mod animation;
pub mod atlas;
pub mod library;

pub use animation::{AnimationClock, AnimationPrototype};
pub use atlas::FrameRegion;
pub use library::{AnimationKind, AnimationLibrary, AnimationSet, AnimationSpec};
