//! Animation prototypes and per-combatant animation sets.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};
use crate::sprites::animation::{AnimationClock, AnimationPrototype};
use crate::sprites::atlas::FrameRegion;

/// Named motions a combatant can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    #[default]
    Idle,
    Walk,
    WalkBackwards,
    Attack,
    Die,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Idle,
        AnimationKind::Walk,
        AnimationKind::WalkBackwards,
        AnimationKind::Attack,
        AnimationKind::Die,
    ];
}

/// Serializable description of one animation strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub kind: AnimationKind,
    pub first_frame: FrameRegion,
    pub frames: u32,
    pub fps: u32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl AnimationSpec {
    pub fn new(
        kind: AnimationKind,
        first_frame: FrameRegion,
        frames: u32,
        fps: u32,
        looping: bool,
    ) -> Self {
        Self {
            kind,
            first_frame,
            frames,
            fps,
            looping,
        }
    }

    /// The stick-figure strips: idle/walk/walk-backwards share one 4-frame
    /// sheet, attack/die share an 8-frame sheet. Every frame is 100x200.
    pub fn stick_figure() -> Vec<AnimationSpec> {
        vec![
            AnimationSpec::new(
                AnimationKind::Idle,
                FrameRegion::new(0, 0, 100, 200),
                4,
                2,
                true,
            ),
            AnimationSpec::new(
                AnimationKind::Walk,
                FrameRegion::new(0, 200, 100, 200),
                4,
                10,
                true,
            ),
            AnimationSpec::new(
                AnimationKind::WalkBackwards,
                FrameRegion::new(0, 400, 100, 200),
                4,
                10,
                true,
            ),
            // Attack must not loop: its completion ends the strike
            AnimationSpec::new(
                AnimationKind::Attack,
                FrameRegion::new(0, 0, 100, 200),
                8,
                16,
                false,
            ),
            AnimationSpec::new(
                AnimationKind::Die,
                FrameRegion::new(0, 200, 100, 200),
                8,
                6,
                false,
            ),
        ]
    }
}

/// Registry of animation prototypes, injected wherever combatants are built.
#[derive(Clone, Debug, Default)]
pub struct AnimationLibrary {
    prototypes: AHashMap<AnimationKind, AnimationPrototype>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from specs, validating each one.
    pub fn from_specs(specs: &[AnimationSpec]) -> Result<Self> {
        let mut library = Self::new();
        for spec in specs {
            let prototype = AnimationPrototype::new(
                spec.kind,
                spec.first_frame,
                spec.frames,
                spec.fps,
                spec.looping,
            )?;
            library.insert(spec.kind, prototype);
        }
        Ok(library)
    }

    /// The default stick-figure library.
    pub fn stick_figure() -> Result<Self> {
        Self::from_specs(&AnimationSpec::stick_figure())
    }

    pub fn insert(&mut self, kind: AnimationKind, prototype: AnimationPrototype) {
        self.prototypes.insert(kind, prototype);
    }

    pub fn get(&self, kind: AnimationKind) -> Option<&AnimationPrototype> {
        self.prototypes.get(&kind)
    }

    /// Fails if any named motion is missing.
    pub fn ensure_complete(&self) -> Result<()> {
        match AnimationKind::ALL.iter().find(|kind| !self.prototypes.contains_key(kind)) {
            Some(kind) => Err(DuelError::MissingAnimation(*kind)),
            None => Ok(()),
        }
    }

    /// Instantiate an independent clock for every named motion, starting on idle.
    pub fn instantiate_set(&self) -> Result<AnimationSet> {
        self.ensure_complete()?;
        let clocks = self
            .prototypes
            .iter()
            .map(|(kind, prototype)| (*kind, prototype.instantiate()))
            .collect();
        Ok(AnimationSet {
            clocks,
            current: AnimationKind::Idle,
        })
    }
}

/// One combatant's private clocks plus which one is showing.
#[derive(Clone, Debug)]
pub struct AnimationSet {
    clocks: AHashMap<AnimationKind, AnimationClock>,
    current: AnimationKind,
}

impl AnimationSet {
    /// Make `kind` the current animation. Switching rewinds the new clock;
    /// selecting the animation that is already current leaves it playing.
    pub fn select(&mut self, kind: AnimationKind) {
        if self.current != kind {
            self.current = kind;
            if let Some(clock) = self.clocks.get_mut(&kind) {
                clock.reset();
            }
        }
    }

    pub fn current_kind(&self) -> AnimationKind {
        self.current
    }

    pub fn current(&self) -> &AnimationClock {
        // Sets are only built by `instantiate_set`, which requires every kind
        &self.clocks[&self.current]
    }

    pub fn clock(&self, kind: AnimationKind) -> Option<&AnimationClock> {
        self.clocks.get(&kind)
    }

    /// Advance only the current animation.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.clocks.get_mut(&self.current) {
            Some(clock) => clock.advance(dt),
            None => false,
        }
    }

    pub fn current_frame(&self) -> FrameRegion {
        self.current().current_frame()
    }

    pub fn finished(&self) -> bool {
        self.current().finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_figure_is_complete() {
        let library = AnimationLibrary::stick_figure().unwrap();
        assert!(library.ensure_complete().is_ok());

        let die = library.get(AnimationKind::Die).unwrap();
        assert_eq!(die.frame_count(), 8);
        assert_eq!(die.frames_per_second(), 6);
        assert!(!die.is_looping());
        assert!(!library.get(AnimationKind::Attack).unwrap().is_looping());
        assert!(library.get(AnimationKind::Idle).unwrap().is_looping());
    }

    #[test]
    fn test_incomplete_library_rejected() {
        let specs: Vec<_> = AnimationSpec::stick_figure()
            .into_iter()
            .filter(|s| s.kind != AnimationKind::Attack)
            .collect();
        let library = AnimationLibrary::from_specs(&specs).unwrap();
        assert!(matches!(
            library.instantiate_set(),
            Err(DuelError::MissingAnimation(AnimationKind::Attack))
        ));
    }

    #[test]
    fn test_sets_do_not_share_timers() {
        let library = AnimationLibrary::stick_figure().unwrap();
        let mut a = library.instantiate_set().unwrap();
        let b = library.instantiate_set().unwrap();

        a.advance(0.5);
        assert_eq!(a.current().frame_index(), 1);
        assert_eq!(b.current().frame_index(), 0);
    }

    #[test]
    fn test_select_resets_only_on_switch() {
        let library = AnimationLibrary::stick_figure().unwrap();
        let mut set = library.instantiate_set().unwrap();

        set.select(AnimationKind::Walk);
        set.advance(0.1);
        assert_eq!(set.current().frame_index(), 1);

        // Re-selecting keeps playback position
        set.select(AnimationKind::Walk);
        assert_eq!(set.current().frame_index(), 1);

        // Switching away leaves the old clock alone; switching back rewinds it
        set.select(AnimationKind::Idle);
        assert_eq!(set.clock(AnimationKind::Walk).unwrap().frame_index(), 1);
        set.select(AnimationKind::Walk);
        assert_eq!(set.current().frame_index(), 0);
    }
}
