//! Frame-sequence animations for sprite instances.
//!
//! An animation is a list of sprite definitions, each shown for a fixed
//! duration. The atlas owns the definitions; instances only carry a
//! [`Playback`] cursor.

use crate::api::types::{AnimationId, DefinitionId};

/// One step of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Definition displayed during this frame.
    pub definition: DefinitionId,
    /// Seconds the frame stays on screen.
    pub duration: f32,
}

/// Ordered frame list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationDef {
    pub frames: Vec<AnimationFrame>,
}

impl AnimationDef {
    pub fn new(frames: Vec<AnimationFrame>) -> Self {
        Self { frames }
    }

    /// Consecutive definitions `first..first + count`, all shown for `1 / fps` seconds.
    pub fn strip(first: DefinitionId, count: u32, fps: f32) -> Self {
        let duration = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        let frames = (0..count)
            .map(|i| AnimationFrame {
                definition: DefinitionId(first.0 + i),
                duration,
            })
            .collect();
        Self { frames }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn total_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration.max(0.0)).sum()
    }

    /// A still animation never changes frame.
    pub fn is_still(&self) -> bool {
        self.frames.len() < 2 || self.total_duration() <= 0.0
    }
}

/// Playback cursor attached to a sprite instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub animation: AnimationId,
    /// Current frame index.
    pub frame: usize,
    /// Time spent in the current frame.
    pub elapsed: f32,
    /// Restart from frame 0 after the last frame.
    pub looping: bool,
    /// Set once a non-looping playback reached its last frame.
    pub finished: bool,
}

impl Playback {
    pub fn new(animation: AnimationId, looping: bool) -> Self {
        Self {
            animation,
            frame: 0,
            elapsed: 0.0,
            looping,
            finished: false,
        }
    }

    /// Definition shown at the current frame.
    pub fn current(&self, def: &AnimationDef) -> Option<DefinitionId> {
        def.frames.get(self.frame).map(|f| f.definition)
    }

    /// Advance by `dt` seconds. Returns true if the frame changed.
    /// Non-finite steps are ignored.
    pub fn advance(&mut self, def: &AnimationDef, dt: f32) -> bool {
        if self.finished || def.is_still() || !dt.is_finite() {
            return false;
        }

        let dt = dt.max(0.0);
        if self.looping {
            self.seek_in_cycle(def, dt)
        } else {
            self.elapsed += dt;
            self.step_through(def)
        }
    }

    /// Looping advance: place the cursor by its offset into the cycle, so
    /// any number of skipped cycles costs the same.
    fn seek_in_cycle(&mut self, def: &AnimationDef, dt: f32) -> bool {
        let before = self.frame;
        let played: f32 = def.frames[..self.frame.min(def.frames.len())]
            .iter()
            .map(|f| f.duration.max(0.0))
            .sum();
        let mut offset = (played + self.elapsed + dt) % def.total_duration();

        let last = def.frames.len() - 1;
        for (index, frame) in def.frames.iter().enumerate() {
            let duration = frame.duration.max(0.0);
            if offset < duration || index == last {
                self.frame = index;
                self.elapsed = offset.min(duration);
                break;
            }
            offset -= duration;
        }
        self.frame != before
    }

    /// One-shot advance: walk forward and stop on the last frame.
    fn step_through(&mut self, def: &AnimationDef) -> bool {
        let mut changed = false;
        while let Some(frame) = def.frames.get(self.frame) {
            let duration = frame.duration.max(0.0);
            if self.elapsed < duration {
                break;
            }
            self.elapsed -= duration;

            if self.frame + 1 < def.frames.len() {
                self.frame += 1;
                changed = true;
            } else {
                self.elapsed = 0.0;
                self.finished = true;
                break;
            }
        }
        changed
    }
}
