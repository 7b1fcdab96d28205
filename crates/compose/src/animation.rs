//! Spin keyframes about the polar axis and the still renders taken along the way.

use std::path::PathBuf;

use lunar_config::{RenderConfig, RotationConfig};
use lunar_core::units::FULL_TURN_RAD;
use serde::Serialize;
use tracing::info;

use crate::ComposeError;
use crate::composer::SceneComposer;
use crate::host::{Channel, SceneHost};

/// Euler component the spin is keyed on.
const SPIN_CHANNEL: Channel = Channel::RotationEuler(2);

/// One full turn spread evenly over `start_frame..=end_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationSchedule {
    pub start_frame: i32,
    pub end_frame: i32,
    pub step: u32,
}

impl RotationSchedule {
    pub fn new(start_frame: i32, end_frame: i32, step: u32) -> Self {
        Self {
            start_frame,
            end_frame,
            step: step.max(1),
        }
    }

    /// Z rotation in radians at `frame`; frames outside the range extrapolate linearly.
    pub fn angle_at(&self, frame: i32) -> f64 {
        let start = f64::from(self.start_frame);
        let span = f64::from(self.end_frame) - start;
        if span <= 0.0 {
            return 0.0;
        }
        FULL_TURN_RAD * (f64::from(frame) - start) / span
    }

    /// `(frame, angle)` pairs every `step` frames, always ending on `end_frame`.
    pub fn keyframes(&self) -> Vec<(i32, f64)> {
        frame_steps(self.start_frame, self.end_frame, self.step)
            .into_iter()
            .map(|frame| (frame, self.angle_at(frame)))
            .collect()
    }
}

/// Frames `start, start + step, ...` up to and always including `end`; empty when `end < start`.
pub fn frame_steps(start: i32, end: i32, step: u32) -> Vec<i32> {
    if end < start {
        return Vec::new();
    }
    let mut frames: Vec<i32> = (start..=end).step_by(step.max(1) as usize).collect();
    if frames.last() != Some(&end) {
        frames.push(end);
    }
    frames
}

impl From<&RotationConfig> for RotationSchedule {
    fn from(config: &RotationConfig) -> Self {
        Self::new(config.start_frame, config.end_frame, config.step)
    }
}

/// `count` stills taken every `interval` frames from `first_frame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSchedule {
    pub first_frame: i32,
    pub interval: u32,
    pub count: u32,
    pub output_dir: PathBuf,
}

impl RenderSchedule {
    pub fn from_config(first_frame: i32, config: &RenderConfig) -> Self {
        Self {
            first_frame,
            interval: config.interval,
            count: config.count,
            output_dir: config.output_dir.clone(),
        }
    }

    /// Frame of every still, in order. Fails when the last one does not fit in an `i32`.
    pub fn frames(&self) -> Result<Vec<i32>, ComposeError> {
        (0..self.count)
            .map(|i| {
                i.checked_mul(self.interval)
                    .and_then(|offset| i32::try_from(offset).ok())
                    .and_then(|offset| self.first_frame.checked_add(offset))
                    .ok_or(ComposeError::FrameOutOfRange {
                        first: self.first_frame,
                        index: i,
                        interval: self.interval,
                    })
            })
            .collect()
    }

    /// Output file of the `index`-th still (0-based), numbered from 1.
    pub fn output_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("render_{}.png", index + 1))
    }
}

/// Key the Z rotation of `object` over the schedule. Returns the number of keys written.
pub fn animate_rotation<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    object: &str,
    schedule: &RotationSchedule,
) -> Result<usize, ComposeError> {
    let keys = schedule.keyframes();
    for (frame, angle) in &keys {
        composer.insert_keyframe(object, SPIN_CHANNEL, *frame, *angle)?;
    }
    info!(
        object,
        keys = keys.len(),
        start = schedule.start_frame,
        end = schedule.end_frame,
        "rotation keyed"
    );
    Ok(keys.len())
}

/// Key the rotation at each render frame and ask the host for a still. Returns the still count.
pub fn render_stills<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    object: &str,
    rotation: &RotationSchedule,
    renders: &RenderSchedule,
) -> Result<usize, ComposeError> {
    let frames = renders.frames()?;
    for (index, frame) in frames.iter().enumerate() {
        composer.insert_keyframe(object, SPIN_CHANNEL, *frame, rotation.angle_at(*frame))?;
        composer.render_frame(*frame, &renders.output_path(index))?;
    }
    info!(
        stills = frames.len(),
        dir = %renders.output_dir.display(),
        "renders requested"
    );
    Ok(frames.len())
}
