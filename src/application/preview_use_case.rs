// ============================================================
// Layer 2 — PreviewUseCase
// ============================================================
// Simulates ONE trajectory from explicit parameters and returns
// its frames as ASCII art, so a physics setting can be eyeballed
// in a terminal before committing to a full dataset run.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::sequence::{generate_sequence, SequenceOptions};
use crate::domain::params::{InitialConditions, PhysicsParams, Point};
use crate::sim::world::BoxWorld;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub speed:           f64,
    pub direction:       f64,
    pub x:               f64,
    pub y:               f64,
    pub gravity:         f64,
    pub restitution:     f64,
    pub sequence_length: usize,
    pub frame_rate:      usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            speed:           5.0,
            direction:       0.5,
            x:               8.0,
            y:               8.0,
            gravity:         9.8,
            restitution:     0.8,
            sequence_length: 10,
            frame_rate:      30,
        }
    }
}

/// One recorded frame of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub t:        usize,
    pub position: Point,
    pub ascii:    String,
}

pub struct PreviewUseCase {
    config: PreviewConfig,
}

impl PreviewUseCase {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<PreviewFrame>> {
        let cfg     = &self.config;
        let params  = PhysicsParams::new(cfg.gravity, cfg.restitution)?;
        let initial = InitialConditions {
            speed:     cfg.speed,
            direction: cfg.direction,
            position:  [cfg.x, cfg.y],
        };
        let options = SequenceOptions {
            sequence_length: cfg.sequence_length,
            frame_rate:      cfg.frame_rate,
            render:          true,
        };

        let trajectory = generate_sequence(&BoxWorld::new(), &initial, params, options)?;
        tracing::debug!("Previewing {} frames", trajectory.len());

        Ok(trajectory
            .positions
            .iter()
            .zip(&trajectory.frames)
            .enumerate()
            .map(|(t, (&position, frame))| PreviewFrame {
                t,
                position,
                ascii: frame.to_ascii(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_frames() {
        let frames = PreviewUseCase::new(PreviewConfig::default()).execute().unwrap();
        assert_eq!(frames.len(), 10);
        for f in &frames {
            assert_eq!(f.ascii.lines().count(), 16);
            assert_eq!(f.ascii.matches('#').count(), 1);
        }
        assert_eq!(frames[3].t, 3);
    }

    #[test]
    fn test_preview_rejects_bad_physics() {
        let cfg = PreviewConfig { restitution: 2.0, ..Default::default() };
        assert!(PreviewUseCase::new(cfg).execute().is_err());
    }
}
