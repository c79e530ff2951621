// ============================================================
// Layer 6 — Frame Writer
// ============================================================
// Writes rendered frames as plain PBM images:
//
//   <output_dir>/frames/<split>/<id:06>/<t:04>.pbm
//
// PBM is the simplest image format there is (a text header and
// a grid of 0/1), readable by ImageMagick, GIMP, PIL and most
// viewers.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::trajectory::TrajectorySample;

pub struct FrameWriter {
    root: PathBuf,
}

impl FrameWriter {
    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self { root: dataset_dir.into().join("frames") }
    }

    /// Delete every frame written by an earlier run.
    pub fn clear(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).with_context(|| {
                format!("Cannot remove old frames under '{}'", self.root.display())
            })?;
            tracing::debug!("Cleared '{}'", self.root.display());
        }
        Ok(())
    }

    /// Write every frame of `sample`; returns how many were written.
    pub fn write_sample(&self, sample: &TrajectorySample) -> Result<usize> {
        let frames = &sample.trajectory.frames;
        if frames.is_empty() {
            return Ok(0);
        }

        let dir = self
            .root
            .join(sample.split.as_str())
            .join(format!("{:06}", sample.id));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create frame directory '{}'", dir.display()))?;

        for (t, frame) in frames.iter().enumerate() {
            let path = dir.join(format!("{t:04}.pbm"));
            fs::write(&path, frame.to_pbm())
                .with_context(|| format!("Cannot write frame '{}'", path.display()))?;
        }
        Ok(frames.len())
    }

    pub fn write_all(&self, samples: &[TrajectorySample]) -> Result<usize> {
        let mut total = 0;
        for s in samples {
            total += self.write_sample(s)?;
        }
        if total > 0 {
            tracing::debug!("Wrote {} frames under '{}'", total, self.root.display());
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{InitialConditions, PhysicsParams};
    use crate::domain::trajectory::{Split, Trajectory};
    use crate::sim::raster::draw_frame;

    #[test]
    fn test_writes_one_file_per_frame() {
        let tmp    = tempfile::tempdir().unwrap();
        let writer = FrameWriter::new(tmp.path());

        let positions = vec![[4.0, 4.0], [5.0, 5.0]];
        let sample = TrajectorySample::new(
            7,
            Split::Train,
            Trajectory {
                initial:    InitialConditions { speed: 0.0, direction: 0.0, position: [4.0, 4.0] },
                params:     PhysicsParams { gravity: 5.0, restitution: 0.5 },
                frame_rate: 30,
                frames:     positions.iter().map(|&p| draw_frame(p)).collect(),
                positions,
            },
        );

        assert_eq!(writer.write_all(&[sample]).unwrap(), 2);
        let second = tmp.path().join("frames/train/000007/0001.pbm");
        let text   = fs::read_to_string(second).unwrap();
        assert!(text.starts_with("P1\n16 16\n"));
        let body: String = text.lines().skip(2).collect();
        assert_eq!(body.matches('1').count(), 1);
    }

    #[test]
    fn test_clear_removes_old_frames() {
        let tmp    = tempfile::tempdir().unwrap();
        let writer = FrameWriter::new(tmp.path());
        let stale  = tmp.path().join("frames/ood/000042");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("0000.pbm"), "P1\n1 1\n1\n").unwrap();

        writer.clear().unwrap();
        assert!(!tmp.path().join("frames").exists());
        // clearing an absent directory is fine
        writer.clear().unwrap();
    }

    #[test]
    fn test_sample_without_frames_writes_nothing() {
        let tmp    = tempfile::tempdir().unwrap();
        let writer = FrameWriter::new(tmp.path());
        let sample = TrajectorySample::new(
            0,
            Split::Val,
            Trajectory {
                initial:    InitialConditions { speed: 0.0, direction: 0.0, position: [4.0, 4.0] },
                params:     PhysicsParams { gravity: 5.0, restitution: 0.5 },
                frame_rate: 30,
                positions:  vec![[4.0, 4.0]],
                frames:     Vec::new(),
            },
        );
        assert_eq!(writer.write_sample(&sample).unwrap(), 0);
        assert!(!tmp.path().join("frames").exists());
    }
}
