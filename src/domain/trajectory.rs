// ============================================================
// Layer 3 — Trajectory and TrajectorySample
// ============================================================
// A Trajectory is what the simulator produces: the square's
// position once per recorded frame, plus everything needed to
// reproduce it (initial conditions, physics, frame rate).
//
// A TrajectorySample is what goes into a dataset file: a
// trajectory with an id, the split it belongs to and the
// standard deviation of any Gaussian noise added to it.
//
// Frames are kept in memory only (serde skips them); on disk
// they are written separately as PBM images.
//
// Reference: Rust Book §5 (Structs), serde derive docs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::frame::Frame;
use crate::domain::params::{InitialConditions, PhysicsParams, Point};

/// A recorded coordinate sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub initial:    InitialConditions,
    pub params:     PhysicsParams,
    /// Physics substeps between two recorded positions.
    pub frame_rate: usize,
    /// One physics-space position per recorded frame.
    /// The launch position is NOT included.
    pub positions:  Vec<Point>,
    #[serde(skip)]
    pub frames:     Vec<Frame>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Euclidean distance travelled between consecutive frames.
    pub fn step_displacements(&self) -> Vec<f64> {
        self.positions
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]).hypot(w[1][1] - w[0][1]))
            .collect()
    }
}

// ─── Split ────────────────────────────────────────────────────────────────────
/// Which file of the dataset a sample lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    /// Physics drawn from ranges disjoint from the training ranges.
    Ood,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val   => "val",
            Split::Ood   => "ood",
        }
    }

    /// Name of the JSONL file holding this split.
    pub fn file_name(&self) -> String {
        format!("{}.jsonl", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── TrajectorySample ─────────────────────────────────────────────────────────
/// One labelled row of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub id:         usize,
    pub split:      Split,
    /// Standard deviation of the Gaussian noise added to `positions`
    /// (0.0 means the positions are exact simulator output).
    pub noise_std:  f64,
    pub trajectory: Trajectory,
}

impl TrajectorySample {
    pub fn new(id: usize, split: Split, trajectory: Trajectory) -> Self {
        Self { id, split, noise_std: 0.0, trajectory }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line() -> Trajectory {
        Trajectory {
            initial:    InitialConditions { speed: 0.0, direction: 0.0, position: [0.0, 0.0] },
            params:     PhysicsParams { gravity: 0.0, restitution: 1.0 },
            frame_rate: 1,
            positions:  vec![[0.0, 0.0], [3.0, 4.0], [3.0, 5.0]],
            frames:     Vec::new(),
        }
    }

    #[test]
    fn test_step_displacements() {
        let d = straight_line().step_displacements();
        assert_eq!(d.len(), 2);
        assert!((d[0] - 5.0).abs() < 1e-12);
        assert!((d[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_names() {
        assert_eq!(Split::Ood.file_name(), "ood.jsonl");
        assert_eq!(Split::Val.to_string(), "val");
        assert_eq!(serde_json::to_string(&Split::Train).unwrap(), "\"train\"");
    }

    #[test]
    fn test_frames_are_not_serialised() {
        let mut t = straight_line();
        t.frames.push(Frame::blank(2, 2));
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("frames"));

        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert!(back.frames.is_empty());
        assert_eq!(back.positions, t.positions);
    }
}
