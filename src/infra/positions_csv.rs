// ============================================================
// Layer 6 — Positions CSV Writer
// ============================================================
// Writes every recorded position of every sample as one CSV row,
// for quick plotting in a spreadsheet or pandas.
//
// Output file: <output_dir>/positions.csv
//
// Example:
//   id,split,t,x,y,gravity,restitution,noise_std
//   0,train,0,9.412003,5.118270,7.215531,0.804212,0.000000
//   0,train,1,12.004815,1.500000,7.215531,0.804212,0.000000
//   ...
//
// `t` counts recorded frames starting at 0 (the first position
// AFTER launch), not physics substeps.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::trajectory::TrajectorySample;

const HEADER: &str = "id,split,t,x,y,gravity,restitution,noise_std";

pub struct PositionsCsv {
    csv_path: PathBuf,
}

impl PositionsCsv {
    /// Start a fresh CSV (any previous file is truncated) with the header row.
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let csv_path = dir.join("positions.csv");

        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{HEADER}")?;
        tracing::debug!("Created positions CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append all positions of `samples`.
    pub fn append(&self, samples: &[TrajectorySample]) -> Result<usize> {
        let f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;
        let mut out  = BufWriter::new(f);
        let mut rows = 0usize;

        for s in samples {
            let params = s.trajectory.params;
            for (t, p) in s.trajectory.positions.iter().enumerate() {
                writeln!(
                    out,
                    "{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6}",
                    s.id,
                    s.split,
                    t,
                    p[0],
                    p[1],
                    params.gravity,
                    params.restitution,
                    s.noise_std,
                )?;
                rows += 1;
            }
        }
        out.flush()?;

        tracing::debug!("Appended {} rows to '{}'", rows, self.csv_path.display());
        Ok(rows)
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{InitialConditions, PhysicsParams};
    use crate::domain::trajectory::{Split, Trajectory};

    #[test]
    fn test_rows_and_header() {
        let tmp = tempfile::tempdir().unwrap();
        let csv = PositionsCsv::create(tmp.path()).unwrap();

        let s = TrajectorySample::new(
            3,
            Split::Ood,
            Trajectory {
                initial:    InitialConditions { speed: 0.0, direction: 0.0, position: [0.0, 0.0] },
                params:     PhysicsParams { gravity: 12.5, restitution: 0.25 },
                frame_rate: 30,
                positions:  vec![[1.5, 2.0], [2.5, 3.0]],
                frames:     Vec::new(),
            },
        );
        assert_eq!(csv.append(&[s]).unwrap(), 2);

        let text  = fs::read_to_string(csv.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "3,ood,0,1.500000,2.000000,12.500000,0.250000,0.000000");
        assert_eq!(lines.len(), 3);
    }
}
