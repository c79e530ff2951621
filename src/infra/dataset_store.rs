// ============================================================
// Layer 6 — Dataset Store
// ============================================================
// Owns one dataset directory and everything written to it.
//
// File layout:
//   <output_dir>/
//     config.json      ← the exact config that produced the data
//     train.jsonl      ← one TrajectorySample per line
//     val.jsonl
//     ood.jsonl        ← only when an OOD split was requested
//     episodes.jsonl   ← written by the `episodes` command
//     positions.csv    ← see positions_csv.rs
//     frames/…         ← see frame_writer.rs
//
// Why JSON Lines?
//   Each line is a complete JSON document, so files can be
//   streamed, concatenated, `head`-ed or `wc -l`-ed without a
//   parser that understands the whole file.
//
// Why save the config?
//   With the seed and every range on disk, any dataset can be
//   regenerated bit for bit later.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::traits::SampleSink;
use crate::domain::trajectory::{Split, TrajectorySample};

const CONFIG_FILE: &str = "config.json";

/// Reads and writes the files of one dataset directory.
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Open (and create if needed) a dataset directory.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create dataset directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing dataset directory for reading.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            anyhow::bail!(
                "Dataset directory '{}' does not exist. Run 'generate' first.",
                dir.display()
            );
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save the run configuration as pretty JSON.
    pub fn save_config<T: Serialize>(&self, cfg: &T) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config<T: DeserializeOwned>(&self) -> Result<T> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config in '{}'", path.display()))
    }

    /// Write `items` to `<dir>/<file_name>`, one JSON document per line.
    pub fn write_jsonl<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        let file = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);

        for item in items {
            serde_json::to_writer(&mut out, item)?;
            out.write_all(b"\n")?;
        }
        out.flush()
            .with_context(|| format!("Cannot flush '{}'", path.display()))?;

        tracing::debug!("Wrote {} records to '{}'", items.len(), path.display());
        Ok(path)
    }

    /// Read every line of `<dir>/<file_name>` as one `T`.
    /// Blank lines are skipped; a malformed line is an error that
    /// names the file and line number.
    pub fn read_jsonl<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file_name);
        let file = fs::File::open(&path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        let mut items = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let item = serde_json::from_str(&line).with_context(|| {
                format!("Malformed record at {}:{}", path.display(), line_no + 1)
            })?;
            items.push(item);
        }
        Ok(items)
    }

    pub fn read_split(&self, split: Split) -> Result<Vec<TrajectorySample>> {
        self.read_jsonl(&split.file_name())
    }

    pub fn has_split(&self, split: Split) -> bool {
        self.dir.join(split.file_name()).is_file()
    }

    /// Delete a split left over from an earlier run.
    /// Returns whether a file was removed.
    pub fn remove_split(&self, split: Split) -> Result<bool> {
        let path = self.dir.join(split.file_name());
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .with_context(|| format!("Cannot remove stale split '{}'", path.display()))?;
        tracing::info!("Removed stale '{}'", path.display());
        Ok(true)
    }
}

/// Load any JSON document from an arbitrary path (e.g. a `--config` file).
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Malformed JSON in '{}'", path.display()))
}

impl SampleSink for DatasetStore {
    fn write_split(&self, split: Split, samples: &[TrajectorySample]) -> Result<()> {
        let path = self.write_jsonl(&split.file_name(), samples)?;
        tracing::info!("Wrote {} {} samples to '{}'", samples.len(), split, path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{InitialConditions, PhysicsParams};
    use crate::domain::trajectory::Trajectory;

    fn sample(id: usize) -> TrajectorySample {
        TrajectorySample::new(
            id,
            Split::Val,
            Trajectory {
                initial:    InitialConditions { speed: 1.0, direction: 0.5, position: [3.0, 4.0] },
                params:     PhysicsParams { gravity: 7.0, restitution: 0.75 },
                frame_rate: 30,
                positions:  vec![[3.5, 4.0], [4.0, 3.5]],
                frames:     Vec::new(),
            },
        )
    }

    #[test]
    fn test_split_round_trip() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = DatasetStore::create(tmp.path()).unwrap();

        store.write_split(Split::Val, &[sample(0), sample(1)]).unwrap();
        assert!(store.has_split(Split::Val));
        assert!(!store.has_split(Split::Ood));

        let back = store.read_split(Split::Val).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].id, 1);
        assert_eq!(back[0].trajectory.positions, vec![[3.5, 4.0], [4.0, 3.5]]);
        assert_eq!(back[0].trajectory.params.restitution, 0.75);
    }

    #[test]
    fn test_config_round_trip() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = DatasetStore::create(tmp.path().join("nested/dir")).unwrap();
        store.save_config(&vec![1u32, 2, 3]).unwrap();
        let back: Vec<u32> = store.load_config().unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_line_names_location() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = DatasetStore::create(tmp.path()).unwrap();
        fs::write(tmp.path().join("train.jsonl"), "\n{not json}\n").unwrap();

        let err = store.read_split(Split::Train).unwrap_err();
        assert!(format!("{err:#}").contains("train.jsonl:2"));
    }

    #[test]
    fn test_remove_split() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = DatasetStore::create(tmp.path()).unwrap();
        store.write_split(Split::Ood, &[sample(0)]).unwrap();

        assert!(store.remove_split(Split::Ood).unwrap());
        assert!(!store.has_split(Split::Ood));
        assert!(!store.remove_split(Split::Ood).unwrap());
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(DatasetStore::open(tmp.path().join("nope")).is_err());
    }
}
