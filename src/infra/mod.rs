// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem:
//
//   dataset_store.rs — the dataset directory: config.json and
//                      the JSON Lines files for each split and
//                      for ICL episodes. Implements SampleSink.
//
//   positions_csv.rs — flat CSV of every recorded position,
//                      for plotting and spreadsheets.
//
//   frame_writer.rs  — rendered frames as PBM images.
//
// Keeping I/O here means the data and simulation layers can be
// tested without touching disk.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Dataset directory: config + JSONL splits
pub mod dataset_store;

/// Flat CSV export of positions
pub mod positions_csv;

/// PBM frame images
pub mod frame_writer;
