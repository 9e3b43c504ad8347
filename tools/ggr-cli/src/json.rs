//! JSON command - export every replay as a JSON document

use anyhow::{Context, Result};
use clap::Args;
use ggr_core::replay::json::to_json_pretty;
use ggr_core::replay::store::decode_source;
use ggr_core::replay::{CorruptReplay, ReplayFile};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::replays;

/// Arguments for the json command
#[derive(Args)]
pub struct JsonArgs {
    /// Replay folder (defaults to the configured one)
    pub dir: Option<PathBuf>,

    /// Output folder
    #[arg(short, long)]
    pub out: PathBuf,

    /// Write every document directly into the output folder
    #[arg(long)]
    pub flat: bool,
}

/// Execute the json command
pub fn execute(args: JsonArgs) -> Result<()> {
    let config = ggr_core::config::load();
    let dir = replays::resolve_dir(args.dir, &config);
    let files = replays::scan(&dir, &config)?;

    let (written, failures) = export(&files, &args.out, args.flat)?;

    println!("Wrote {} JSON file(s) to {}", written, args.out.display());
    replays::report_failures(&failures);
    Ok(())
}

/// Decode and write each replay. Returns the count written and the
/// corrupt replays, in scan order.
pub fn export(files: &[ReplayFile], out: &Path, flat: bool) -> Result<(usize, Vec<CorruptReplay>)> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let results: Vec<Result<Option<CorruptReplay>>> = files
        .par_iter()
        .map(|file| {
            let record = match decode_source(file) {
                Ok(record) => record,
                Err(corrupt) => return Ok(Some(corrupt)),
            };

            let target = output_path(out, &file.relative, flat);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let json = to_json_pretty(&record)
                .with_context(|| format!("Failed to serialize {}", file.relative.display()))?;
            std::fs::write(&target, json)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            Ok(None)
        })
        .collect();

    let mut written = 0;
    let mut failures = Vec::new();
    for result in results {
        match result? {
            Some(corrupt) => failures.push(corrupt),
            None => written += 1,
        }
    }
    Ok((written, failures))
}

/// `relative` with a `.json` extension, under `out`
fn output_path(out: &Path, relative: &Path, flat: bool) -> PathBuf {
    let relative = if flat {
        relative
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| relative.to_path_buf())
    } else {
        relative.to_path_buf()
    };
    out.join(relative).with_extension("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ggr_core::replay::binary::layout::{CONTAINER_LEN, MAGIC};
    use ggr_core::replay::scan_dir;

    // Smallest container the decoder accepts: every field zeroed except the
    // ones that must hold valid codes
    fn minimal_replay(p1: u8, p2: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; CONTAINER_LEN];
        bytes[..MAGIC.len()].copy_from_slice(&MAGIC);
        bytes[0x72] = p1;
        bytes[0x73] = p2;
        bytes[0x87] = 1;
        bytes
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("out");
        let relative = Path::new("2024").join("match.ggr");
        assert_eq!(
            output_path(out, &relative, false),
            Path::new("out").join("2024").join("match.json")
        );
        assert_eq!(output_path(out, &relative, true), Path::new("out").join("match.json"));
    }

    #[test]
    fn test_export_mirrors_layout() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("sub")).unwrap();
        std::fs::write(src.path().join("a.ggr"), minimal_replay(1, 2)).unwrap();
        std::fs::write(src.path().join("sub").join("b.ggr"), minimal_replay(3, 4)).unwrap();
        std::fs::write(src.path().join("broken.ggr"), b"nope").unwrap();

        let files = scan_dir(src.path(), "ggr").unwrap();
        let (written, failures) = export(&files, dst.path(), false).unwrap();

        assert_eq!(written, 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "broken.ggr");

        let doc = std::fs::read_to_string(dst.path().join("sub").join("b.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["player1"]["character"], "May");
        assert_eq!(value["player2"]["character"], "Millia");
        assert_eq!(value["winner"], "player1");
    }

    #[test]
    fn test_export_flat() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let deep = src.path().join("deep").join("er");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::write(deep.join("c.ggr"), minimal_replay(1, 1)).unwrap();

        let files = scan_dir(src.path(), "ggr").unwrap();
        let (written, failures) = export(&files, dst.path(), true).unwrap();

        assert_eq!((written, failures.len()), (1, 0));
        assert!(dst.path().join("c.json").is_file());
    }
}
