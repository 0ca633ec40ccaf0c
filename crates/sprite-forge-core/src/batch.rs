//! Filesystem-facing runs: write the character sheets, or pack a directory of
//! sprites into the atlas image and manifest.

use crate::config::ForgeConfig;
use crate::encode::save;
use crate::error::Result;
use crate::export::write_manifest;
use crate::model::PackStats;
use crate::pipeline::{Ineligible, Rejection, pack_sources};
use crate::sheet::{SheetKind, build_sheet};
use crate::source::{InputFailure, LoadReport};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// An output file that could not be written.
#[derive(Debug, Clone)]
pub struct OutputFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct SheetRunReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<OutputFailure>,
}

impl SheetRunReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct AtlasRunReport {
    /// Number of sources that decoded.
    pub loaded: usize,
    pub input_failures: Vec<InputFailure>,
    pub ineligible: Vec<Ineligible>,
    pub rejected: Vec<Rejection>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<OutputFailure>,
    pub stats: PackStats,
}

impl AtlasRunReport {
    /// True when every input was decoded, placed and written.
    pub fn is_complete(&self) -> bool {
        self.input_failures.is_empty()
            && self.rejected.is_empty()
            && self.ineligible.is_empty()
            && self.failures.is_empty()
    }
}

fn record(
    written: &mut Vec<PathBuf>,
    failures: &mut Vec<OutputFailure>,
    path: PathBuf,
    res: Result<()>,
) {
    match res {
        Ok(()) => {
            info!(path = %path.display(), "wrote");
            written.push(path);
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "write failed");
            failures.push(OutputFailure {
                path,
                error: e.to_string(),
            });
        }
    }
}

/// Renders the idle and walk sheets and writes each in every configured encoding.
///
/// A failed encode is recorded and the remaining files are still written.
#[instrument(skip_all)]
pub fn write_sheets(cfg: &ForgeConfig) -> Result<SheetRunReport> {
    cfg.validate()?;
    let dir = &cfg.output.sprite_dir;
    fs::create_dir_all(dir)?;

    let mut report = SheetRunReport::default();
    for kind in SheetKind::ALL {
        let sheet = build_sheet(kind, cfg)?;
        let stem = kind.file_stem(&cfg.sheet);
        for enc in &cfg.output.sheet_encodings {
            let path = dir.join(format!("{stem}.{}", enc.extension()));
            let res = save(&sheet, &path, *enc);
            record(&mut report.written, &mut report.failures, path, res);
        }
    }
    Ok(report)
}

/// Packs `sources` and writes `<atlas_name>.<ext>` plus `<atlas_name>.json`.
///
/// Only directory creation, invalid config and atlas allocation are fatal.
#[instrument(skip_all, fields(sources = sources.sources.len()))]
pub fn write_atlas(sources: LoadReport, cfg: &ForgeConfig) -> Result<AtlasRunReport> {
    cfg.output.validate()?;
    let dir = &cfg.output.atlas_dir;
    fs::create_dir_all(dir)?;

    let LoadReport { sources, failures } = sources;
    let loaded = sources.len();
    let out = pack_sources(sources, &cfg.atlas)?;
    let stats = out.stats();

    let mut report = AtlasRunReport {
        loaded,
        input_failures: failures,
        stats,
        ..Default::default()
    };

    let name = &cfg.output.atlas_name;
    let enc = cfg.output.atlas_encoding;
    let image_path = dir.join(format!("{name}.{}", enc.extension()));
    let res = save(&out.atlas, &image_path, enc);
    record(&mut report.written, &mut report.failures, image_path, res);

    let json_path = dir.join(format!("{name}.json"));
    let res = write_manifest(&out.manifest, &json_path);
    record(&mut report.written, &mut report.failures, json_path, res);

    report.ineligible = out.ineligible;
    report.rejected = out.rejected;
    info!(
        packed = report.stats.num_entries,
        occupancy = report.stats.occupancy,
        "atlas run finished"
    );
    Ok(report)
}
