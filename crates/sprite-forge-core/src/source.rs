use crate::canvas::Canvas;
use crate::error::Result;
use image::ImageReader;
use std::path::{Path, PathBuf};
use tracing::{error, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A decoded sprite to pack (file name + RGBA pixels).
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub canvas: Canvas,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            canvas,
        }
    }
}

/// A source file that could not be read or decoded.
#[derive(Debug, Clone)]
pub struct InputFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Decoded sources in input order plus the files that were skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub sources: Vec<SourceImage>,
    pub failures: Vec<InputFailure>,
}

/// Decodes one file; the manifest name is the file name.
pub fn load_source(path: &Path) -> Result<SourceImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok(SourceImage::new(name, Canvas::from_rgba(img.to_rgba8())))
}

/// Decodes every path, skipping (and reporting) the ones that fail.
///
/// Output order matches `paths` regardless of `parallel`.
pub fn load_sources(paths: &[PathBuf], parallel: bool) -> LoadReport {
    load_sources_with(paths, parallel, |_| {})
}

/// Like [`load_sources`], calling `on_item` once per path after it has been
/// attempted (success or failure). With `parallel`, calls arrive from rayon
/// workers in completion order.
#[instrument(skip_all, fields(count = paths.len()))]
pub fn load_sources_with<F>(paths: &[PathBuf], parallel: bool, on_item: F) -> LoadReport
where
    F: Fn(&Path) + Sync,
{
    let load = |p: &PathBuf| {
        let res = load_source(p);
        on_item(p);
        res
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<SourceImage>> = if parallel {
        paths.par_iter().map(load).collect()
    } else {
        paths.iter().map(load).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<SourceImage>> = {
        let _ = parallel;
        paths.iter().map(load).collect()
    };

    let mut report = LoadReport::default();
    for (path, res) in paths.iter().zip(results) {
        match res {
            Ok(src) => report.sources.push(src),
            Err(e) => {
                error!(?path, error = %e, "skip source");
                report.failures.push(InputFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
