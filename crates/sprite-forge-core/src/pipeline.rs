use crate::canvas::Canvas;
use crate::config::AtlasConfig;
use crate::error::Result;
use crate::model::{AtlasManifest, PackStats, Rect};
use crate::packer::{Packer, shelf::ShelfPacker};
use crate::source::SourceImage;
use tracing::{debug, info, instrument, warn};

/// A source outside every size ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ineligible {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// An eligible source that did not fit in the remaining atlas space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Cursor row at the time of rejection.
    pub shelf_y: u32,
}

/// Output of a packing run: the atlas pixels, the manifest and what was left out.
#[derive(Debug)]
pub struct PackOutput {
    pub atlas: Canvas,
    pub manifest: AtlasManifest,
    pub rejected: Vec<Rejection>,
    pub ineligible: Vec<Ineligible>,
}

impl PackOutput {
    /// Manifest statistics including rejected and ineligible counts.
    pub fn stats(&self) -> PackStats {
        let mut stats = self.manifest.stats();
        stats.num_rejected = self.rejected.len();
        stats.num_ineligible = self.ineligible.len();
        stats
    }
}

/// Packs `sources` into one `cfg.width` x `cfg.height` atlas.
///
/// Notes:
/// - Sources outside every size ceiling are reported in `ineligible`.
/// - Eligible sources are stably sorted by height, tallest first, so ties keep
///   discovery order.
/// - Sources that run out of shelf space are reported in `rejected`; the rest of the
///   atlas is still produced.
/// - Failing to allocate the atlas canvas is the only error besides invalid config.
#[instrument(skip_all, fields(sources = sources.len()))]
pub fn pack_sources(sources: Vec<SourceImage>, cfg: &AtlasConfig) -> Result<PackOutput> {
    cfg.validate()?;
    let mut atlas = Canvas::try_new(cfg.width, cfg.height)?;

    let mut ineligible = Vec::new();
    let mut eligible: Vec<SourceImage> = Vec::with_capacity(sources.len());
    for src in sources {
        let (w, h) = src.canvas.dimensions();
        match cfg.eligible_tier(w, h) {
            Some(tier) => {
                debug!(name = %src.name, w, h, tier = %tier.label, "eligible");
                eligible.push(src);
            }
            None => {
                warn!(name = %src.name, w, h, "outside every size ceiling, skipping");
                ineligible.push(Ineligible {
                    name: src.name,
                    width: w,
                    height: h,
                });
            }
        }
    }

    // stable: equal heights keep discovery order
    eligible.sort_by(|a, b| b.canvas.height().cmp(&a.canvas.height()));

    let mut packer = ShelfPacker::new(cfg.width, cfg.height);
    let mut manifest = AtlasManifest::new(cfg.width, cfg.height);
    let mut rejected = Vec::new();
    for src in &eligible {
        let (w, h) = src.canvas.dimensions();
        match packer.pack(src.name.clone(), &Rect::new(0, 0, w, h)) {
            Some(f) => {
                atlas.paste(&src.canvas, f.frame.x as i32, f.frame.y as i32);
                debug!(name = %f.key, x = f.frame.x, y = f.frame.y, w, h, "placed");
                if let Some(old) = manifest.insert(f.key, f.frame) {
                    warn!(name = %old.name, "duplicate sprite name, earlier entry replaced");
                }
            }
            None => {
                let shelf_y = packer.cursor().1;
                warn!(name = %src.name, w, h, shelf_y, "atlas full, skipping");
                rejected.push(Rejection {
                    name: src.name.clone(),
                    width: w,
                    height: h,
                    shelf_y,
                });
            }
        }
    }

    let out = PackOutput {
        atlas,
        manifest,
        rejected,
        ineligible,
    };
    info!(
        packed = out.manifest.len(),
        rejected = out.rejected.len(),
        ineligible = out.ineligible.len(),
        "packed sprites into atlas"
    );
    Ok(out)
}
