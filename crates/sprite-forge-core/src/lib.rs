//! Procedural sprite sheets and a sprite atlas for a brick-figure character.
//!
//! - Rig: draws one posed character (six facings, walk cycle) onto a [`Canvas`]
//! - Sheets: `idle` (1x4) and `walk` (Nx4) grids of rig renders
//! - Atlas: shelf-packs decoded sprites into one image plus a name -> rect/UV manifest
//! - Batch: filesystem runs that write sheets, atlas image and JSON manifest
//!
//! Quick example:
//! ```ignore
//! use sprite_forge_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let cfg = ForgeConfig::default();
//! let walk = walk_sheet(&cfg)?;
//! assert_eq!(walk.dimensions(), (256, 192));
//!
//! let sources = vec![SourceImage::new("walk", walk)];
//! let out = pack_sources(sources, &cfg.atlas)?;
//! println!("{}", out.stats().summary());
//! # Ok(()) }
//! ```

pub mod batch;
pub mod canvas;
pub mod config;
pub mod encode;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod rig;
pub mod sheet;
pub mod source;

pub use batch::*;
pub use canvas::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;
pub use sheet::*;
pub use source::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_forge_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::canvas::{Canvas, Color, TRANSPARENT};
    pub use crate::config::{
        AtlasConfig, AtlasConfigBuilder, Encoding, ForgeConfig, OutputConfig, Palette,
        RigConfig, SheetConfig, SizeCeiling,
    };
    pub use crate::model::{AtlasEntry, AtlasManifest, PackStats, Rect, UvRect};
    pub use crate::packer::{Packer, shelf::ShelfPacker};
    pub use crate::rig::{AnimationFrame, Facing, RigRenderer};
    pub use crate::sheet::{SheetKind, SheetLayout, build_sheet, idle_sheet, walk_sheet};
    pub use crate::{
        LoadReport, PackOutput, SourceImage, SpriteForgeError, load_source, load_sources,
        load_sources_with, pack_sources, to_json, write_atlas, write_manifest, write_sheets,
    };
}
