use crate::canvas::Canvas;
use crate::config::{ForgeConfig, SheetConfig};
use crate::error::{Result, SpriteForgeError};
use crate::rig::{AnimationFrame, Facing, RigRenderer};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Grid geometry of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
    /// Empty rows below the feet in every frame.
    pub foot_margin: u32,
}

impl SheetLayout {
    /// Sheet size: `frame_width * columns` by `frame_height * rows`.
    pub fn sheet_size(&self) -> Result<(u32, u32)> {
        let w = self.frame_width.checked_mul(self.columns);
        let h = self.frame_height.checked_mul(self.rows);
        match (w, h) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(SpriteForgeError::InvalidDimensions {
                width: self.frame_width.saturating_mul(self.columns),
                height: self.frame_height.saturating_mul(self.rows),
            }),
        }
    }

    /// Character anchor inside a frame: horizontal centre, ground line above the margin.
    pub fn anchor(&self) -> (i32, i32) {
        (
            (self.frame_width / 2) as i32,
            self.frame_height.saturating_sub(self.foot_margin) as i32,
        )
    }
}

/// Which sheet of the character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Idle,
    Walk,
}

impl SheetKind {
    pub const ALL: [SheetKind; 2] = [SheetKind::Idle, SheetKind::Walk];

    /// Row order shared by both sheets: front, right, back, left.
    pub fn facing(&self, row: u32) -> Facing {
        match (self, row % 4) {
            (SheetKind::Idle, 0) => Facing::Front,
            (SheetKind::Walk, 0) => Facing::FrontWalking,
            (SheetKind::Idle, 2) => Facing::Back,
            (SheetKind::Walk, 2) => Facing::BackWalking,
            (_, 1) => Facing::Right,
            _ => Facing::Left,
        }
    }

    pub fn layout(&self, cfg: &SheetConfig) -> SheetLayout {
        SheetLayout {
            frame_width: cfg.frame_width,
            frame_height: cfg.frame_height,
            columns: match self {
                SheetKind::Idle => 1,
                SheetKind::Walk => cfg.walk_frames,
            },
            rows: 4,
            foot_margin: cfg.foot_margin,
        }
    }

    /// File stem the sheet is persisted under.
    pub fn file_stem<'a>(&self, cfg: &'a SheetConfig) -> &'a str {
        match self {
            SheetKind::Idle => &cfg.idle_name,
            SheetKind::Walk => &cfg.walk_name,
        }
    }

    pub fn pose(&self, cfg: &SheetConfig, col: u32, row: u32) -> (Facing, AnimationFrame) {
        let frame = match self {
            SheetKind::Idle => AnimationFrame::Static,
            SheetKind::Walk => AnimationFrame::cycle(col, cfg.walk_frames),
        };
        (self.facing(row), frame)
    }
}

/// Composes `layout.columns x layout.rows` rig renders into one sheet.
///
/// Each cell is drawn on its own frame-sized canvas and pasted into its slot, so
/// parts never spill into neighbouring frames.
pub fn assemble<F>(
    renderer: &RigRenderer,
    layout: SheetLayout,
    parallel: bool,
    pose_fn: F,
) -> Result<Canvas>
where
    F: Fn(u32, u32) -> (Facing, AnimationFrame) + Sync,
{
    let (w, h) = layout.sheet_size()?;
    let mut sheet = Canvas::try_new(w, h)?;
    let cells: Vec<(u32, u32)> = (0..layout.rows)
        .flat_map(|row| (0..layout.columns).map(move |col| (col, row)))
        .collect();

    let render_cell = |&(col, row): &(u32, u32)| {
        let (facing, frame) = pose_fn(col, row);
        let (ox, oy) = layout.anchor();
        let mut cell = Canvas::new(layout.frame_width, layout.frame_height);
        renderer.render(&mut cell, ox, oy, facing, frame);
        (col, row, cell)
    };

    #[cfg(feature = "parallel")]
    let rendered: Vec<(u32, u32, Canvas)> = if parallel {
        cells.par_iter().map(render_cell).collect()
    } else {
        cells.iter().map(render_cell).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let rendered: Vec<(u32, u32, Canvas)> = {
        let _ = parallel;
        cells.iter().map(render_cell).collect()
    };

    for (col, row, cell) in &rendered {
        sheet.paste(
            cell,
            (col * layout.frame_width) as i32,
            (row * layout.frame_height) as i32,
        );
    }
    debug!(width = w, height = h, cells = rendered.len(), "sheet assembled");
    Ok(sheet)
}

/// Builds one of the character sheets described by `cfg`.
#[instrument(skip_all, fields(kind = ?kind))]
pub fn build_sheet(kind: SheetKind, cfg: &ForgeConfig) -> Result<Canvas> {
    cfg.sheet.validate()?;
    cfg.rig.validate()?;
    let renderer = RigRenderer::from_config(cfg);
    assemble(
        &renderer,
        kind.layout(&cfg.sheet),
        cfg.parallel,
        |col, row| kind.pose(&cfg.sheet, col, row),
    )
}

/// 1 column x 4 rows of static poses.
pub fn idle_sheet(cfg: &ForgeConfig) -> Result<Canvas> {
    build_sheet(SheetKind::Idle, cfg)
}

/// `walk_frames` columns x 4 rows of the walk cycle.
pub fn walk_sheet(cfg: &ForgeConfig) -> Result<Canvas> {
    build_sheet(SheetKind::Walk, cfg)
}
