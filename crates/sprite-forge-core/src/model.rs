use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        let ax2 = self.x + self.w;
        let ay2 = self.y + self.h;
        let bx2 = r.x + r.w;
        let by2 = r.y + r.h;
        !(self.x >= bx2 || r.x >= ax2 || self.y >= by2 || r.y >= ay2)
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

/// Normalized texture rectangle in renderer space: origin bottom-left, V grows upward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UvRect {
    pub u: f64,
    pub v: f64,
    pub uw: f64,
    pub uh: f64,
}

impl UvRect {
    /// Converts an image-space pixel rect (origin top-left, Y down) into UV space.
    ///
    /// `v` is measured from the bottom edge of the atlas, so the rect's bottom row
    /// `(y + h)` becomes `1 - (y + h) / atlas_height`.
    pub fn from_pixels(rect: &Rect, atlas_width: u32, atlas_height: u32) -> Self {
        let aw = atlas_width as f64;
        let ah = atlas_height as f64;
        Self {
            u: rect.x as f64 / aw,
            v: 1.0 - (rect.y as f64 + rect.h as f64) / ah,
            uw: rect.w as f64 / aw,
            uh: rect.h as f64 / ah,
        }
    }

    /// Inverse of [`UvRect::from_pixels`], rounding to the nearest pixel.
    pub fn to_pixels(&self, atlas_width: u32, atlas_height: u32) -> Rect {
        let aw = atlas_width as f64;
        let ah = atlas_height as f64;
        let w = (self.uw * aw).round().max(0.0) as u32;
        let h = (self.uh * ah).round().max(0.0) as u32;
        let x = (self.u * aw).round().max(0.0) as u32;
        let y = ((1.0 - self.v - self.uh) * ah).round().max(0.0) as u32;
        Rect::new(x, y, w, h)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.u, self.v, self.uw, self.uh]
    }
}

/// A packed sprite: where its pixels live in the atlas and the matching UVs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtlasEntry {
    /// Source file name; the manifest key.
    pub name: String,
    pub pixel_rect: Rect,
    pub uv_rect: UvRect,
}

/// Name-keyed collection of atlas entries, kept in packing order.
///
/// Consumers must look entries up by name; the order only mirrors the packing
/// sequence.
#[derive(Debug, Clone)]
pub struct AtlasManifest {
    pub atlas_width: u32,
    pub atlas_height: u32,
    entries: Vec<AtlasEntry>,
    index: HashMap<String, usize>,
}

impl AtlasManifest {
    pub fn new(atlas_width: u32, atlas_height: u32) -> Self {
        Self {
            atlas_width,
            atlas_height,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records `rect` under `name`, computing its UVs.
    ///
    /// A name collision replaces the earlier entry at its original position and
    /// returns it.
    pub fn insert(&mut self, name: impl Into<String>, rect: Rect) -> Option<AtlasEntry> {
        let name = name.into();
        let entry = AtlasEntry {
            uv_rect: UvRect::from_pixels(&rect, self.atlas_width, self.atlas_height),
            pixel_rect: rect,
            name: name.clone(),
        };
        match self.index.get(&name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.index.insert(name, self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AtlasEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in packing order.
    pub fn entries(&self) -> &[AtlasEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtlasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes packing statistics for this manifest.
    pub fn stats(&self) -> PackStats {
        let atlas_area = (self.atlas_width as u64) * (self.atlas_height as u64);
        let used_area: u64 = self.entries.iter().map(|e| e.pixel_rect.area()).sum();
        let occupancy = if atlas_area > 0 {
            used_area as f64 / atlas_area as f64
        } else {
            0.0
        };
        let max_shelf_bottom = self
            .entries
            .iter()
            .map(|e| e.pixel_rect.y + e.pixel_rect.h)
            .max()
            .unwrap_or(0);
        PackStats {
            num_entries: self.entries.len(),
            atlas_area,
            used_area,
            occupancy,
            used_height: max_shelf_bottom,
            num_rejected: 0,
            num_ineligible: 0,
        }
    }
}

/// Statistics about atlas packing efficiency.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of sprites in the manifest.
    pub num_entries: usize,
    /// Atlas width * height.
    pub atlas_area: u64,
    /// Sum of packed sprite areas.
    pub used_area: u64,
    /// Occupancy ratio: used_area / atlas_area (0.0 to 1.0).
    pub occupancy: f64,
    /// Lowest occupied row (exclusive); how far the shelves reach down.
    pub used_height: u32,
    /// Eligible sources that did not fit.
    pub num_rejected: usize,
    /// Sources outside every size ceiling.
    pub num_ineligible: usize,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Sprites: {}, Occupancy: {:.2}%, Atlas Area: {} px², Used Area: {} px², Used Height: {} px, Rejected: {}, Ineligible: {}",
            self.num_entries,
            self.occupancy * 100.0,
            self.atlas_area,
            self.used_area,
            self.used_height,
            self.num_rejected,
            self.num_ineligible,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.atlas_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.atlas_area > 0 {
            (self.wasted_area() as f64 / self.atlas_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
