use super::{Frame, Packer};
use crate::model::Rect;

/// Left-to-right shelf packer with a single cursor.
///
/// Items go onto the current shelf until one would cross the right edge, which
/// starts a new shelf below the tallest item of the current one. Space left under
/// shorter items is never reused, and the packer never revisits earlier shelves.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    row_max_height: u32,
}

/// Where the next `w`x`h` item would land and whether that needs a shelf break.
#[derive(Debug, Clone, Copy)]
struct Probe {
    x: u32,
    y: u32,
    new_shelf: bool,
    fits: bool,
}

impl ShelfPacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
            row_max_height: 0,
        }
    }

    /// Current cursor `(x, y)`.
    pub fn cursor(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Height of the tallest item on the current shelf.
    pub fn shelf_height(&self) -> u32 {
        self.row_max_height
    }

    fn probe(&self, w: u32, h: u32) -> Probe {
        let new_shelf = self.x as u64 + w as u64 > self.width as u64;
        let (x, y) = if new_shelf {
            (0, self.y.saturating_add(self.row_max_height))
        } else {
            (self.x, self.y)
        };
        let fits = w <= self.width && y as u64 + h as u64 <= self.height as u64;
        Probe {
            x,
            y,
            new_shelf,
            fits,
        }
    }
}

impl<K> Packer<K> for ShelfPacker {
    fn can_pack(&self, rect: &Rect) -> bool {
        self.probe(rect.w, rect.h).fits
    }

    fn pack(&mut self, key: K, rect: &Rect) -> Option<Frame<K>> {
        let p = self.probe(rect.w, rect.h);
        if p.new_shelf {
            // committed even if the item is rejected below
            self.x = 0;
            self.y = p.y;
            self.row_max_height = 0;
        }
        if !p.fits {
            return None;
        }
        let frame = Rect::new(p.x, p.y, rect.w, rect.h);
        self.x = p.x + rect.w;
        self.row_max_height = self.row_max_height.max(rect.h);
        Some(Frame { key, frame })
    }
}
