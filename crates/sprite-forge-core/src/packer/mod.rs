use crate::model::Rect;

pub mod shelf;

/// A placed rectangle within the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<K = String> {
    pub key: K,
    pub frame: Rect,
}

/// A packer places rectangles into a fixed-size atlas.
///
/// Implementations must ensure no overlaps and keep every placement inside the atlas.
/// `pack` returns `None` when the rectangle is rejected; it may still advance internal
/// state (the shelf packer commits a shelf break before rejecting).
pub trait Packer<K> {
    fn can_pack(&self, rect: &Rect) -> bool;
    fn pack(&mut self, key: K, rect: &Rect) -> Option<Frame<K>>;
}
