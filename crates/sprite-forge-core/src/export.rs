use crate::error::Result;
use crate::model::AtlasManifest;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Serialize the manifest as a flat JSON object keyed by sprite name.
/// Shape: `{ name: { x, y, w, h, uv: [u, v, uw, uh] } }`, in packing order.
/// Renderers look sprites up by name; no page or meta keys are mixed into the map.
pub fn to_json(manifest: &AtlasManifest) -> Value {
    let mut frames = serde_json::Map::new();
    for e in manifest.iter() {
        let r = e.pixel_rect;
        frames.insert(
            e.name.clone(),
            json!({
                "x": r.x,
                "y": r.y,
                "w": r.w,
                "h": r.h,
                "uv": e.uv_rect.as_array(),
            }),
        );
    }
    Value::Object(frames)
}

/// Pretty-prints [`to_json`] to `path`.
pub fn write_manifest(manifest: &AtlasManifest, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(&to_json(manifest))?;
    fs::write(path, text)?;
    Ok(())
}
