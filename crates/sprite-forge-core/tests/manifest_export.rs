use sprite_forge_core::prelude::*;

#[test]
fn json_is_a_flat_map_keyed_by_name() {
    let mut m = AtlasManifest::new(128, 128);
    m.insert("hero.webp", Rect::new(0, 0, 64, 64));
    m.insert("coin.webp", Rect::new(64, 0, 32, 32));

    let v = to_json(&m);
    let obj = v.as_object().expect("object");
    assert_eq!(obj.len(), 2);
    // packing order is preserved
    let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["hero.webp", "coin.webp"]);

    let coin = &obj["coin.webp"];
    assert_eq!(coin["x"], 64);
    assert_eq!(coin["y"], 0);
    assert_eq!(coin["w"], 32);
    assert_eq!(coin["h"], 32);
    let uv: Vec<f64> = coin["uv"]
        .as_array()
        .expect("uv array")
        .iter()
        .map(|x| x.as_f64().expect("number"))
        .collect();
    assert_eq!(uv, [0.5, 0.75, 0.25, 0.25]);
    assert!(obj.get("meta").is_none());
}

#[test]
fn empty_manifest_serializes_to_empty_object() {
    let m = AtlasManifest::new(512, 512);
    assert_eq!(to_json(&m), serde_json::json!({}));
}

#[test]
fn insert_replaces_in_place_on_collision() {
    let mut m = AtlasManifest::new(64, 64);
    assert!(m.insert("a", Rect::new(0, 0, 8, 8)).is_none());
    assert!(m.insert("b", Rect::new(8, 0, 8, 8)).is_none());
    let old = m.insert("a", Rect::new(16, 0, 4, 4)).expect("replaced");
    assert_eq!(old.pixel_rect, Rect::new(0, 0, 8, 8));
    assert_eq!(m.len(), 2);
    assert_eq!(m.entries()[0].name, "a");
    assert_eq!(m.entries()[0].pixel_rect, Rect::new(16, 0, 4, 4));
}

#[test]
fn uv_flips_vertical_axis() {
    let uv = UvRect::from_pixels(&Rect::new(0, 0, 16, 16), 64, 64);
    // top-left in image space is near the top in UV space
    assert_eq!(uv.as_array(), [0.0, 0.75, 0.25, 0.25]);
    let bottom = UvRect::from_pixels(&Rect::new(0, 48, 16, 16), 64, 64);
    assert_eq!(bottom.v, 0.0);
    assert_eq!(bottom.to_pixels(64, 64), Rect::new(0, 48, 16, 16));
}

#[test]
fn manifest_file_round_trips_through_serde_json() {
    let dir = std::env::temp_dir().join(format!("sprite_forge_manifest_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("tmp dir");
    let path = dir.join("sprites.json");

    let mut m = AtlasManifest::new(256, 256);
    m.insert("walk.webp", Rect::new(0, 0, 256, 192));
    write_manifest(&m, &path).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(parsed, to_json(&m));
    assert_eq!(parsed["walk.webp"]["h"], 192);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn stats_summary_mentions_counts() {
    let mut m = AtlasManifest::new(100, 100);
    m.insert("a", Rect::new(0, 0, 50, 50));
    let s = m.stats();
    assert_eq!(s.used_area, 2500);
    assert_eq!(s.used_height, 50);
    assert!((s.occupancy - 0.25).abs() < 1e-9);
    assert!((s.waste_percentage() - 75.0).abs() < 1e-9);
    let text = s.summary();
    assert!(text.contains("Sprites: 1"));
    assert!(text.contains("Occupancy:"));
}
