use sprite_forge_core::prelude::*;

#[test]
fn defaults_validate() {
    let cfg = ForgeConfig::default();
    cfg.validate().expect("defaults are valid");
    assert_eq!((cfg.atlas.width, cfg.atlas.height), (512, 512));
    assert_eq!(cfg.sheet.frame_width, 32);
    assert_eq!(cfg.sheet.frame_height, 48);
    assert_eq!(cfg.output.atlas_name, "sprites");
    assert_eq!(cfg.output.source_pattern, "*.webp");
    assert_eq!(cfg.output.atlas_encoding, Encoding::WebpLossless);
    assert_eq!(cfg.palette.yellow.base, [252, 194, 0]);
    assert_eq!(cfg.palette.red.base, [254, 25, 35]);
    assert_eq!(cfg.palette.blue.base, [0, 85, 191]);
}

#[test]
fn zero_atlas_is_invalid() {
    let cfg = AtlasConfig::builder().with_dimensions(0, 512).build();
    assert!(matches!(
        cfg.validate(),
        Err(SpriteForgeError::InvalidDimensions { width: 0, height: 512 })
    ));
}

#[test]
fn atlas_needs_a_ceiling() {
    let cfg = AtlasConfig::builder().clear_ceilings().build();
    assert!(matches!(cfg.validate(), Err(SpriteForgeError::InvalidConfig(_))));
}

#[test]
fn rig_rejects_degenerate_parts() {
    let mut cfg = ForgeConfig::default();
    cfg.rig.leg_height = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = ForgeConfig::default();
    cfg.rig.bob = cfg.rig.leg_height;
    assert!(cfg.validate().is_err());
}

#[test]
fn output_needs_names_and_encodings() {
    let mut cfg = ForgeConfig::default();
    cfg.output.sheet_encodings.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = ForgeConfig::default();
    cfg.output.atlas_name.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_config_keeps_other_defaults() {
    let cfg: ForgeConfig = serde_json::from_str(
        r#"{ "atlas": { "width": 1024 }, "sheet": { "walk_frames": 6 }, "parallel": true }"#,
    )
    .expect("parse");
    assert_eq!(cfg.atlas.width, 1024);
    assert_eq!(cfg.atlas.height, 512);
    assert_eq!(cfg.atlas.size_ceilings.len(), 2);
    assert_eq!(cfg.sheet.walk_frames, 6);
    assert_eq!(cfg.sheet.frame_width, 32);
    assert!(cfg.parallel);
    cfg.validate().expect("valid");
}

#[test]
fn config_serializes_and_reads_back() {
    let mut cfg = ForgeConfig::default();
    cfg.output.sheet_encodings = vec![Encoding::Png];
    let text = serde_json::to_string(&cfg).expect("ser");
    assert!(text.contains("\"webp_lossless\""));
    let back: ForgeConfig = serde_json::from_str(&text).expect("de");
    assert_eq!(back, cfg);
}

#[test]
fn encoding_names() {
    assert_eq!("png".parse::<Encoding>(), Ok(Encoding::Png));
    assert_eq!("WEBP".parse::<Encoding>(), Ok(Encoding::WebpLossless));
    assert!("jpeg".parse::<Encoding>().is_err());
    assert_eq!(Encoding::WebpLossless.extension(), "webp");
}
