use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for the whole pipeline.
/// Key notes:
///   - every dimension, colour and animation constant lives here; components never read globals
///   - all sections are `#[serde(default)]` so a YAML file may override any subset
///   - `parallel` only has an effect when the crate is built with the `parallel` feature
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForgeConfig {
    pub palette: Palette,
    pub rig: RigConfig,
    pub sheet: SheetConfig,
    pub atlas: AtlasConfig,
    pub output: OutputConfig,
    /// Render sheet cells and decode sources on the rayon pool.
    pub parallel: bool,
}

impl ForgeConfig {
    /// Validates every section.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.rig.validate()?;
        self.sheet.validate()?;
        self.atlas.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// A palette colour and its precomputed shadow, used by shaded rectangles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shade {
    pub base: [u8; 3],
    pub shadow: [u8; 3],
}

impl Shade {
    pub const fn new(base: [u8; 3], shadow: [u8; 3]) -> Self {
        Self { base, shadow }
    }
    /// Opaque base colour.
    pub fn base(&self) -> Rgba<u8> {
        Rgba([self.base[0], self.base[1], self.base[2], 255])
    }
    /// Opaque shadow colour.
    pub fn shadow(&self) -> Rgba<u8> {
        Rgba([self.shadow[0], self.shadow[1], self.shadow[2], 255])
    }
}

/// Closed palette of the brick-figure art style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    /// Body-suit yellow: head, stud, hands.
    pub yellow: Shade,
    /// Torso and sleeves.
    pub red: Shade,
    /// Legs.
    pub blue: Shade,
    /// Hips.
    pub grey: Shade,
    /// Eyes, smile, emblem line.
    pub black: Shade,
    /// Emblem.
    pub white: Shade,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            yellow: Shade::new([252, 194, 0], [196, 150, 0]),
            red: Shade::new([254, 25, 35], [186, 16, 24]),
            blue: Shade::new([0, 85, 191], [0, 58, 135]),
            grey: Shade::new([107, 90, 90], [76, 64, 64]),
            black: Shade::new([0, 0, 0], [0, 0, 0]),
            white: Shade::new([255, 255, 255], [204, 204, 204]),
        }
    }
}

/// Part dimensions and animation magnitudes of the character rig (pixels unless noted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RigConfig {
    pub head_width: i32,
    pub head_height: i32,
    pub stud_width: i32,
    pub stud_height: i32,
    /// Rows the head box overlaps the top of the torso.
    pub neck_overlap: i32,
    pub torso_top_width: i32,
    pub torso_bottom_width: i32,
    pub torso_height: i32,
    pub profile_torso_width: i32,
    /// Frontal hip width; profile hips use half of it.
    pub hip_width: i32,
    pub hip_height: i32,
    pub leg_width: i32,
    /// Gap between the two legs in frontal views.
    pub leg_gap: i32,
    pub leg_height: i32,
    pub arm_width: i32,
    pub arm_height: i32,
    pub hand_height: i32,
    /// Rows between the torso top and the top of the sleeves.
    pub shoulder_drop: i32,
    pub eye_size: i32,
    /// Horizontal distance from the centre line to the nearest eye.
    pub eye_spacing: i32,
    pub smile_width: i32,
    pub smile_height: i32,
    pub emblem_width: i32,
    pub emblem_height: i32,
    /// Width of the right/bottom shadow strips of shaded rectangles.
    pub edge_width: i32,
    /// Peak horizontal leg displacement in profile views.
    pub leg_amplitude: f32,
    /// Peak arm displacement.
    pub arm_amplitude: f32,
    /// Fraction of the swing used as vertical lift in frontal/back views.
    pub frontal_lift_ratio: f32,
    /// Vertical bob magnitude on contact/mid-stride frames.
    pub bob: i32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            head_width: 12,
            head_height: 12,
            stud_width: 6,
            stud_height: 2,
            neck_overlap: 1,
            torso_top_width: 14,
            torso_bottom_width: 18,
            torso_height: 13,
            profile_torso_width: 8,
            hip_width: 12,
            hip_height: 3,
            leg_width: 5,
            leg_gap: 2,
            leg_height: 13,
            arm_width: 4,
            arm_height: 9,
            hand_height: 3,
            shoulder_drop: 1,
            eye_size: 2,
            eye_spacing: 2,
            smile_width: 6,
            smile_height: 4,
            emblem_width: 6,
            emblem_height: 4,
            edge_width: 1,
            leg_amplitude: 3.0,
            arm_amplitude: 2.0,
            frontal_lift_ratio: 0.5,
            bob: 1,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteForgeError;
        let sizes = [
            ("head_width", self.head_width),
            ("head_height", self.head_height),
            ("torso_top_width", self.torso_top_width),
            ("torso_bottom_width", self.torso_bottom_width),
            ("torso_height", self.torso_height),
            ("profile_torso_width", self.profile_torso_width),
            ("hip_width", self.hip_width),
            ("hip_height", self.hip_height),
            ("leg_width", self.leg_width),
            ("leg_height", self.leg_height),
            ("arm_width", self.arm_width),
            ("arm_height", self.arm_height),
        ];
        for (name, v) in sizes {
            if v <= 0 {
                return Err(SpriteForgeError::InvalidConfig(format!(
                    "rig.{} must be positive (got {})",
                    name, v
                )));
            }
        }
        if self.bob.abs() >= self.leg_height {
            return Err(SpriteForgeError::InvalidConfig(format!(
                "rig.bob ({}) must be smaller than rig.leg_height ({})",
                self.bob, self.leg_height
            )));
        }
        Ok(())
    }
}

/// Sprite-sheet frame geometry and naming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SheetConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Empty rows between the feet and the bottom of a frame.
    pub foot_margin: u32,
    /// Columns of the walk sheet (frames per walk cycle).
    pub walk_frames: u32,
    /// File stem of the idle sheet.
    pub idle_name: String,
    /// File stem of the walk sheet.
    pub walk_name: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            frame_width: 32,
            frame_height: 48,
            foot_margin: 2,
            walk_frames: 8,
            idle_name: "player-idle".into(),
            walk_name: "player-walk".into(),
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteForgeError;
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(SpriteForgeError::InvalidDimensions {
                width: self.frame_width,
                height: self.frame_height,
            });
        }
        if self.walk_frames == 0 {
            return Err(SpriteForgeError::InvalidConfig(
                "sheet.walk_frames must be at least 1".into(),
            ));
        }
        if self.foot_margin >= self.frame_height {
            return Err(SpriteForgeError::InvalidConfig(format!(
                "sheet.foot_margin ({}) leaves no room in a {}px frame",
                self.foot_margin, self.frame_height
            )));
        }
        if self.idle_name.is_empty() || self.walk_name.is_empty() {
            return Err(SpriteForgeError::InvalidConfig(
                "sheet names must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// One size-eligibility tier for atlas sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeCeiling {
    /// Tier name used in logs (e.g. "sprite", "sheet").
    pub label: String,
    pub max_width: u32,
    pub max_height: u32,
}

impl SizeCeiling {
    pub fn new(label: impl Into<String>, max_width: u32, max_height: u32) -> Self {
        Self {
            label: label.into(),
            max_width,
            max_height,
        }
    }
    /// True if a `w`x`h` image fits this tier.
    pub fn admits(&self, w: u32, h: u32) -> bool {
        w <= self.max_width && h <= self.max_height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AtlasConfig {
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Ordered eligibility tiers; a source is packed if it fits the first tier that admits it.
    pub size_ceilings: Vec<SizeCeiling>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            size_ceilings: default_size_ceilings(),
        }
    }
}

fn default_size_ceilings() -> Vec<SizeCeiling> {
    vec![
        SizeCeiling::new("sprite", 64, 64),
        SizeCeiling::new("sheet", 256, 256),
    ]
}

impl AtlasConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Dimensions are zero
    /// - No size ceiling is configured
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteForgeError;

        if self.width == 0 || self.height == 0 {
            return Err(SpriteForgeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.size_ceilings.is_empty() {
            return Err(SpriteForgeError::InvalidConfig(
                "atlas.size_ceilings must contain at least one tier".into(),
            ));
        }
        Ok(())
    }

    /// First tier admitting a `w`x`h` source, if any.
    pub fn eligible_tier(&self, w: u32, h: u32) -> Option<&SizeCeiling> {
        if w == 0 || h == 0 {
            return None;
        }
        self.size_ceilings.iter().find(|c| c.admits(w, h))
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.width = w;
        self.cfg.height = h;
        self
    }
    /// Drops the default tiers; follow with `ceiling` calls.
    pub fn clear_ceilings(mut self) -> Self {
        self.cfg.size_ceilings.clear();
        self
    }
    pub fn ceiling(mut self, label: impl Into<String>, max_width: u32, max_height: u32) -> Self {
        self.cfg
            .size_ceilings
            .push(SizeCeiling::new(label, max_width, max_height));
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}

impl AtlasConfig {
    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Output encodings understood by the format encoder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Png,
    /// Lossless WebP.
    WebpLossless,
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebpLossless => "webp",
        }
    }
}

impl FromStr for Encoding {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "webp" | "webp_lossless" => Ok(Self::WebpLossless),
            _ => Err(()),
        }
    }
}

/// Output locations and encodings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving sprite sheets; also the atlas source directory.
    pub sprite_dir: PathBuf,
    /// Directory receiving the atlas image and manifest.
    pub atlas_dir: PathBuf,
    /// File stem of the atlas image and manifest.
    pub atlas_name: String,
    /// Every sheet is written once per encoding.
    pub sheet_encodings: Vec<Encoding>,
    pub atlas_encoding: Encoding,
    /// File-name glob used to discover atlas sources in `sprite_dir`.
    pub source_pattern: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sprite_dir: PathBuf::from("public/assets/sprites"),
            atlas_dir: PathBuf::from("public/assets/atlas"),
            atlas_name: "sprites".into(),
            sheet_encodings: vec![Encoding::Png, Encoding::WebpLossless],
            atlas_encoding: Encoding::WebpLossless,
            source_pattern: "*.webp".into(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteForgeError;
        if self.atlas_name.is_empty() {
            return Err(SpriteForgeError::InvalidConfig(
                "output.atlas_name must not be empty".into(),
            ));
        }
        if self.sheet_encodings.is_empty() {
            return Err(SpriteForgeError::InvalidConfig(
                "output.sheet_encodings must list at least one encoding".into(),
            ));
        }
        Ok(())
    }
}
