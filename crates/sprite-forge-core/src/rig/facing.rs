use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::str::FromStr;

/// Viewing direction of a rendered character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Front,
    Back,
    Left,
    Right,
    /// Front body with animated limbs.
    FrontWalking,
    /// Back body with animated limbs.
    BackWalking,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Front,
        Facing::Back,
        Facing::Left,
        Facing::Right,
        Facing::FrontWalking,
        Facing::BackWalking,
    ];

    /// Static description of this facing; the renderer never branches on the variant itself.
    pub const fn traits(self) -> FacingTraits {
        match self {
            Facing::Front => FacingTraits {
                silhouette: Silhouette::Frontal,
                face: Face::Full,
                emblem: true,
                animated: false,
                side: 0,
            },
            Facing::FrontWalking => FacingTraits {
                silhouette: Silhouette::Frontal,
                face: Face::Full,
                emblem: true,
                animated: true,
                side: 0,
            },
            Facing::Back => FacingTraits {
                silhouette: Silhouette::Frontal,
                face: Face::None,
                emblem: false,
                animated: false,
                side: 0,
            },
            Facing::BackWalking => FacingTraits {
                silhouette: Silhouette::Frontal,
                face: Face::None,
                emblem: false,
                animated: true,
                side: 0,
            },
            Facing::Left => FacingTraits {
                silhouette: Silhouette::Profile,
                face: Face::Eye,
                emblem: false,
                animated: true,
                side: -1,
            },
            Facing::Right => FacingTraits {
                silhouette: Silhouette::Profile,
                face: Face::Eye,
                emblem: false,
                animated: true,
                side: 1,
            },
        }
    }
}

impl FromStr for Facing {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "front_walking" => Ok(Self::FrontWalking),
            "back_walking" => Ok(Self::BackWalking),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Silhouette {
    /// Both legs side by side, trapezoid torso.
    Frontal,
    /// Legs and arms overlap on the centre line; far limbs drawn behind the body.
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Two eyes and a smile.
    Full,
    /// Single eye on the facing side.
    Eye,
    None,
}

/// Per-facing table row consumed by the pose and draw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingTraits {
    pub silhouette: Silhouette,
    pub face: Face,
    pub emblem: bool,
    /// Whether phase and bob apply at all.
    pub animated: bool,
    /// Profile direction: +1 facing right, -1 facing left, 0 frontal.
    pub side: i32,
}

/// Frame of an animation cycle, or the idle sentinel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AnimationFrame {
    /// No phase-driven motion.
    Static,
    /// `index` in `[0, count)`.
    Cycle { index: u32, count: u32 },
}

impl AnimationFrame {
    pub fn cycle(index: u32, count: u32) -> Self {
        AnimationFrame::Cycle { index, count }
    }

    /// `2π · index / count`; zero for `Static`.
    pub fn phase(&self) -> f32 {
        match *self {
            AnimationFrame::Static => 0.0,
            AnimationFrame::Cycle { count: 0, .. } => 0.0,
            AnimationFrame::Cycle { index, count } => TAU * (index % count) as f32 / count as f32,
        }
    }

    /// Step within the four-beat bob pattern, `None` for `Static`.
    pub fn bob_step(&self) -> Option<u32> {
        match *self {
            AnimationFrame::Static => None,
            AnimationFrame::Cycle { index, .. } => Some(index % 4),
        }
    }
}
