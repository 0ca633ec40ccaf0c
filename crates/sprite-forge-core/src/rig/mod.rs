//! Character rig: draws one posed brick figure onto a canvas.
//!
//! The figure is assembled from axis-aligned parts (stud, head, torso, hips,
//! legs, arms, hands). Per-facing differences come from [`FacingTraits`]; the
//! limb placement for every facing comes from a single [`BodyPose`] computation.

pub mod facing;
pub mod pose;

pub use facing::{AnimationFrame, Face, Facing, FacingTraits, Silhouette};
pub use pose::{BodyPose, LimbOffset};

use crate::canvas::Canvas;
use crate::config::{ForgeConfig, Palette, RigConfig, Shade};

/// Renders posed characters with a fixed rig and palette.
#[derive(Debug, Clone)]
pub struct RigRenderer {
    rig: RigConfig,
    palette: Palette,
}

impl RigRenderer {
    pub fn new(rig: RigConfig, palette: Palette) -> Self {
        Self { rig, palette }
    }

    pub fn from_config(cfg: &ForgeConfig) -> Self {
        Self::new(cfg.rig.clone(), cfg.palette)
    }

    pub fn rig(&self) -> &RigConfig {
        &self.rig
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pose the renderer would use for `facing`/`frame` with the ground line at `origin_y`.
    pub fn pose(&self, facing: Facing, frame: AnimationFrame, origin_y: i32) -> BodyPose {
        BodyPose::compute(&self.rig, facing.traits(), frame, origin_y)
    }

    /// Draws one character standing on the ground line `origin_y` (lowest foot row
    /// `origin_y - 1`, row `origin_y` left empty) and whose body is
    /// centred on the column boundary `origin_x`.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        origin_x: i32,
        origin_y: i32,
        facing: Facing,
        frame: AnimationFrame,
    ) {
        let traits = facing.traits();
        let pose = BodyPose::compute(&self.rig, traits, frame, origin_y);
        let part = Part {
            canvas,
            rig: &self.rig,
            palette: &self.palette,
            cx: origin_x,
            traits,
            pose: &pose,
        };
        part.draw_all();
    }
}

/// Drawing context shared by the part helpers of one render call.
struct Part<'a> {
    canvas: &'a mut Canvas,
    rig: &'a RigConfig,
    palette: &'a Palette,
    cx: i32,
    traits: FacingTraits,
    pose: &'a BodyPose,
}

impl Part<'_> {
    fn draw_all(mut self) {
        match self.traits.silhouette {
            Silhouette::Frontal => {
                self.leg(0);
                self.leg(1);
                self.hips();
                self.torso();
                self.head();
                self.arm(0);
                self.arm(1);
            }
            Silhouette::Profile => {
                // far limbs first so the body covers them, near limbs last
                self.leg(0);
                self.arm(0);
                self.torso();
                self.hips();
                self.head();
                self.leg(1);
                self.arm(1);
            }
        }
    }

    fn shaded(&mut self, x: i32, y: i32, w: i32, h: i32, shade: Shade) {
        self.canvas
            .shaded_rect(x, y, w, h, shade.base(), shade.shadow(), self.rig.edge_width);
    }

    fn leg(&mut self, i: usize) {
        let rig = self.rig;
        let off = self.pose.legs[i];
        let x = match self.traits.silhouette {
            Silhouette::Frontal if i == 0 => self.cx - rig.leg_gap / 2 - rig.leg_width,
            Silhouette::Frontal => self.cx + rig.leg_gap / 2,
            Silhouette::Profile => self.cx - rig.leg_width / 2,
        };
        let h = self.pose.leg_length - off.lift;
        self.shaded(
            x + off.dx,
            self.pose.leg_top + off.dy,
            rig.leg_width,
            h,
            self.palette.blue,
        );
    }

    fn arm(&mut self, i: usize) {
        let rig = self.rig;
        let off = self.pose.arms[i];
        let x = match self.traits.silhouette {
            Silhouette::Frontal if i == 0 => self.cx - rig.torso_top_width / 2 - rig.arm_width,
            Silhouette::Frontal => self.cx + rig.torso_top_width / 2,
            Silhouette::Profile => self.cx - rig.arm_width / 2,
        } + off.dx;
        let y = self.pose.torso_top + rig.shoulder_drop + off.dy;
        self.shaded(x, y, rig.arm_width, rig.arm_height, self.palette.red);
        self.shaded(
            x,
            y + rig.arm_height,
            rig.arm_width,
            rig.hand_height,
            self.palette.yellow,
        );
    }

    fn hips(&mut self) {
        let rig = self.rig;
        let w = match self.traits.silhouette {
            Silhouette::Frontal => rig.hip_width,
            Silhouette::Profile => rig.hip_width / 2,
        };
        self.shaded(
            self.cx - w / 2,
            self.pose.hip_top,
            w,
            rig.hip_height,
            self.palette.grey,
        );
    }

    fn torso(&mut self) {
        let rig = self.rig;
        let top = self.pose.torso_top;
        match self.traits.silhouette {
            Silhouette::Frontal => {
                let bottom = top + rig.torso_height;
                let (tw, bw) = (rig.torso_top_width / 2, rig.torso_bottom_width / 2);
                self.canvas.polygon(
                    &[
                        (self.cx - tw, top),
                        (self.cx + tw, top),
                        (self.cx + bw, bottom),
                        (self.cx - bw, bottom),
                    ],
                    self.palette.red.base(),
                );
                if self.traits.emblem {
                    self.emblem();
                }
            }
            Silhouette::Profile => {
                let w = rig.profile_torso_width;
                self.shaded(self.cx - w / 2, top, w, rig.torso_height, self.palette.red);
            }
        }
    }

    fn emblem(&mut self) {
        let rig = self.rig;
        let (w, h) = (rig.emblem_width, rig.emblem_height);
        let x = self.cx - w / 2;
        let y = self.pose.torso_top + rig.shoulder_drop + 2;
        self.canvas.ellipse(x, y, w, h, self.palette.white.base());
        let mid = y + h / 2;
        self.canvas
            .line(x + 1, mid, x + w - 2, mid, self.palette.black.base());
    }

    fn head(&mut self) {
        let rig = self.rig;
        let top = self.pose.head_top;
        self.shaded(
            self.cx - rig.stud_width / 2,
            top - rig.stud_height,
            rig.stud_width,
            rig.stud_height,
            self.palette.yellow,
        );
        self.shaded(
            self.cx - rig.head_width / 2,
            top,
            rig.head_width,
            rig.head_height,
            self.palette.yellow,
        );

        let ink = self.palette.black.base();
        let eye_y = top + rig.head_height / 3;
        let e = rig.eye_size;
        match self.traits.face {
            Face::Full => {
                self.canvas
                    .fill_rect(self.cx - rig.eye_spacing - e, eye_y, e, e, ink);
                self.canvas.fill_rect(self.cx + rig.eye_spacing, eye_y, e, e, ink);
                self.canvas.arc(
                    self.cx - rig.smile_width / 2,
                    eye_y + e - 1,
                    rig.smile_width,
                    rig.smile_height,
                    0.0,
                    180.0,
                    ink,
                );
            }
            Face::Eye => {
                let x = if self.traits.side > 0 {
                    self.cx + rig.eye_spacing + 1
                } else {
                    self.cx - rig.eye_spacing - 1 - e
                };
                self.canvas.fill_rect(x, eye_y, e, e, ink);
            }
            Face::None => {}
        }
    }
}
