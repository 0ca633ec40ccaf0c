use super::facing::{AnimationFrame, FacingTraits, Silhouette};
use crate::config::RigConfig;

/// Displacement applied to one limb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimbOffset {
    pub dx: i32,
    pub dy: i32,
    /// Rows removed from the bottom of a leg (foot raised off the ground).
    pub lift: i32,
}

/// Pixel anchors and limb offsets for one (facing, frame) pair.
///
/// Limb pairs are `[left, right]` as seen by the viewer for frontal silhouettes and
/// `[far, near]` for profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub bob: i32,
    pub swing: f32,
    pub leg_top: i32,
    pub leg_length: i32,
    pub hip_top: i32,
    pub torso_top: i32,
    pub head_top: i32,
    pub legs: [LimbOffset; 2],
    pub arms: [LimbOffset; 2],
}

impl BodyPose {
    pub fn compute(
        rig: &RigConfig,
        traits: FacingTraits,
        frame: AnimationFrame,
        origin_y: i32,
    ) -> Self {
        let (bob, phase) = if traits.animated {
            (bob_for(frame.bob_step(), rig.bob), frame.phase())
        } else {
            (0, 0.0)
        };
        let swing = rig.leg_amplitude * phase.sin();
        let arm_swing = rig.arm_amplitude * phase.sin();

        // feet stay on origin_y; the bob stretches or squashes the legs
        let leg_top = origin_y - rig.leg_height + bob;
        let leg_length = rig.leg_height - bob;
        let hip_top = leg_top - rig.hip_height;
        let torso_top = hip_top - rig.torso_height;
        let head_top = torso_top - rig.head_height + rig.neck_overlap;

        let (legs, arms) = match traits.silhouette {
            Silhouette::Frontal => {
                let lift = rig.frontal_lift_ratio;
                let arm_dy = px(arm_swing * lift);
                (
                    [
                        LimbOffset {
                            lift: px(swing.max(0.0) * lift),
                            ..Default::default()
                        },
                        LimbOffset {
                            lift: px((-swing).max(0.0) * lift),
                            ..Default::default()
                        },
                    ],
                    [
                        LimbOffset {
                            dy: arm_dy,
                            ..Default::default()
                        },
                        LimbOffset {
                            dy: -arm_dy,
                            ..Default::default()
                        },
                    ],
                )
            }
            Silhouette::Profile => {
                let leg_dx = traits.side * px(swing);
                let arm_dx = traits.side * px(arm_swing);
                (
                    [
                        LimbOffset {
                            dx: -leg_dx,
                            ..Default::default()
                        },
                        LimbOffset {
                            dx: leg_dx,
                            ..Default::default()
                        },
                    ],
                    // arms counter-swing their legs
                    [
                        LimbOffset {
                            dx: arm_dx,
                            ..Default::default()
                        },
                        LimbOffset {
                            dx: -arm_dx,
                            ..Default::default()
                        },
                    ],
                )
            }
        };

        Self {
            bob,
            swing,
            leg_top,
            leg_length,
            hip_top,
            torso_top,
            head_top,
            legs,
            arms,
        }
    }
}

/// Contact frames (step 0) dip, mid-stride frames (step 2) rise.
fn bob_for(step: Option<u32>, magnitude: i32) -> i32 {
    match step {
        Some(0) => magnitude,
        Some(2) => -magnitude,
        _ => 0,
    }
}

#[inline]
fn px(v: f32) -> i32 {
    v.round() as i32
}
