use sprite_forge_core::prelude::*;

const W: u32 = 32;
const H: u32 = 48;
// anchor of a 32x48 frame with a 2px foot margin
const OX: i32 = 16;
const OY: i32 = 46;

fn renderer() -> RigRenderer {
    RigRenderer::from_config(&ForgeConfig::default())
}

fn draw(r: &RigRenderer, facing: Facing, frame: AnimationFrame) -> Canvas {
    let mut c = Canvas::new(W, H);
    r.render(&mut c, OX, OY, facing, frame);
    c
}

fn frames() -> Vec<AnimationFrame> {
    let mut v = vec![AnimationFrame::Static];
    v.extend((0..8).map(|i| AnimationFrame::cycle(i, 8)));
    v
}

fn opaque_in_row(c: &Canvas, y: i32) -> usize {
    (0..W as i32)
        .filter(|&x| c.pixel(x, y).is_some_and(|p| p[3] != 0))
        .count()
}

#[test]
fn rendering_is_deterministic() {
    let r = renderer();
    for facing in Facing::ALL {
        for frame in frames() {
            let a = draw(&r, facing, frame);
            let b = draw(&r, facing, frame);
            assert_eq!(a, b, "{facing:?} {frame:?}");
            assert!(opaque_in_row(&a, 20) > 0, "{facing:?} {frame:?} drew nothing");
        }
    }
}

#[test]
fn feet_stay_on_the_ground_line() {
    let r = renderer();
    for facing in Facing::ALL {
        for frame in frames() {
            let c = draw(&r, facing, frame);
            assert!(
                opaque_in_row(&c, OY - 1) > 0,
                "{facing:?} {frame:?}: no foot on the ground row"
            );
            assert_eq!(opaque_in_row(&c, OY), 0, "{facing:?} {frame:?}");
            assert_eq!(opaque_in_row(&c, OY + 1), 0, "{facing:?} {frame:?}");
        }
    }
}

#[test]
fn bob_follows_four_beat_pattern() {
    let r = renderer();
    let still = r.pose(Facing::Right, AnimationFrame::Static, OY).head_top;
    let at = |i| r.pose(Facing::Right, AnimationFrame::cycle(i, 8), OY);
    assert_eq!(at(0).bob, 1);
    assert_eq!(at(0).head_top, still + 1);
    assert_eq!(at(1).head_top, still);
    assert_eq!(at(2).head_top, still - 1);
    assert_eq!(at(3).head_top, still);
    assert_eq!(at(4).head_top, still + 1);
    assert_eq!(at(6).head_top, still - 1);

    // the bob changes leg length, never the ground line
    for i in 0..8 {
        let p = at(i);
        assert_eq!(p.leg_top + p.leg_length, OY);
    }
}

#[test]
fn static_facings_ignore_the_frame() {
    let r = renderer();
    for facing in [Facing::Front, Facing::Back] {
        let still = draw(&r, facing, AnimationFrame::Static);
        for i in 0..8 {
            assert_eq!(
                draw(&r, facing, AnimationFrame::cycle(i, 8)),
                still,
                "{facing:?} frame {i}"
            );
        }
    }
}

#[test]
fn profile_limbs_swing_in_opposition() {
    let r = renderer();
    let right = r.pose(Facing::Right, AnimationFrame::cycle(2, 8), OY);
    assert!(right.legs[1].dx > 0, "near leg steps forward");
    assert_eq!(right.legs[0].dx, -right.legs[1].dx);
    assert_eq!(right.arms[0].dx, -right.arms[1].dx);
    assert!(right.arms[1].dx < 0, "near arm counter-swings");

    let left = r.pose(Facing::Left, AnimationFrame::cycle(2, 8), OY);
    assert_eq!(left.legs[1].dx, -right.legs[1].dx);

    let contact = r.pose(Facing::Right, AnimationFrame::cycle(0, 8), OY);
    assert_eq!(contact.legs[0].dx, 0);
    assert_eq!(contact.legs[1].dx, 0);
}

#[test]
fn frontal_walk_lifts_one_leg_at_a_time() {
    let r = renderer();
    let mid = r.pose(Facing::FrontWalking, AnimationFrame::cycle(2, 8), OY);
    assert!(mid.legs[0].lift > 0);
    assert_eq!(mid.legs[1].lift, 0);
    assert_eq!(mid.arms[0].dy, -mid.arms[1].dy);

    let other = r.pose(Facing::BackWalking, AnimationFrame::cycle(6, 8), OY);
    assert_eq!(other.legs[0].lift, 0);
    assert!(other.legs[1].lift > 0);
    for l in other.legs {
        assert_eq!(l.dx, 0);
    }
}

#[test]
fn walk_frames_differ_within_a_cycle() {
    let r = renderer();
    for facing in [Facing::FrontWalking, Facing::Right, Facing::Left] {
        let a = draw(&r, facing, AnimationFrame::cycle(0, 8));
        let b = draw(&r, facing, AnimationFrame::cycle(2, 8));
        assert_ne!(a, b, "{facing:?}");
    }
}

#[test]
fn face_and_emblem_depend_on_facing() {
    let cfg = ForgeConfig::default();
    let r = RigRenderer::from_config(&cfg);
    let ink = cfg.palette.black.base();
    let white = cfg.palette.white.base();
    let has = |c: &Canvas, color: Color| c.as_rgba().pixels().any(|p| *p == color);

    let front = draw(&r, Facing::Front, AnimationFrame::Static);
    assert!(has(&front, ink));
    assert!(has(&front, white));

    let back = draw(&r, Facing::Back, AnimationFrame::Static);
    assert!(!has(&back, ink));
    assert!(!has(&back, white));
    assert_ne!(front, back);

    // one eye, on the side the character faces
    let eye_y = r.pose(Facing::Right, AnimationFrame::Static, OY).head_top
        + cfg.rig.head_height / 3;
    let right = draw(&r, Facing::Right, AnimationFrame::Static);
    let left = draw(&r, Facing::Left, AnimationFrame::Static);
    let ink_cols = |c: &Canvas| -> Vec<i32> {
        (0..W as i32)
            .filter(|&x| c.pixel(x, eye_y) == Some(ink))
            .collect()
    };
    let rc = ink_cols(&right);
    let lc = ink_cols(&left);
    assert!(!rc.is_empty() && !lc.is_empty());
    assert!(rc.iter().all(|&x| x >= OX));
    assert!(lc.iter().all(|&x| x < OX));
    assert!(!has(&right, white));
}

#[test]
fn figure_stays_inside_its_frame() {
    let r = renderer();
    for facing in Facing::ALL {
        for frame in frames() {
            // draw onto a larger canvas and confirm nothing lands outside the frame box
            let mut big = Canvas::new(W + 32, H + 32);
            r.render(&mut big, OX + 16, OY + 16, facing, frame);
            for y in 0..(H + 32) as i32 {
                for x in 0..(W + 32) as i32 {
                    let inside = (16..16 + W as i32).contains(&x) && (16..16 + H as i32).contains(&y);
                    if !inside {
                        assert_eq!(
                            big.pixel(x, y).map(|p| p[3]),
                            Some(0),
                            "{facing:?} {frame:?} spills to {x},{y}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn facing_parses_snake_case_names() {
    assert_eq!("front_walking".parse::<Facing>(), Ok(Facing::FrontWalking));
    assert_eq!("Left".parse::<Facing>(), Ok(Facing::Left));
    assert!("sideways".parse::<Facing>().is_err());
    assert!(Facing::Right.traits().animated);
    assert!(!Facing::Front.traits().animated);
}
