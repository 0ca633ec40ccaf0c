use image::Rgba;
use sprite_forge_core::prelude::*;

const RED: Color = Rgba([255, 0, 0, 255]);
const DARK: Color = Rgba([90, 0, 0, 255]);

fn count(canvas: &Canvas, color: Color) -> usize {
    canvas.as_rgba().pixels().filter(|p| **p == color).count()
}

#[test]
fn new_canvas_is_transparent() {
    let c = Canvas::new(5, 3);
    assert_eq!(c.dimensions(), (5, 3));
    assert_eq!(count(&c, TRANSPARENT), 15);
    assert_eq!(c.pixel(5, 0), None);
    assert_eq!(c.pixel(-1, 0), None);
}

#[test]
fn fill_rect_clips_silently() {
    let mut c = Canvas::new(4, 4);
    c.fill_rect(-2, -2, 4, 4, RED);
    assert_eq!(c.pixel(0, 0), Some(RED));
    assert_eq!(c.pixel(1, 1), Some(RED));
    assert_eq!(c.pixel(2, 2), Some(TRANSPARENT));
    assert_eq!(count(&c, RED), 4);

    // fully outside or degenerate: no-ops
    c.fill_rect(10, 10, 3, 3, RED);
    c.fill_rect(0, 0, 0, 3, RED);
    c.fill_rect(0, 0, 3, -1, RED);
    assert_eq!(count(&c, RED), 4);
}

#[test]
fn shaded_rect_darkens_right_and_bottom_edges() {
    let mut c = Canvas::new(6, 6);
    c.shaded_rect(0, 0, 4, 3, RED, DARK, 1);
    assert_eq!(c.pixel(0, 0), Some(RED));
    assert_eq!(c.pixel(2, 1), Some(RED));
    assert_eq!(c.pixel(3, 0), Some(DARK));
    assert_eq!(c.pixel(0, 2), Some(DARK));
    assert_eq!(c.pixel(3, 2), Some(DARK));
    assert_eq!(c.pixel(4, 0), Some(TRANSPARENT));
    assert_eq!(count(&c, RED) + count(&c, DARK), 12);
}

#[test]
fn polygon_fills_axis_aligned_square_exactly() {
    let mut c = Canvas::new(8, 8);
    c.polygon(&[(0, 0), (4, 0), (4, 4), (0, 4)], RED);
    assert_eq!(count(&c, RED), 16);
    assert_eq!(c.pixel(3, 3), Some(RED));
    assert_eq!(c.pixel(4, 3), Some(TRANSPARENT));
}

#[test]
fn polygon_trapezoid_widens_downwards() {
    let mut c = Canvas::new(20, 10);
    c.polygon(&[(6, 0), (14, 0), (18, 8), (2, 8)], RED);
    let row_width = |y: i32| (0..20).filter(|&x| c.pixel(x, y) == Some(RED)).count();
    assert!(row_width(0) < row_width(7));
    assert_eq!(row_width(8), 0);
}

#[test]
fn ellipse_leaves_box_corners_empty() {
    let mut c = Canvas::new(4, 4);
    c.ellipse(0, 0, 4, 4, RED);
    for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
        assert_eq!(c.pixel(x, y), Some(TRANSPARENT), "corner {x},{y}");
    }
    assert_eq!(c.pixel(1, 0), Some(RED));
    assert_eq!(c.pixel(1, 1), Some(RED));
}

#[test]
fn line_includes_both_endpoints() {
    let mut c = Canvas::new(5, 5);
    c.line(0, 0, 3, 3, RED);
    for i in 0..=3 {
        assert_eq!(c.pixel(i, i), Some(RED));
    }
    assert_eq!(count(&c, RED), 4);

    let mut h = Canvas::new(5, 1);
    h.line(4, 0, 1, 0, RED);
    assert_eq!(count(&h, RED), 4);
    assert_eq!(h.pixel(0, 0), Some(TRANSPARENT));
}

#[test]
fn arc_zero_to_180_draws_lower_half() {
    let mut c = Canvas::new(7, 7);
    c.arc(0, 0, 7, 7, 0.0, 180.0, RED);
    assert_eq!(c.pixel(6, 3), Some(RED));
    assert_eq!(c.pixel(3, 6), Some(RED));
    assert_eq!(c.pixel(0, 3), Some(RED));
    assert_eq!(c.pixel(3, 0), Some(TRANSPARENT));
    for y in 0..3 {
        for x in 0..7 {
            assert_eq!(c.pixel(x, y), Some(TRANSPARENT), "upper half at {x},{y}");
        }
    }
}

#[test]
fn paste_overwrites_alpha_and_clips() {
    let mut dst = Canvas::new(3, 3);
    dst.fill_rect(0, 0, 3, 3, RED);

    let hole = Canvas::new(1, 1);
    dst.paste(&hole, 1, 1);
    assert_eq!(dst.pixel(1, 1), Some(TRANSPARENT));

    let mut src = Canvas::new(2, 2);
    src.fill_rect(0, 0, 2, 2, DARK);
    dst.paste(&src, -1, -1);
    assert_eq!(dst.pixel(0, 0), Some(DARK));
    assert_eq!(count(&dst, DARK), 1);

    dst.paste(&src, 2, 2);
    assert_eq!(dst.pixel(2, 2), Some(DARK));
    assert_eq!(count(&dst, DARK), 2);
}

#[test]
fn crop_copies_region() {
    let mut c = Canvas::new(6, 6);
    c.fill_rect(2, 2, 2, 2, RED);
    let part = c.crop(Rect::new(2, 2, 3, 3));
    assert_eq!(part.dimensions(), (3, 3));
    assert_eq!(part.pixel(0, 0), Some(RED));
    assert_eq!(part.pixel(1, 1), Some(RED));
    assert_eq!(part.pixel(2, 2), Some(TRANSPARENT));
}

#[test]
fn try_new_reports_unrepresentable_sizes() {
    let err = Canvas::try_new(u32::MAX, u32::MAX).unwrap_err();
    assert!(matches!(err, SpriteForgeError::Allocation { .. }));
    let ok = Canvas::try_new(3, 2).expect("small canvas");
    assert_eq!(ok, Canvas::new(3, 2));
}

#[test]
fn arc_handles_non_finite_and_huge_angles() {
    let mut c = Canvas::new(8, 8);
    c.arc(0, 0, 8, 8, 0.0, f64::NEG_INFINITY, RED);
    c.arc(0, 0, 8, 8, f64::NAN, 90.0, RED);
    c.arc(0, 0, 8, 8, 0.0, f64::INFINITY, RED);
    assert_eq!(count(&c, RED), 0);

    // 1e17 is 280 degrees past a whole turn; the wrap to 0 is an 80 degree sweep
    c.arc(0, 0, 8, 8, 1e17, 0.0, RED);
    let drawn = count(&c, RED);
    assert!(drawn > 0);
    // upper right quadrant only: nothing below the centre row
    for y in 5..8 {
        for x in 0..8 {
            assert_eq!(c.pixel(x, y), Some(TRANSPARENT), "{x},{y}");
        }
    }

    let mut full = Canvas::new(8, 8);
    full.arc(0, 0, 8, 8, -1e300, 1e300, RED);
    assert!(count(&full, RED) > drawn);
}

#[test]
fn arc_wraps_when_end_precedes_start() {
    let mut wrapped = Canvas::new(7, 7);
    wrapped.arc(0, 0, 7, 7, 180.0, 0.0, RED);
    let mut upper = Canvas::new(7, 7);
    upper.arc(0, 0, 7, 7, 180.0, 360.0, RED);
    assert_eq!(wrapped, upper);
    assert_eq!(wrapped.pixel(3, 0), Some(RED));
    assert_eq!(wrapped.pixel(3, 6), Some(TRANSPARENT));
}
