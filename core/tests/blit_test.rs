mod common;

use common::{context, counting_surface, filled_surface, lit_pixels};
use shadowmask_core::gfx::sincos::SINCOS_PERIOD;
use shadowmask_core::gfx::{Point, Rectangle, Surface};

fn full(surface: &Surface) -> Rectangle {
    Rectangle::new(0, 0, surface.width() as u32, surface.height() as u32)
}

// ===== Plain Blit =====

#[test]
fn test_blit_copies_rect() {
    let source = counting_surface(4, 4, 1);
    let mut ctx = context(8, 8);
    ctx.blit(&source, full(&source), Point::new(2, 3));

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(
                ctx.surface().peek(Point::new(2 + x, 3 + y)),
                source.peek(Point::new(x, y))
            );
        }
    }
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 0);
}

#[test]
fn test_blit_sub_rect() {
    let source = counting_surface(4, 4, 0);
    let mut ctx = context(8, 8);
    ctx.blit(&source, Rectangle::new(1, 1, 2, 2), Point::new(0, 0));
    // Source pixel (1,1) has value 5.
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 5);
    assert_eq!(ctx.surface().peek(Point::new(1, 1)), 10);
}

#[test]
fn test_blit_clips_and_keeps_alignment() {
    let source = counting_surface(4, 4, 1);
    let mut ctx = context(8, 8);
    ctx.blit(&source, full(&source), Point::new(-2, -1));
    // The visible part starts at source pixel (2,1), value 1 + 1*4+2 = 7.
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 7);
    assert_eq!(ctx.surface().peek(Point::new(1, 0)), 8);
    assert_eq!(ctx.surface().peek(Point::new(0, 1)), 11);
}

#[test]
fn test_blit_skips_transparent_indices() {
    let mut source = Surface::new(2, 1).unwrap();
    source.data_mut().copy_from_slice(&[0, 9]); // Index 0 is transparent.
    let mut ctx = context(4, 4);
    ctx.surface_mut().clear(5);
    ctx.blit(&source, full(&source), Point::new(0, 0));
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 5); // Kept.
    assert_eq!(ctx.surface().peek(Point::new(1, 0)), 9); // Copied.
}

#[test]
fn test_blit_applies_shifting_before_transparency() {
    let source = filled_surface(2, 2, 3);
    let mut ctx = context(4, 4);
    ctx.surface_mut().clear(5);
    ctx.set_shifting(&[(3, 0)]); // Shift onto the transparent index.
    ctx.blit(&source, full(&source), Point::new(0, 0));
    assert_eq!(lit_pixels(ctx.surface(), 5).len(), 16); // Nothing drawn.
}

// ===== Scaled Blit =====

#[test]
fn test_blit_scaled_unit_equals_blit() {
    let source = counting_surface(5, 3, 1);
    let mut plain = context(8, 8);
    plain.blit(&source, full(&source), Point::new(1, 2));
    let mut scaled = context(8, 8);
    scaled.blit_scaled(&source, full(&source), Point::new(1, 2), 1.0, 1.0);
    assert_eq!(plain.surface().data(), scaled.surface().data());
}

#[test]
fn test_blit_scaled_doubles_pixels() {
    let source = counting_surface(2, 2, 1); // [1 2; 3 4]
    let mut ctx = context(8, 8);
    ctx.blit_scaled(&source, full(&source), Point::new(0, 0), 2.0, 2.0);
    for (x, y, expected) in [
        (0, 0, 1),
        (1, 1, 1),
        (2, 0, 2),
        (3, 1, 2),
        (0, 2, 3),
        (3, 3, 4),
    ] {
        assert_eq!(ctx.surface().peek(Point::new(x, y)), expected);
    }
}

#[test]
fn test_blit_scaled_negative_x_mirrors() {
    let source = counting_surface(3, 1, 1); // [1 2 3]
    let mut ctx = context(8, 8);
    ctx.blit_scaled(&source, full(&source), Point::new(0, 0), -1.0, 1.0);
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 3);
    assert_eq!(ctx.surface().peek(Point::new(1, 0)), 2);
    assert_eq!(ctx.surface().peek(Point::new(2, 0)), 1);
}

#[test]
fn test_blit_scaled_negative_y_flips() {
    let source = counting_surface(1, 3, 1);
    let mut ctx = context(8, 8);
    ctx.blit_scaled(&source, full(&source), Point::new(0, 0), 1.0, -1.0);
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), 3);
    assert_eq!(ctx.surface().peek(Point::new(0, 2)), 1);
}

#[test]
fn test_blit_scaled_half_size() {
    let source = counting_surface(4, 4, 1);
    let mut ctx = context(8, 8);
    ctx.blit_scaled(&source, full(&source), Point::new(0, 0), 0.5, 0.5);
    // 2x2 destination sampling source pixel centres (1,1) and (3,3)...
    assert_eq!(ctx.surface().peek(Point::new(0, 0)), source.peek(Point::new(1, 1)));
    assert_eq!(ctx.surface().peek(Point::new(1, 1)), source.peek(Point::new(3, 3)));
    // ...and nothing beyond the 2x2 extent.
    assert_eq!(ctx.surface().peek(Point::new(2, 0)), 0);
}

// ===== Rotated Blit =====

#[test]
fn test_blit_rotated_neutral_equals_blit() {
    let source = counting_surface(4, 4, 1);
    let mut plain = context(12, 12);
    plain.blit(&source, full(&source), Point::new(3, 3));
    let mut rotated = context(12, 12);
    rotated.blit_rotated(&source, full(&source), Point::new(3, 3), 1.0, 1.0, 0, 0.0, 0.0);
    assert_eq!(plain.surface().data(), rotated.surface().data());
}

#[test]
fn test_blit_rotated_full_turn_equals_no_turn() {
    let source = counting_surface(4, 4, 1);
    let mut reference = context(16, 16);
    reference.blit_rotated(&source, full(&source), Point::new(8, 8), 1.0, 1.0, 0, 0.5, 0.5);
    let mut turned = context(16, 16);
    turned.blit_rotated(
        &source,
        full(&source),
        Point::new(8, 8),
        1.0,
        1.0,
        SINCOS_PERIOD,
        0.5,
        0.5,
    );
    assert_eq!(reference.surface().data(), turned.surface().data());
}

#[test]
fn test_blit_rotated_quarter_turn_keeps_coverage() {
    // A solid square rotated by a quarter turn around its centre maps the
    // grid onto itself, give or take the boundary pixels the table's
    // not-quite-zero cos(pi/2) can push over an edge.
    let source = filled_surface(6, 6, 9);
    let mut turned = context(24, 24);
    turned.blit_rotated(
        &source,
        full(&source),
        Point::new(12, 12),
        1.0,
        1.0,
        SINCOS_PERIOD / 4,
        0.5,
        0.5,
    );
    let covered = lit_pixels(turned.surface(), 9).len();
    assert!((33..=39).contains(&covered), "covered {covered}");
}

#[test]
fn test_blit_rotated_respects_clip() {
    let source = filled_surface(6, 6, 9);
    let mut ctx = context(24, 24);
    ctx.set_clipping(Some(Rectangle::new(0, 0, 12, 24)));
    ctx.blit_rotated(&source, full(&source), Point::new(12, 12), 1.0, 1.0, 100, 0.5, 0.5);
    assert!(lit_pixels(ctx.surface(), 9).iter().all(|&(x, _)| x < 12));
}

#[test]
fn test_blit_rotated_transparent_pixels_preserve_background() {
    let mut source = Surface::new(2, 2).unwrap();
    source.data_mut().copy_from_slice(&[0, 9, 9, 0]);
    let mut ctx = context(8, 8);
    ctx.surface_mut().clear(5);
    ctx.blit_rotated(&source, full(&source), Point::new(3, 3), 1.0, 1.0, 0, 0.0, 0.0);
    assert_eq!(ctx.surface().peek(Point::new(3, 3)), 5);
    assert_eq!(ctx.surface().peek(Point::new(4, 3)), 9);
}
