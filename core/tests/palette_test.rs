use shadowmask_core::gfx::palette::{self, Color, PALETTE_SIZE, Palette};

// ===== Greyscale Generator =====

#[test]
fn test_greyscale_endpoints() {
    for size in [2, 16, 64, 256] {
        let palette = Palette::greyscale(size);
        assert_eq!(palette.get(0), Color::rgb(0, 0, 0), "size {size}");
        assert_eq!(
            palette.get((size - 1) as u8),
            Color::rgb(255, 255, 255),
            "size {size}"
        );
    }
}

#[test]
fn test_greyscale_monotonic() {
    let palette = Palette::greyscale(64);
    for i in 1..64u8 {
        let previous = palette.get(i - 1);
        let current = palette.get(i);
        assert!(current.r >= previous.r);
        assert!(current.g >= previous.g);
        assert!(current.b >= previous.b);
    }
}

#[test]
fn test_greyscale_is_grey_and_opaque() {
    let palette = Palette::greyscale(256);
    for i in 0..PALETTE_SIZE {
        let color = palette.get(i as u8);
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
        assert_eq!(color.a, 255);
    }
}

#[test]
fn test_greyscale_tail_is_black() {
    let palette = Palette::greyscale(16);
    for i in 16..PALETTE_SIZE {
        assert_eq!(palette.get(i as u8), Color::rgb(0, 0, 0));
    }
}

// ===== Quantised Generator =====

#[test]
fn test_quantized_332_covers_all_entries() {
    let palette = Palette::quantized(3, 3, 2);
    // 2^(3+3+2) = 256 distinct colours.
    let mut seen = std::collections::HashSet::new();
    for i in 0..PALETTE_SIZE {
        let c = palette.get(i as u8);
        assert!(seen.insert((c.r, c.g, c.b)), "duplicate at {i}");
        assert_eq!(c.a, 255);
    }
}

#[test]
fn test_quantized_extremes_saturate() {
    let palette = Palette::quantized(3, 3, 2);
    assert_eq!(palette.get(0), Color::rgb(0, 0, 0));
    // Last entry: all channels at their maximum, padded to full 8 bits.
    assert_eq!(palette.get(255), Color::rgb(255, 255, 255));
}

#[test]
fn test_quantized_tail_is_black() {
    let palette = Palette::quantized(1, 1, 1); // 8 colours.
    for i in 8..PALETTE_SIZE {
        assert_eq!(palette.get(i as u8), Color::rgb(0, 0, 0));
    }
}

// ===== Nearest Colour =====

#[test]
fn test_find_nearest_exact_match_wins() {
    let palette = Palette::quantized(3, 3, 2); // All entries distinct.
    for i in [0usize, 1, 7, 63, 128, 200, 255] {
        let color = palette.get(i as u8);
        assert_eq!(palette.find_nearest(color), i as u8);
    }
}

#[test]
fn test_find_nearest_ties_prefer_first() {
    let mut palette = Palette::new(); // All entries equal (black).
    palette.set(0, Color::rgb(10, 10, 10));
    palette.set(1, Color::rgb(10, 10, 10));
    assert_eq!(palette.find_nearest(Color::rgb(10, 10, 10)), 0);
}

#[test]
fn test_find_nearest_prefers_close_grey() {
    let palette = Palette::greyscale(256);
    assert_eq!(palette.find_nearest(Color::rgb(100, 100, 100)), 100);
}

// ===== Mix / Lerp =====

#[test]
fn test_mix_endpoints() {
    let a = Color::rgb(10, 200, 30);
    let b = Color::rgb(250, 40, 90);
    assert_eq!(palette::mix(a, b, 0.0), a);
    assert_eq!(palette::mix(a, b, 1.0), b);
}

#[test]
fn test_mix_self_is_identity() {
    let a = Color::rgb(12, 34, 56);
    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let mixed = palette::mix(a, a, t);
        assert_eq!((mixed.r, mixed.g, mixed.b), (a.r, a.g, a.b));
    }
}

#[test]
fn test_mix_forces_opaque() {
    let a = Color::rgba(0, 0, 0, 0);
    let b = Color::rgba(255, 255, 255, 10);
    assert_eq!(palette::mix(a, b, 0.5).a, 255);
}

#[test]
fn test_lerp_towards_white() {
    let mut palette = Palette::greyscale(256);
    palette.lerp(Color::WHITE, 1.0);
    for i in 0..PALETTE_SIZE {
        assert_eq!(palette.get(i as u8), Color::WHITE);
    }
}

// ===== Merge =====

#[test]
fn test_merge_appends() {
    let mut palette = Palette::new();
    let extra = [Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)];
    let next = palette.merge(10, &extra, 0, 2, false);
    assert_eq!(next, 12);
    assert_eq!(palette.get(10), extra[0]);
    assert_eq!(palette.get(11), extra[1]);
}

#[test]
fn test_merge_deduplicates() {
    let mut palette = Palette::new();
    palette.set(0, Color::rgb(1, 2, 3));
    let extra = [Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)];
    let next = palette.merge(10, &extra, 0, 2, true);
    // The first colour is already present and gets skipped.
    assert_eq!(next, 11);
    assert_eq!(palette.get(10), Color::rgb(4, 5, 6));
}

#[test]
fn test_merge_stops_at_capacity() {
    let mut palette = Palette::new();
    let extra = [Color::rgb(9, 9, 9); 4];
    let next = palette.merge(254, &extra, 0, 4, false);
    assert_eq!(next, 256);
    assert_eq!(palette.get(255), Color::rgb(9, 9, 9));
}
