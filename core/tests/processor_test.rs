mod common;

use common::counting_surface;
use shadowmask_core::gfx::{Color, Palette, Processor, Program, ProgramEntry, Surface};

fn convert(processor: &Processor, surface: &Surface) -> Vec<u8> {
    let mut output = vec![0; surface.width() * surface.height() * 4];
    processor.convert(surface, &mut output);
    output
}

fn pixel(output: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let base = (y * width + x) * 4;
    output[base..base + 4].try_into().unwrap()
}

// ===== Program Construction =====

#[test]
fn test_new_program_is_just_the_sentinel() {
    let program = Program::new();
    assert!(program.is_empty());
    assert_eq!(
        program.entries(),
        &[ProgramEntry::Wait {
            x: usize::MAX,
            y: usize::MAX
        }]
    );
}

#[test]
fn test_append_keeps_sentinel_last() {
    let mut program = Program::new();
    program.offset(-1, 3);
    program.modulo(-1, 2);
    assert_eq!(program.len(), 2);
    assert_eq!(program.entries()[0], ProgramEntry::Offset { amount: 3 });
    assert_eq!(program.entries()[1], ProgramEntry::Modulo { amount: 2 });
    assert_eq!(
        program.entries()[2],
        ProgramEntry::Wait {
            x: usize::MAX,
            y: usize::MAX
        }
    );
}

#[test]
fn test_insert_overwrites_existing_entry() {
    let mut program = Program::new();
    program.offset(-1, 3);
    program.nop(0);
    assert_eq!(program.len(), 1);
    assert_eq!(program.entries()[0], ProgramEntry::Nop);
}

#[test]
fn test_insert_past_end_pads_with_nops() {
    let mut program = Program::new();
    program.modulo(3, 7);
    assert_eq!(program.len(), 4);
    assert_eq!(program.entries()[0], ProgramEntry::Nop);
    assert_eq!(program.entries()[2], ProgramEntry::Nop);
    assert_eq!(program.entries()[3], ProgramEntry::Modulo { amount: 7 });
}

#[test]
fn test_erase_never_removes_sentinel() {
    let mut program = Program::new();
    program.offset(-1, 1);
    program.modulo(-1, 2);
    program.erase(0, 100);
    assert!(program.is_empty());
    assert_eq!(
        program.entries(),
        &[ProgramEntry::Wait {
            x: usize::MAX,
            y: usize::MAX
        }]
    );
}

#[test]
fn test_clear_restores_pristine_program() {
    let mut program = Program::new();
    program.offset(-1, 1);
    program.clear();
    assert!(program.is_empty());
}

#[test]
fn test_copy_from_duplicates_entries() {
    let mut a = Program::new();
    a.offset(-1, 5);
    let mut b = Program::new();
    b.copy_from(&a);
    assert_eq!(a.entries(), b.entries());
}

// ===== Plain Conversion =====

#[test]
fn test_plain_conversion_applies_palette_and_shifting() {
    let surface = counting_surface(4, 1, 0); // [0 1 2 3]
    let mut processor = Processor::new(); // Greyscale palette.
    processor.set_shifting(&[(1, 200)]);

    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 4, 0, 0), [0, 0, 0, 255]);
    assert_eq!(pixel(&output, 4, 1, 0), [200, 200, 200, 255]);
    assert_eq!(pixel(&output, 4, 2, 0), [2, 2, 2, 255]);
}

#[test]
fn test_clear_then_point_scenario() {
    // 320x240 greyscale-256 canvas: clear(7), poke one 42 pixel, convert.
    let mut surface = Surface::new(320, 240).unwrap();
    surface.clear(7);
    surface.poke(shadowmask_core::gfx::Point::new(10, 10), 42);

    let processor = Processor::new();
    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 320, 10, 10), [42, 42, 42, 255]);
    assert_eq!(pixel(&output, 320, 11, 10), [7, 7, 7, 255]);
}

// ===== Programmed Conversion =====

#[test]
fn test_wait_zero_plus_sentinel_is_identity() {
    let surface = counting_surface(4, 4, 0);
    let mut processor = Processor::new();
    let plain = convert(&processor, &surface);

    let mut program = Program::new();
    program.wait(-1, 0, 0);
    processor.set_program(Some(&program));
    assert_eq!(convert(&processor, &surface), plain);
}

#[test]
fn test_offset_rotates_each_row() {
    let surface = counting_surface(4, 1, 1); // [1 2 3 4]
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.offset(-1, 1);
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    // The write pointer runs one ahead and wraps: [4 1 2 3].
    assert_eq!(pixel(&output, 4, 0, 0), [4, 4, 4, 255]);
    assert_eq!(pixel(&output, 4, 1, 0), [1, 1, 1, 255]);
    assert_eq!(pixel(&output, 4, 2, 0), [2, 2, 2, 255]);
    assert_eq!(pixel(&output, 4, 3, 0), [3, 3, 3, 255]);
}

#[test]
fn test_offset_is_reduced_modulo_width() {
    let surface = counting_surface(4, 1, 1);
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.offset(-1, 5); // 5 mod 4 = 1.
    processor.set_program(Some(&program));
    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 4, 0, 0), [4, 4, 4, 255]);

    let mut negative = Program::new();
    negative.offset(-1, -3); // -3 mod 4 = 1.
    processor.set_program(Some(&negative));
    assert_eq!(convert(&processor, &surface), output);
}

#[test]
fn test_color_overrides_locally_only() {
    let surface = counting_surface(2, 1, 1); // [1 2]
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.color(-1, 1, Color::rgb(255, 0, 0));
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 2, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&output, 2, 1, 0), [2, 2, 2, 255]);

    // The stored palette was never touched.
    assert_eq!(processor.palette().get(1), Color::rgb(1, 1, 1));
}

#[test]
fn test_shift_overrides_locally_only() {
    let surface = counting_surface(2, 1, 1);
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.shift(-1, 1, 77);
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 2, 0, 0), [77, 77, 77, 255]);

    processor.set_program(None);
    let plain = convert(&processor, &surface);
    assert_eq!(pixel(&plain, 2, 0, 0), [1, 1, 1, 255]);
}

#[test]
fn test_wait_defers_instructions_to_scan_position() {
    let surface = counting_surface(4, 2, 1); // Two rows.
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.wait(-1, 0, 1); // Hold until the second row starts.
    program.color(-1, 255, Color::rgb(9, 9, 9)); // Unused index, harmless.
    program.shift(-1, 5, 0);
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    // Row 0 pixel value 5 still maps to grey 5.
    assert_eq!(pixel(&output, 4, 0, 1)[0], 0); // Row 1: 5 shifted to 0.
    assert_eq!(pixel(&output, 4, 0, 0), [1, 1, 1, 255]);
}

#[test]
fn test_skip_is_relative_wait() {
    let surface = counting_surface(4, 1, 1);
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.skip(-1, 2, 0); // Resume two pixels later.
    program.shift(-1, 3, 0); // From then on, 3 renders as 0.
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 4, 1, 0), [2, 2, 2, 255]); // Before: untouched.
    assert_eq!(pixel(&output, 4, 2, 0), [0, 0, 0, 255]); // After: shifted.
}

#[test]
fn test_modulo_skips_source_pixels_per_row() {
    let surface = counting_surface(2, 2, 1); // [1 2; 3 4]
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.modulo(-1, 1);
    processor.set_program(Some(&program));

    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 2, 0, 0), [1, 1, 1, 255]);
    assert_eq!(pixel(&output, 2, 1, 0), [2, 2, 2, 255]);
    // Row 1 starts one pixel late: source pixel 4.
    assert_eq!(pixel(&output, 2, 0, 1), [4, 4, 4, 255]);
    // Past the end of the source: reads as index 0.
    assert_eq!(pixel(&output, 2, 1, 1), [0, 0, 0, 255]);
}

#[test]
fn test_hostile_program_never_writes_outside_the_buffer() {
    let surface = counting_surface(4, 4, 0);
    let mut processor = Processor::new();
    let mut program = Program::new();
    program.skip(-1, -100, -100);
    program.modulo(-1, -64);
    program.offset(-1, i32::MIN);
    program.wait(-1, usize::MAX, 2);
    processor.set_program(Some(&program));

    // Exact-size buffer: any out-of-bounds write would panic.
    let mut output = vec![0; 4 * 4 * 4];
    processor.convert(&surface, &mut output);
}

#[test]
fn test_program_survives_processor_reset_of_shifting_only() {
    let mut processor = Processor::new();
    processor.set_shifting(&[(1, 2)]);
    let program = Program::new();
    processor.set_program(Some(&program));

    processor.reset();
    assert!(processor.program().is_none());
    let surface = counting_surface(2, 1, 1);
    let output = convert(&processor, &surface);
    assert_eq!(pixel(&output, 2, 0, 0), [1, 1, 1, 255]); // Identity again.
}
