use shadowmask_core::gfx::{Context, Pixel, Point, Surface};

/// Build a surface with every pixel set to `index`.
pub fn filled_surface(width: usize, height: usize, index: Pixel) -> Surface {
    let mut surface = Surface::new(width, height).expect("surface");
    surface.clear(index);
    surface
}

/// Build a surface whose pixels count up row-major from `first`.
pub fn counting_surface(width: usize, height: usize, first: Pixel) -> Surface {
    let mut surface = Surface::new(width, height).expect("surface");
    for (i, pixel) in surface.data_mut().iter_mut().enumerate() {
        *pixel = first.wrapping_add(i as Pixel);
    }
    surface
}

/// A context over a zeroed surface.
pub fn context(width: usize, height: usize) -> Context {
    Context::new(Surface::new(width, height).expect("surface"))
}

/// Collect the positions of every pixel equal to `index`.
pub fn lit_pixels(surface: &Surface, index: Pixel) -> Vec<(i32, i32)> {
    let mut lit = Vec::new();
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.peek(Point::new(x as i32, y as i32)) == index {
                lit.push((x as i32, y as i32));
            }
        }
    }
    lit
}
