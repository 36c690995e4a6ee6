//! Window and composed-frame presentation.
//!
//! The engine composes a small RGBA canvas; this presenter scales it up by
//! the largest integer factor that fits the window and letterboxes the
//! rest, so pixels stay square and crisp at any window size.

use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

pub struct Presenter {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    native_width: u32,
    native_height: u32,
}

impl Presenter {
    /// Open a resizable window sized for the native canvas at `scale`.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Self {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .resizable()
            .build()
            .expect("Failed to create window");

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .expect("Failed to create canvas");
        canvas.set_draw_color(Color::RGB(0, 0, 0));

        let texture_creator = canvas.texture_creator();

        Self {
            canvas,
            texture_creator,
            native_width,
            native_height,
        }
    }

    /// Largest integer scale at which the native canvas fits the window.
    fn fit_scale(&self) -> u32 {
        let (window_width, window_height) = self.canvas.window().size();
        (window_width / self.native_width)
            .min(window_height / self.native_height)
            .max(1)
    }

    /// Upload the composed RGBA frame and present it centred in the
    /// window, integer-scaled and letterboxed.
    pub fn present(&mut self, frame: &[u8]) {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA32,
                self.native_width,
                self.native_height,
            )
            .expect("Failed to create texture");
        texture
            .update(None, frame, (self.native_width * 4) as usize)
            .expect("Failed to update texture");

        let scale = self.fit_scale();
        let target_width = self.native_width * scale;
        let target_height = self.native_height * scale;
        let (window_width, window_height) = self.canvas.window().size();
        let target = Rect::new(
            ((window_width.saturating_sub(target_width)) / 2) as i32,
            ((window_height.saturating_sub(target_height)) / 2) as i32,
            target_width,
            target_height,
        );

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, Some(target))
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}
