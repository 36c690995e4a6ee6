use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use shadowmask_runtime::{Engine, Game};

use crate::video::Presenter;

/// Nominal frame duration; the loop sleeps towards it when vsync runs free.
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Clamp for delta spikes (debugger stops, window drags) so timers don't
/// fast-forward through a pile of fires.
const MAX_DELTA: f32 = 0.25;

pub fn run(game: &mut dyn Game, engine: &mut Engine, scale: u32, no_audio: bool) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let width = engine.display.width() as u32;
    let height = engine.display.height() as u32;
    let mut video = Presenter::new(&sdl_video, "Shadowmask", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    // The device must outlive the loop; dropping it closes the stream.
    let _audio_device = if no_audio {
        None
    } else {
        let sdl_audio = sdl_context.audio().expect("Failed to init SDL audio");
        Some(crate::audio_device::init(&sdl_audio, engine.audio.mixer()))
    };

    game.setup(engine);

    let mut last = Instant::now();

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,
                _ => {}
            }
        }

        let now = Instant::now();
        let delta = (now - last).as_secs_f32().min(MAX_DELTA);
        last = now;

        engine.update(delta);
        game.update(engine, delta);
        game.render(engine);

        video.present(engine.display.compose());

        // Vsync paces us when available; otherwise sleep off the remainder.
        let elapsed = last.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
