//! Built-in demo games, each exercising one slice of the engine.

mod chiptune;
mod mode7;
mod primitives;

use std::path::Path;

use shadowmask_runtime::Game;

pub fn names() -> Vec<&'static str> {
    vec!["primitives", "mode7", "chiptune"]
}

pub fn create(name: &str, atlas: Option<&Path>) -> Option<Box<dyn Game>> {
    match name {
        "primitives" => Some(Box::new(primitives::Primitives::new())),
        "mode7" => Some(Box::new(mode7::Mode7::new(atlas.map(Path::to_path_buf)))),
        "chiptune" => Some(Box::new(chiptune::Chiptune::new())),
        _ => None,
    }
}
