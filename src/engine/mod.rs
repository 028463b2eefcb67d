// Engine modules: physics, input, renderer, frame pacing

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
