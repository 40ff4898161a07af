// Engine modules: game loop, input, physics, assets, scene output

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
