use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::{SandboxConfig, Simulation};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Rusted Sandbox...");

    let config = SandboxConfig::default();
    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), config.field.border()))?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new(config.frames_per_second);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested");
                input.request_quit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => renderer.resize(physical_size),
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for _ in 0..game_loop.begin_frame() {
                    simulation.update(input.snapshot());
                }
                simulation.render(&mut renderer);

                if !simulation.is_running() {
                    info!(
                        "Shutting down after {} frames ({} redraws, {:.1} fps)",
                        simulation.frame_count(),
                        game_loop.redraw_count(),
                        game_loop.fps()
                    );
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
