// Simulation loop: one frame = input -> detect -> resolve -> integrate -> render

use log::{debug, info, warn};

use super::scenario::{SandboxConfig, ScenarioError};
use crate::engine::input::FrameInput;
use crate::engine::physics::{PhysicsWorld, StepReport};
use crate::engine::renderer::SceneRenderer;

/// Owns the physics world for the lifetime of the run
pub struct Simulation {
    world: PhysicsWorld,

    /// Cleared once a quit request has been honored
    running: bool,

    /// Pause state seen on the last frame, for logging transitions
    paused: bool,

    /// Frames processed, paused or not
    frame_count: u64,

    /// Emit diagnostics every this many frames
    diagnostics_interval: u64,
}

impl Simulation {
    /// Validate the configuration and build the world
    pub fn new(config: &SandboxConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        let world = PhysicsWorld::with_bodies(config.field, &config.bodies)?;

        info!(
            "Simulation ready: {} bodies, dt = {:.5}s, arena {:?}",
            world.len(),
            config.field.dt,
            world.border()
        );

        Ok(Self {
            world,
            running: true,
            paused: false,
            frame_count: 0,
            diagnostics_interval: u64::from(config.frames_per_second),
        })
    }

    /// Run the physics part of one frame.
    ///
    /// Returns `None` when the frame was skipped (paused or stopped). A quit
    /// request still lets this frame complete.
    pub fn update(&mut self, input: FrameInput) -> Option<StepReport> {
        if !self.running {
            return None;
        }
        self.frame_count += 1;

        if input.pause != self.paused {
            self.paused = input.pause;
            debug!("Frame {}: pause = {}", self.frame_count, self.paused);
        }

        let report = if input.pause {
            None
        } else {
            Some(self.world.step())
        };

        if self.frame_count % self.diagnostics_interval.max(1) == 0 {
            debug!(
                "Frame {}: momentum {:?}, kinetic energy {:.2}",
                self.frame_count,
                self.world.total_momentum(),
                self.world.kinetic_energy()
            );
        }

        if input.quit {
            info!("Stopping after frame {}", self.frame_count);
            self.running = false;
        }

        report
    }

    /// Hand the current positions to the renderer; failures are logged
    pub fn render(&self, renderer: &mut dyn SceneRenderer) {
        if let Err(e) = renderer.draw(&self.world.border(), self.world.bodies()) {
            warn!("Render failed: {:#}", e);
        }
    }

    /// `update` followed by `render`
    pub fn frame(&mut self, input: FrameInput, renderer: &mut dyn SceneRenderer) -> Option<StepReport> {
        let report = self.update(input);
        self.render(renderer);
        report
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
}
