/// Frame pacing for the sandbox
///
/// Converts wall-clock time into a whole number of simulation frames at a
/// fixed rate, so the physics always advances in equal steps no matter
/// how often the window asks for a redraw.
use std::time::{Duration, Instant};

/// Maximum number of simulation frames per redraw to prevent spiral of death
const MAX_FRAMES_PER_REDRAW: u32 = 8;

/// FPS tracking window (average over last N redraws)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame pacing state
pub struct GameLoop {
    /// Wall-clock length of one simulation frame
    frame_duration: Duration,

    /// Accumulated time not yet consumed by simulation frames
    accumulator: Duration,

    /// Time of last redraw
    last_frame_time: Instant,

    /// Time when the loop started
    start_time: Instant,

    /// Redraw timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Number of redraws
    redraw_count: u64,

    /// Simulation frames handed out
    update_count: u64,

    /// Current redraw rate (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a loop that runs `frames_per_second` simulation frames per second
    pub fn new(frames_per_second: u32) -> Self {
        let now = Instant::now();
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64),
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            redraw_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a redraw, returns the number of simulation frames to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.redraw_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 redraws
        if self.redraw_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut frames = 0;
        while self.accumulator >= self.frame_duration && frames < MAX_FRAMES_PER_REDRAW {
            self.accumulator -= self.frame_duration;
            frames += 1;
        }

        // Drop time we refused to simulate instead of carrying the debt
        if frames == MAX_FRAMES_PER_REDRAW {
            self.accumulator = Duration::ZERO;
        }

        self.update_count += frames as u64;
        frames
    }

    /// Wall-clock length of one simulation frame
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Current redraw rate
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of redraws
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    /// Get total number of simulation frames handed out
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}
