use anyhow::Result;
use chaser_core::{FleetStd, Settings, DEFAULT_CYCLES};
use chaser_shared::{ChaserSnapshot, FrameSnapshot, Position, StatusReport};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless chaser fleet driver", long_about = None)]
pub struct Args {
    /// Surface width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Number of red/green/blue pursuit cycles
    #[arg(short, long, default_value_t = DEFAULT_CYCLES)]
    pub cycles: usize,

    /// Velocity setting, clamped to [-20, 20]; 0 pauses the fleet
    #[arg(short, long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub velocity: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    pub frames: u64,

    /// Print the final frame as JSON to stdout
    #[arg(long)]
    pub snapshot: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Drives a fleet without a drawing surface. The frame loop stands in
/// for the host animation scheduler: one `tick` per would-be display
/// refresh, pause included.
pub struct HeadlessRunner {
    pub fleet: FleetStd,
    pub settings: Settings,
    frames: u64,
    captures: u64,
}

impl HeadlessRunner {
    pub fn new(width: f32, height: f32, cycles: usize, velocity: f32) -> Result<Self> {
        if width <= 0.0 || height <= 0.0 {
            anyhow::bail!(
                "surface dimensions must be positive, got {}x{}",
                width,
                height
            );
        }

        let mut settings = Settings::default();
        settings.set_velocity(velocity);

        Ok(Self {
            fleet: FleetStd::new(width, height, cycles),
            settings,
            frames: 0,
            captures: 0,
        })
    }

    /// One frame. A paused fleet still consumes a tick, matching a host
    /// scheduler that keeps firing while the velocity slider sits at 0.
    pub fn tick(&mut self) {
        self.frames += 1;
        if self.settings.paused() {
            return;
        }

        let captured = self.fleet.update(self.settings.velocity);
        if captured > 0 {
            self.captures += captured as u64;
            log::debug!(
                "frame {}: {} capture(s), {} total",
                self.frames,
                captured,
                self.captures
            );
        }
    }

    /// Tick up to `frames` times, stopping early when `should_continue`
    /// returns false.
    pub fn run<F>(&mut self, frames: u64, mut should_continue: F)
    where
        F: FnMut(&HeadlessRunner) -> bool,
    {
        for _ in 0..frames {
            if !should_continue(self) {
                break;
            }
            self.tick();
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            chaser_count: self.fleet.chasers.len(),
            frames: self.frames,
            captures: self.captures,
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frames,
            chasers: self
                .fleet
                .chasers
                .iter()
                .map(|chaser| ChaserSnapshot {
                    position: Position::new(chaser.position.x, chaser.position.y),
                    heading: chaser.heading,
                    size: chaser.size,
                    color_index: chaser.color.index(),
                })
                .collect(),
        }
    }
}
