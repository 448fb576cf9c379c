#![cfg_attr(not(feature = "std"), no_std)]

pub mod rng;

#[cfg(feature = "std")]
use rand::Rng;

use core::f32::consts::{PI, TAU};

use crate::rng::SimpleRng;

/// Maximum angular step per frame, one fiftieth of a full turn.
pub const TURN_SPEED: f32 = TAU / 50.0;
/// Squared capture distance before scaling by the target's size.
pub const CAPTURE_RANGE_SQ: f32 = 16.0;
/// Body rectangle dimensions before size scaling.
pub const BODY_WIDTH: f32 = 6.0;
pub const BODY_HEIGHT: f32 = 2.0;
/// Growth per capture and the size it saturates at.
pub const SIZE_GROWTH: f32 = 0.5;
pub const MAX_SIZE: f32 = 2.0;
/// Default number of red/green/blue pursuit cycles in a fleet.
pub const DEFAULT_CYCLES: usize = 40;
/// Alpha of the chaser-to-target trace stroke.
pub const TRACE_ALPHA: f32 = 0.075;

/// A 2D vector used for positions and displacements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance_squared(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Color identity of a chaser, fixed at creation. Each pursuit cycle
/// holds one of each: red chases green, green chases blue, blue chases
/// red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaserColor {
    Red,
    Green,
    Blue,
}

impl ChaserColor {
    /// Colors in cycle order; each entry pursues the next, wrapping.
    pub const CYCLE: [ChaserColor; 3] = [ChaserColor::Red, ChaserColor::Green, ChaserColor::Blue];

    /// Fill color as rgb bytes.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ChaserColor::Red => (255, 0, 0),
            ChaserColor::Green => (0, 255, 0),
            ChaserColor::Blue => (0, 0, 255),
        }
    }

    /// Index into the fixed palette.
    pub fn index(self) -> usize {
        match self {
            ChaserColor::Red => 0,
            ChaserColor::Green => 1,
            ChaserColor::Blue => 2,
        }
    }
}

/// A single chasing entity
#[derive(Debug, Clone, PartialEq)]
pub struct Chaser {
    pub color: ChaserColor,
    pub position: Vector2D,
    pub heading: f32,
    pub size: f32,
    /// Index of the pursued chaser in the fleet's flat storage.
    pub target: usize,
}

impl Chaser {
    pub fn new(color: ChaserColor, position: Vector2D, heading: f32, target: usize) -> Self {
        Self {
            color,
            position,
            heading,
            size: 1.0,
            target,
        }
    }

    #[cfg(feature = "std")]
    pub fn random(color: ChaserColor, target: usize, width: f32, height: f32) -> Self {
        let mut chaser = Self::new(color, Vector2D::zero(), 0.0, target);
        chaser.reset(width, height);
        chaser
    }

    pub fn random_with(
        color: ChaserColor,
        target: usize,
        rng: &mut SimpleRng,
        width: f32,
        height: f32,
    ) -> Self {
        let mut chaser = Self::new(color, Vector2D::zero(), 0.0, target);
        chaser.reset_with(rng, width, height);
        chaser
    }

    /// Re-randomize position and heading, size back to 1. Invoked by the
    /// fleet when this chaser's pursuer catches it.
    ///
    /// Position lands on an integer coordinate in `0..=dimension`; the
    /// heading may exceed 2π until the first update normalizes it.
    #[cfg(feature = "std")]
    pub fn reset(&mut self, width: f32, height: f32) {
        let mut rng = rand::thread_rng();
        self.size = 1.0;
        self.position = Vector2D::new(random_coord(&mut rng, width), random_coord(&mut rng, height));
        self.heading = rng.gen::<f32>() * (TAU + 1.0);
    }

    /// `reset` against a caller-owned deterministic generator.
    pub fn reset_with(&mut self, rng: &mut SimpleRng, width: f32, height: f32) {
        self.size = 1.0;
        self.position = Vector2D::new(
            random_coord_with(rng, width),
            random_coord_with(rng, height),
        );
        self.heading = rng.next_f32() * (TAU + 1.0);
    }

    /// Rotated-rectangle draw description for this chaser's body.
    pub fn body_rect(&self) -> BodyRect {
        BodyRect {
            center: self.position,
            angle: self.heading,
            width: BODY_WIDTH * self.size,
            height: BODY_HEIGHT * self.size,
            color: self.color,
        }
    }
}

#[cfg(feature = "std")]
fn random_coord(rng: &mut impl Rng, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.gen_range(0..=max as u32) as f32
}

fn random_coord_with(rng: &mut SimpleRng, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    math::floor(rng.next_f32() * (max + 1.0))
}

/// Host-mutated runtime settings, read once per frame by the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub velocity: f32,
    pub erase: bool,
    pub trace: bool,
}

impl Settings {
    pub const MIN_VELOCITY: f32 = -20.0;
    pub const MAX_VELOCITY: f32 = 20.0;

    /// Clamp and store a velocity coming from the host UI.
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity.clamp(Self::MIN_VELOCITY, Self::MAX_VELOCITY);
    }

    /// A zero velocity pauses the fleet; ticks become no-ops.
    pub fn paused(&self) -> bool {
        self.velocity == 0.0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            velocity: -1.0,
            erase: false,
            trace: true,
        }
    }
}

/// Result of one steering step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The chaser turned and advanced.
    Moved,
    /// The chaser caught its target and grew; the caller must relocate
    /// the chaser at `target`.
    Captured { target: usize },
}

/// The per-frame steering rule
pub mod steering {
    use super::*;

    /// Advance the chaser at `idx` one frame against its target's current
    /// state in `chasers`.
    ///
    /// Within capture range the pursuer grows and keeps its position and
    /// heading for the frame. Otherwise it turns toward the target by at
    /// most [`TURN_SPEED`], advances by `velocity` along its heading, and
    /// wraps toroidally. Displacement is the straight line between raw
    /// coordinates; near-boundary chases measure across the surface
    /// interior, not the shorter wrapped path.
    pub fn step(
        chasers: &mut [Chaser],
        idx: usize,
        width: f32,
        height: f32,
        velocity: f32,
    ) -> StepOutcome {
        let (target_idx, target_pos, target_size) = {
            let chaser = &chasers[idx];
            let target = &chasers[chaser.target];
            (chaser.target, target.position, target.size)
        };
        let chaser = &mut chasers[idx];

        if chaser.position.distance_squared(&target_pos) < CAPTURE_RANGE_SQ * target_size {
            chaser.size = (chaser.size + SIZE_GROWTH).min(MAX_SIZE);
            return StepOutcome::Captured { target: target_idx };
        }

        let offset = target_pos - chaser.position;
        let desired = math::atan2(offset.y, offset.x);
        let mut delta = desired - chaser.heading;
        if math::abs(delta) > PI {
            // turns wider than a half circle always unwind as a negative step
            delta = math::abs(delta) - TAU;
        }
        if delta != 0.0 {
            let spin = math::abs(delta).min(TURN_SPEED);
            chaser.heading += if delta < 0.0 { -spin } else { spin };
        }
        chaser.heading = wrap_angle(chaser.heading);

        let (sin, cos) = math::sin_cos(chaser.heading);
        chaser.position += Vector2D::new(cos, sin) * velocity;
        // single-step wrap; valid while |velocity| stays under a surface
        // dimension, and skipped entirely for degenerate dimensions
        if width > 0.0 {
            if chaser.position.x >= width {
                chaser.position.x -= width;
            } else if chaser.position.x < 0.0 {
                chaser.position.x += width;
            }
        }
        if height > 0.0 {
            if chaser.position.y >= height {
                chaser.position.y -= height;
            } else if chaser.position.y < 0.0 {
                chaser.position.y += height;
            }
        }

        StepOutcome::Moved
    }

    /// Normalize an angle into `[0, 2π)`.
    pub fn wrap_angle(angle: f32) -> f32 {
        let wrapped = math::rem(angle, TAU);
        if wrapped < 0.0 {
            wrapped + TAU
        } else {
            wrapped
        }
    }
}

/// Rotated-rectangle draw description for one chaser body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRect {
    pub center: Vector2D,
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    pub color: ChaserColor,
}

/// Faint chaser-to-target line segment. Trails emerge from accumulation
/// across frames when the surface is not erased, not from stored history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceLine {
    pub from: Vector2D,
    pub to: Vector2D,
    pub color: ChaserColor,
}

/// A fixed-capacity fleet for no_std environments, deterministic for a
/// given seed. Capacity `N` is counted in chasers; construction wires
/// whole three-chaser cycles and stops when another would not fit.
pub struct Fleet<const N: usize> {
    pub chasers: heapless::Vec<Chaser, N>,
    pub width: f32,
    pub height: f32,
    rng: SimpleRng,
}

impl<const N: usize> Fleet<N> {
    pub fn new(width: f32, height: f32, cycles: usize, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut chasers = heapless::Vec::new();

        for cycle in 0..cycles {
            if chasers.len() + 3 > N {
                break;
            }
            let base = cycle * 3;
            for (slot, color) in ChaserColor::CYCLE.into_iter().enumerate() {
                let target = base + (slot + 1) % 3;
                let _ = chasers.push(Chaser::random_with(color, target, &mut rng, width, height));
            }
        }

        Self {
            chasers,
            width,
            height,
            rng,
        }
    }

    /// One frame of steering for the whole fleet, in storage order
    /// (cycle-major, red/green/blue within a cycle). Later chasers may
    /// observe targets already moved this frame. Returns the number of
    /// captures. A zero velocity pauses: nothing is read or written.
    pub fn update(&mut self, velocity: f32) -> u32 {
        if velocity == 0.0 {
            return 0;
        }

        let mut captures = 0;
        for idx in 0..self.chasers.len() {
            if let StepOutcome::Captured { target } =
                steering::step(&mut self.chasers, idx, self.width, self.height, velocity)
            {
                self.chasers[target].reset_with(&mut self.rng, self.width, self.height);
                captures += 1;
            }
        }
        captures
    }

    /// Trace descriptor from the chaser at `idx` to its target.
    pub fn trace_line(&self, idx: usize) -> TraceLine {
        let chaser = &self.chasers[idx];
        let target = &self.chasers[chaser.target];
        TraceLine {
            from: chaser.position,
            to: target.position,
            color: chaser.color,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

/// A heap-backed fleet for std environments
#[cfg(feature = "std")]
pub struct FleetStd {
    pub chasers: Vec<Chaser>,
    pub width: f32,
    pub height: f32,
}

#[cfg(feature = "std")]
impl FleetStd {
    pub fn new(width: f32, height: f32, cycles: usize) -> Self {
        let mut chasers = Vec::with_capacity(cycles * 3);

        for cycle in 0..cycles {
            let base = cycle * 3;
            for (slot, color) in ChaserColor::CYCLE.into_iter().enumerate() {
                let target = base + (slot + 1) % 3;
                chasers.push(Chaser::random(color, target, width, height));
            }
        }

        Self {
            chasers,
            width,
            height,
        }
    }

    /// One frame of steering for the whole fleet, in storage order
    /// (cycle-major, red/green/blue within a cycle). Later chasers may
    /// observe targets already moved this frame. Returns the number of
    /// captures. A zero velocity pauses: nothing is read or written.
    pub fn update(&mut self, velocity: f32) -> u32 {
        if velocity == 0.0 {
            return 0;
        }

        let mut captures = 0;
        for idx in 0..self.chasers.len() {
            if let StepOutcome::Captured { target } =
                steering::step(&mut self.chasers, idx, self.width, self.height, velocity)
            {
                self.chasers[target].reset(self.width, self.height);
                captures += 1;
            }
        }
        captures
    }

    /// Trace descriptor from the chaser at `idx` to its target.
    pub fn trace_line(&self, idx: usize) -> TraceLine {
        let chaser = &self.chasers[idx];
        let target = &self.chasers[chaser.target];
        TraceLine {
            from: chaser.position,
            to: target.position,
            color: chaser.color,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

mod math {
    pub fn atan2(y: f32, x: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            y.atan2(x)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::atan2f(y, x)
        }
    }

    pub fn sin_cos(angle: f32) -> (f32, f32) {
        #[cfg(feature = "std")]
        {
            angle.sin_cos()
        }
        #[cfg(not(feature = "std"))]
        {
            (libm::sinf(angle), libm::cosf(angle))
        }
    }

    pub fn abs(value: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            value.abs()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::fabsf(value)
        }
    }

    pub fn floor(value: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            value.floor()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::floorf(value)
        }
    }

    pub fn rem(value: f32, modulus: f32) -> f32 {
        #[cfg(feature = "std")]
        {
            value % modulus
        }
        #[cfg(not(feature = "std"))]
        {
            libm::fmodf(value, modulus)
        }
    }
}
