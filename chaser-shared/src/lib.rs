#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Represents a 2D position in surface coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Full settings record as mutated by a host UI: velocity slider plus
/// the erase-before-draw and trace-line checkboxes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SettingsUpdate {
    pub velocity: f32,
    pub erase: bool,
    pub trace: bool,
}

/// Fleet statistics reported across the host boundary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusReport {
    pub chaser_count: usize,
    pub frames: u64,
    pub captures: u64,
}

/// One chaser's pose, exported for frame inspection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChaserSnapshot {
    pub position: Position,
    pub heading: f32,
    pub size: f32,
    /// Index into the fixed red/green/blue palette.
    pub color_index: usize,
}

/// A full fleet pose at one frame
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub chasers: Vec<ChaserSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_status_report_json_shape() {
        let report = StatusReport {
            chaser_count: 120,
            frames: 600,
            captures: 14,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"chaser_count":120,"frames":600,"captures":14}"#
        );
    }

    #[test]
    fn test_settings_update_roundtrip() {
        let update = SettingsUpdate {
            velocity: -3.5,
            erase: true,
            trace: false,
        };
        let parsed: SettingsUpdate =
            serde_json::from_str(&serde_json::to_string(&update).unwrap()).unwrap();
        assert_eq!(parsed, update);
    }
}
