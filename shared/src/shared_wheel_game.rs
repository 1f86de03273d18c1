use serde::{Serialize, Deserialize};

/// One addressable slice of the wheel, corresponding to one entrant.
/// The set is rebuilt from the current roster on every render and has no
/// identity of its own.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub label: String,
    pub fill_color: String,
    pub text_color: String,
}

impl Segment {
    /// Builds the segment for the entrant at `index`, cycling the palette.
    pub fn for_entrant(id: &str, label: &str, index: usize) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            fill_color: SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()].to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

/// The entrant the wheel landed on. Produced exactly once per spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WinnerResult {
    pub segment_id: String,
    pub label: String,
}

// === API Types ===

/// Payload the realtime channel pushes when the server starts a spin:
/// the authoritative winner, the suspense level to animate with, and how
/// long the server took to resolve the round.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinAnnouncement {
    pub winner: String,
    pub suspense_level: String,
    pub calculation_time_ms: Option<f64>,
}

/// Masks a username for public display, e.g. `@abc***z`.
/// Handles at most one leading `@`; short names are shown in full.
pub fn mask_username(username: &str) -> String {
    let clean = username.replacen('@', "", 1);
    if clean.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = clean.chars().collect();
    if chars.len() <= 4 {
        return format!("@{}", clean);
    }
    let head: String = chars[..3].iter().collect();
    let tail = chars[chars.len() - 1];
    format!("@{}***{}", head, tail)
}

// Constants for frontend animation
pub const SEGMENT_PALETTE: [&str; 8] = [
    "#f97316", // Orange
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#22c55e", // Green
    "#eab308", // Amber
    "#3b82f6", // Blue
    "#ef4444", // Red
];
pub const IDLE_TURN_SECONDS: f64 = 100.0; // One idle revolution per 100s
pub const SOLVER_STEP_DEGREES: f64 = 5.0;
pub const NATURAL_BASE_SECS: f64 = 3.0;
pub const NATURAL_SECS_PER_ROTATION: f64 = 0.5;
pub const OVERSHOOT_SECS: f64 = 0.8;
pub const DRAMATIC_RETURN_BASE_SECS: f64 = 1.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_username() {
        assert_eq!(mask_username(""), "");
        assert_eq!(mask_username("abc"), "@abc");
        assert_eq!(mask_username("@dave"), "@dave");
        assert_eq!(mask_username("longplayer"), "@lon***r");
        assert_eq!(mask_username("@longplayer"), "@lon***r");
    }

    #[test]
    fn test_palette_cycles() {
        let first = Segment::for_entrant("a", "a", 0);
        let wrapped = Segment::for_entrant("b", "b", SEGMENT_PALETTE.len());
        assert_eq!(first.fill_color, wrapped.fill_color);
        assert_eq!(first.text_color, "#ffffff");
    }
}
