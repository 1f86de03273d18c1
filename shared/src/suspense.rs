use serde::{Serialize, Deserialize};
use rand::Rng;

/// Named suspense level the server attaches to a spin. Controls how long
/// and how theatrically the wheel runs before settling.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuspenseLevel {
    None,
    Minimal,
    #[default]
    Moderate,
    Dramatic,
    SuperDramatic,
}

impl SuspenseLevel {
    /// Parses a level name. Unknown names fall back to `Moderate`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "none" => SuspenseLevel::None,
            "minimal" => SuspenseLevel::Minimal,
            "moderate" => SuspenseLevel::Moderate,
            "dramatic" => SuspenseLevel::Dramatic,
            "super_dramatic" => SuspenseLevel::SuperDramatic,
            _ => SuspenseLevel::Moderate,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SuspenseLevel::None => "none",
            SuspenseLevel::Minimal => "minimal",
            SuspenseLevel::Moderate => "moderate",
            SuspenseLevel::Dramatic => "dramatic",
            SuspenseLevel::SuperDramatic => "super_dramatic",
        }
    }

    pub const ALL: [SuspenseLevel; 5] = [
        SuspenseLevel::None,
        SuspenseLevel::Minimal,
        SuspenseLevel::Moderate,
        SuspenseLevel::Dramatic,
        SuspenseLevel::SuperDramatic,
    ];
}

/// Parameter bundle behind a suspense level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuspenseProfile {
    pub base_rotations: f64,
    pub rotation_variance: f64,
    pub overshoot_degrees: f64,
    pub hesitation_seconds: f64,
    pub dramatic_slowdown: f64,
}

impl SuspenseProfile {
    /// Looks up the preset for a level.
    pub fn for_level(level: SuspenseLevel) -> Self {
        match level {
            SuspenseLevel::None => Self {
                base_rotations: 3.0,
                rotation_variance: 1.0,
                overshoot_degrees: 0.0,
                hesitation_seconds: 0.0,
                dramatic_slowdown: 1.0,
            },
            SuspenseLevel::Minimal => Self {
                base_rotations: 4.0,
                rotation_variance: 1.0,
                overshoot_degrees: 45.0,
                hesitation_seconds: 0.5,
                dramatic_slowdown: 0.8,
            },
            SuspenseLevel::Moderate => Self {
                base_rotations: 5.0,
                rotation_variance: 2.0,
                overshoot_degrees: 90.0,
                hesitation_seconds: 1.0,
                dramatic_slowdown: 0.6,
            },
            SuspenseLevel::Dramatic => Self {
                base_rotations: 6.0,
                rotation_variance: 2.0,
                overshoot_degrees: 135.0,
                hesitation_seconds: 1.5,
                dramatic_slowdown: 0.4,
            },
            SuspenseLevel::SuperDramatic => Self {
                base_rotations: 7.0,
                rotation_variance: 3.0,
                overshoot_degrees: 180.0,
                hesitation_seconds: 2.0,
                dramatic_slowdown: 0.2,
            },
        }
    }

    /// Resolves a profile from an optional level name. Missing or
    /// unrecognized names resolve to the `moderate` preset.
    pub fn resolve(name: Option<&str>) -> Self {
        Self::for_level(name.map(SuspenseLevel::from_name).unwrap_or_default())
    }

    /// Rolls the rotation count for one spin: the base plus a random share
    /// of the variance, so consecutive spins do not look identical.
    pub fn roll_rotations(&self) -> f64 {
        self.base_rotations + rand::thread_rng().gen::<f64>() * self.rotation_variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_round_trip() {
        for level in SuspenseLevel::ALL {
            assert_eq!(SuspenseLevel::from_name(level.name()), level);
        }
    }

    #[test]
    fn test_unknown_level_falls_back_to_moderate() {
        assert_eq!(SuspenseLevel::from_name("frantic"), SuspenseLevel::Moderate);
        assert_eq!(SuspenseProfile::resolve(None), SuspenseProfile::for_level(SuspenseLevel::Moderate));
        assert_eq!(SuspenseProfile::resolve(Some("??")), SuspenseProfile::for_level(SuspenseLevel::Moderate));
    }

    #[test]
    fn test_preset_table() {
        let none = SuspenseProfile::for_level(SuspenseLevel::None);
        assert_eq!(none.base_rotations, 3.0);
        assert_eq!(none.overshoot_degrees, 0.0);
        assert_eq!(none.dramatic_slowdown, 1.0);

        let max = SuspenseProfile::for_level(SuspenseLevel::SuperDramatic);
        assert_eq!(max.base_rotations, 7.0);
        assert_eq!(max.overshoot_degrees, 180.0);
        assert_eq!(max.hesitation_seconds, 2.0);
        assert_eq!(max.dramatic_slowdown, 0.2);
    }

    #[test]
    fn test_roll_rotations_stays_within_variance() {
        let profile = SuspenseProfile::for_level(SuspenseLevel::Moderate);
        for _ in 0..100 {
            let rolled = profile.roll_rotations();
            assert!(rolled >= profile.base_rotations);
            assert!(rolled <= profile.base_rotations + profile.rotation_variance);
        }
    }
}
