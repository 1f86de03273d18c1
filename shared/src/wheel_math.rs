use crate::shared_wheel_game::{
    Segment, DRAMATIC_RETURN_BASE_SECS, NATURAL_BASE_SECS, NATURAL_SECS_PER_ROTATION,
    OVERSHOOT_SECS, SOLVER_STEP_DEGREES,
};
use crate::suspense::SuspenseProfile;
use log::warn;

/// Width of one segment in degrees.
pub fn segment_width(segment_count: usize) -> f64 {
    360.0 / segment_count as f64
}

/// Maps an absolute rotation angle to the segment index under the pointer.
///
/// The pointer sits at 12 o'clock; half a segment width is added so the
/// pointer reads segment centers rather than edges. The slot order is
/// reversed because the wheel turns opposite to the pointer's apparent
/// travel across segments.
///
/// `segment_count` must be at least 1; an empty wheel has nothing to point
/// at and is handled before drawing.
pub fn segment_at(rotation_degrees: f64, segment_count: usize) -> usize {
    debug_assert!(segment_count > 0, "segment_at requires a non-empty wheel");
    let width = segment_width(segment_count);
    let normalized = rotation_degrees.rem_euclid(360.0);
    let adjusted = (normalized + width / 2.0) % 360.0;
    let slot = ((adjusted / width) as usize).min(segment_count - 1);
    segment_count - 1 - slot
}

/// Finds the absolute rotation a spin should end at so the pointer lands on
/// `winner_index`.
///
/// Scans one full turn in fixed increments past the requested number of
/// rotations and returns the first candidate that maps to the winner. The
/// scan can only miss when segments are narrower than the scan step; the
/// direct-formula fallback keeps the spin going instead of failing.
pub fn solve_target_angle(
    current_rotation: f64,
    winner_index: usize,
    segment_count: usize,
    base_rotations: f64,
) -> f64 {
    let start = current_rotation + base_rotations * 360.0;
    let mut offset = 0.0;
    while offset < 360.0 {
        let candidate = start + offset;
        if segment_at(candidate, segment_count) == winner_index {
            return candidate;
        }
        offset += SOLVER_STEP_DEGREES;
    }
    warn!(
        "target scan missed winner index {} among {} segments, using direct formula",
        winner_index, segment_count
    );
    start + winner_index as f64 * segment_width(segment_count)
}

/// Finds the segment for a server-announced winner, matching label or id.
pub fn resolve_winner_index(segments: &[Segment], winner: &str) -> Option<usize> {
    segments.iter().position(|s| s.label == winner || s.id == winner)
}

/// One named sub-stage of the spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Natural,
    Overshoot,
    Hesitation,
    Dramatic,
}

impl SpinPhase {
    /// Viewer-facing status line shown under the wheel while the phase runs.
    pub fn status_line(self) -> &'static str {
        match self {
            SpinPhase::Natural => "Spinning...",
            SpinPhase::Overshoot => "Building suspense...",
            SpinPhase::Hesitation => "Almost there...",
            SpinPhase::Dramatic => "Finding winner...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    OutCubic,
    InOutQuad,
    Linear,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::OutCubic => ease_out_cubic(t),
            Easing::InOutQuad => ease_in_out_quad(t),
            Easing::Linear => t,
        }
    }
}

// Easing function for smooth deceleration
pub fn ease_out_cubic(t: f64) -> f64 {
    // Modified ease-out: 1 - (1-t)^4
    1.0 - (1.0 - t).powi(4)
}

// Symmetric ease for the dramatic return
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
    }
}

/// One time-bounded rotation tween. A hesitation pause is a descriptor whose
/// start and end rotation coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDescriptor {
    pub phase: SpinPhase,
    pub duration_secs: f64,
    pub start_rotation: f64,
    pub end_rotation: f64,
    pub easing: Easing,
}

impl PhaseDescriptor {
    /// Rotation at `elapsed_secs` into the phase. Clamped, so overshooting
    /// the duration between frames still ends exactly on `end_rotation`.
    pub fn rotation_at(&self, elapsed_secs: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return self.end_rotation;
        }
        let t = (elapsed_secs / self.duration_secs).clamp(0.0, 1.0);
        self.start_rotation + (self.end_rotation - self.start_rotation) * self.easing.apply(t)
    }
}

/// Builds the ordered phase plan for one spin.
///
/// Always starts with the natural spin to the target. A profile with
/// overshoot configured adds the swing past the target, an optional
/// hesitation hold, and the dramatic return; the final descriptor always
/// ends exactly on `final_rotation`.
pub fn plan_spin(
    current_rotation: f64,
    final_rotation: f64,
    profile: &SuspenseProfile,
) -> Vec<PhaseDescriptor> {
    let mut plan = vec![PhaseDescriptor {
        phase: SpinPhase::Natural,
        duration_secs: NATURAL_BASE_SECS + profile.base_rotations * NATURAL_SECS_PER_ROTATION,
        start_rotation: current_rotation,
        end_rotation: final_rotation,
        easing: Easing::OutCubic,
    }];

    if profile.overshoot_degrees > 0.0 {
        let peak = final_rotation + profile.overshoot_degrees;
        plan.push(PhaseDescriptor {
            phase: SpinPhase::Overshoot,
            duration_secs: OVERSHOOT_SECS,
            start_rotation: final_rotation,
            end_rotation: peak,
            easing: Easing::OutCubic,
        });
        if profile.hesitation_seconds > 0.0 {
            plan.push(PhaseDescriptor {
                phase: SpinPhase::Hesitation,
                duration_secs: profile.hesitation_seconds,
                start_rotation: peak,
                end_rotation: peak,
                easing: Easing::Linear,
            });
        }
        plan.push(PhaseDescriptor {
            phase: SpinPhase::Dramatic,
            duration_secs: DRAMATIC_RETURN_BASE_SECS / profile.dramatic_slowdown,
            start_rotation: peak,
            end_rotation: final_rotation,
            easing: Easing::InOutQuad,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suspense::SuspenseLevel;

    fn sample_segments(labels: &[&str]) -> Vec<Segment> {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| Segment::for_entrant(&format!("id-{}", i), l, i))
            .collect()
    }

    #[test]
    fn test_segment_at_in_range_and_periodic() {
        for count in 1..=12 {
            for rotation in [-720.5, -1.0, 0.0, 44.9, 123.0, 359.9, 1080.0] {
                let idx = segment_at(rotation, count);
                assert!(idx < count);
                assert_eq!(idx, segment_at(rotation + 360.0, count));
                assert_eq!(idx, segment_at(rotation - 360.0, count));
            }
        }
    }

    #[test]
    fn test_segment_at_four_segments() {
        // Pointer reads centers: at rest the last segment sits on top.
        assert_eq!(segment_at(0.0, 4), 3);
        assert_eq!(segment_at(90.0, 4), 2);
        assert_eq!(segment_at(180.0, 4), 1);
        assert_eq!(segment_at(270.0, 4), 0);
        // Half-width boundary: 45 degrees flips to the next segment.
        assert_eq!(segment_at(44.9, 4), 3);
        assert_eq!(segment_at(45.0, 4), 2);
    }

    #[test]
    fn test_single_segment_wheel() {
        for rotation in [0.0, 90.0, 359.0, -47.0] {
            assert_eq!(segment_at(rotation, 1), 0);
        }
    }

    #[test]
    fn test_solver_lands_on_winner() {
        for count in 1..=24 {
            for current in [-400.0, 0.0, 37.5, 720.0] {
                for winner in 0..count {
                    let target = solve_target_angle(current, winner, count, 3.0);
                    assert_eq!(segment_at(target, count), winner);
                    assert!(target >= current + 3.0 * 360.0);
                }
            }
        }
    }

    #[test]
    fn test_solver_fallback_for_narrow_segments() {
        // 120 segments are 3 degrees wide, narrower than the 5 degree scan
        // step, so the direct formula may be used; the spin must still move
        // forward by the requested rotations.
        let target = solve_target_angle(10.0, 60, 120, 4.0);
        assert!(target >= 10.0 + 4.0 * 360.0);
        assert!(target.is_finite());
    }

    #[test]
    fn test_resolve_winner_index() {
        let segments = sample_segments(&["A", "B", "C", "D"]);
        assert_eq!(resolve_winner_index(&segments, "C"), Some(2));
        assert_eq!(resolve_winner_index(&segments, "id-1"), Some(1));
        assert_eq!(resolve_winner_index(&segments, "nobody"), None);
    }

    #[test]
    fn test_predetermined_winner_example() {
        let segments = sample_segments(&["A", "B", "C", "D"]);
        let winner = resolve_winner_index(&segments, "C").unwrap();
        let target = solve_target_angle(90.0, winner, segments.len(), 3.0);
        assert_eq!(segment_at(target, segments.len()), 2);
        assert_eq!(segments[segment_at(target, segments.len())].label, "C");
    }

    #[test]
    fn test_plan_phase_order_moderate() {
        let profile = SuspenseProfile::for_level(SuspenseLevel::Moderate);
        let plan = plan_spin(0.0, 1800.0, &profile);
        let phases: Vec<SpinPhase> = plan.iter().map(|p| p.phase).collect();
        assert_eq!(
            phases,
            vec![
                SpinPhase::Natural,
                SpinPhase::Overshoot,
                SpinPhase::Hesitation,
                SpinPhase::Dramatic,
            ]
        );
    }

    #[test]
    fn test_plan_phase_order_none() {
        let profile = SuspenseProfile::for_level(SuspenseLevel::None);
        let plan = plan_spin(0.0, 1080.0, &profile);
        let phases: Vec<SpinPhase> = plan.iter().map(|p| p.phase).collect();
        assert_eq!(phases, vec![SpinPhase::Natural]);
    }

    #[test]
    fn test_plan_skips_hesitation_when_zero() {
        let profile = SuspenseProfile {
            base_rotations: 4.0,
            rotation_variance: 0.0,
            overshoot_degrees: 60.0,
            hesitation_seconds: 0.0,
            dramatic_slowdown: 0.5,
        };
        let plan = plan_spin(0.0, 1500.0, &profile);
        let phases: Vec<SpinPhase> = plan.iter().map(|p| p.phase).collect();
        assert_eq!(
            phases,
            vec![SpinPhase::Natural, SpinPhase::Overshoot, SpinPhase::Dramatic]
        );
    }

    #[test]
    fn test_plan_is_continuous_and_ends_on_target() {
        let profile = SuspenseProfile::for_level(SuspenseLevel::Dramatic);
        let plan = plan_spin(123.0, 2345.0, &profile);
        for pair in plan.windows(2) {
            assert_eq!(pair[0].end_rotation, pair[1].start_rotation);
        }
        assert_eq!(plan.first().unwrap().start_rotation, 123.0);
        assert_eq!(plan.last().unwrap().end_rotation, 2345.0);

        let natural = &plan[0];
        assert_eq!(natural.duration_secs, 3.0 + 6.0 * 0.5);
        let dramatic = plan.last().unwrap();
        assert_eq!(dramatic.duration_secs, 1.5 / 0.4);
    }

    #[test]
    fn test_hesitation_holds_still() {
        let profile = SuspenseProfile::for_level(SuspenseLevel::Moderate);
        let plan = plan_spin(0.0, 1800.0, &profile);
        let hesitation = plan.iter().find(|p| p.phase == SpinPhase::Hesitation).unwrap();
        assert_eq!(hesitation.start_rotation, hesitation.end_rotation);
        for elapsed in [0.0, 0.3, 0.9, 5.0] {
            assert_eq!(hesitation.rotation_at(elapsed), hesitation.end_rotation);
        }
    }

    #[test]
    fn test_rotation_at_clamps() {
        let tween = PhaseDescriptor {
            phase: SpinPhase::Natural,
            duration_secs: 2.0,
            start_rotation: 100.0,
            end_rotation: 500.0,
            easing: Easing::Linear,
        };
        assert_eq!(tween.rotation_at(0.0), 100.0);
        assert_eq!(tween.rotation_at(1.0), 300.0);
        assert_eq!(tween.rotation_at(2.0), 500.0);
        assert_eq!(tween.rotation_at(99.0), 500.0);
        assert_eq!(tween.rotation_at(-1.0), 100.0);
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in [Easing::OutCubic, Easing::InOutQuad, Easing::Linear] {
            assert!((easing.apply(0.0)).abs() < 1e-12);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            let mut last = 0.0;
            for step in 1..=20 {
                let value = easing.apply(step as f64 / 20.0);
                assert!(value >= last);
                last = value;
            }
        }
    }
}
