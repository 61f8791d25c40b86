use super::lander::LanderState;
use crate::config::{PhysicsConfig, ScoringConfig};
use crate::types::{LandingPad, Outcome};

/// Touchdown conditions: upright, slow in both axes, over the pad
pub fn is_safe_touchdown(state: &LanderState, pad: &LandingPad, physics: &PhysicsConfig) -> bool {
    state.pose.rotation.abs() < physics.rotation_tolerance
        && state.velocity.x.abs() < physics.max_landing_horizontal_speed
        && state.velocity.y.abs() < physics.max_landing_vertical_speed
        && pad.contains_x(state.pose.position.x)
}

/// Scalar fitness of a finished run. Landings score in
/// `[landing_base, ..)`, crashes in `[crash_base, crash_ceiling]`,
/// timeouts in `[0, timeout_weight]`. Never negative.
pub fn fitness(
    outcome: Outcome,
    state: &LanderState,
    pad: &LandingPad,
    world_width: f64,
    scoring: &ScoringConfig,
) -> f64 {
    let speed = state.velocity.length();
    let tilt = state.pose.rotation.abs();

    let raw = match outcome {
        Outcome::Landed => {
            scoring.landing_base
                + scoring.landing_speed_weight / (1.0 + speed)
                + scoring.landing_rotation_weight / (1.0 + tilt)
        }
        Outcome::Crashed => {
            let miss = pad.edge_distance(state.pose.position.x);
            // a zero-width pad still ranks on-pad crashes highest
            let proximity = 1.0 / (1.0 + miss / pad.half_width.max(f64::EPSILON));
            scoring.crash_base
                + scoring.crash_proximity_weight * proximity
                + scoring.crash_speed_weight / (1.0 + speed)
                + scoring.crash_rotation_weight / (1.0 + tilt)
        }
        Outcome::TimedOut => {
            let distance = state.pose.position.distance(&pad.position);
            scoring.timeout_weight / (1.0 + distance / world_width)
        }
    };

    if raw.is_finite() {
        raw.max(0.0)
    } else {
        0.0
    }
}
