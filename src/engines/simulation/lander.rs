use super::decoder::decode;
use super::geometry::{touches_ground, world_transform, SHIP_VERTICES};
use super::scoring::{fitness, is_safe_touchdown};
use crate::config::{PhysicsConfig, ScoringConfig};
use crate::engines::generation::genome::Gene;
use crate::types::{Action, LandingPad, Outcome, Pose, Vector2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Mutable state of one lander during one run
#[derive(Debug, Clone, PartialEq)]
pub struct LanderState {
    pub pose: Pose,
    pub velocity: Vector2D,
    pub mass: f64,
    pub tick: usize,
    pub jet_on: bool,
    outcome: Option<Outcome>,
}

impl LanderState {
    pub fn new(pose: Pose, mass: f64) -> Self {
        Self {
            pose,
            velocity: Vector2D::ZERO,
            mass,
            tick: 0,
            jet_on: false,
            outcome: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    /// Latched terminal classification, if the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// One frame of a recorded trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: usize,
    pub pose: Pose,
    pub jet_on: bool,
}

/// Result of running one action stream to completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub final_pose: Pose,
    pub final_velocity: Vector2D,
    pub outcome: Outcome,
    pub fitness: f64,
    pub ticks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub evaluation: Evaluation,
    pub snapshots: Vec<Snapshot>,
}

/// Deterministic fixed-timestep lander physics. Holds no random state, so
/// one simulator can score any number of genomes from any thread.
#[derive(Debug, Clone)]
pub struct LanderSimulator {
    physics: PhysicsConfig,
    scoring: ScoringConfig,
}

impl LanderSimulator {
    pub fn new(physics: PhysicsConfig, scoring: ScoringConfig) -> Self {
        Self { physics, scoring }
    }

    /// Decode `genes` and fly them from `start` towards `pad`
    pub fn evaluate(&self, genes: &[Gene], start: Pose, pad: &LandingPad) -> Evaluation {
        let actions = decode(genes);
        self.run(&actions, LanderState::new(start, self.physics.mass), pad)
    }

    /// Same as [`evaluate`](Self::evaluate) but records every tick for playback
    pub fn simulate_with_trace(&self, genes: &[Gene], start: Pose, pad: &LandingPad) -> Trajectory {
        let actions = decode(genes);
        let mut snapshots = Vec::with_capacity(actions.len() + 1);
        let evaluation = self.run_inner(
            &actions,
            LanderState::new(start, self.physics.mass),
            pad,
            Some(&mut snapshots),
        );
        Trajectory {
            evaluation,
            snapshots,
        }
    }

    /// Run an already decoded action stream from an arbitrary state
    pub fn run(&self, actions: &[Action], state: LanderState, pad: &LandingPad) -> Evaluation {
        self.run_inner(actions, state, pad, None)
    }

    fn run_inner(
        &self,
        actions: &[Action],
        mut state: LanderState,
        pad: &LandingPad,
        mut trace: Option<&mut Vec<Snapshot>>,
    ) -> Evaluation {
        if let Some(snapshots) = trace.as_deref_mut() {
            snapshots.push(snapshot(&state));
        }

        if actions.is_empty() {
            log::debug!("Empty action stream, treating run as timed out");
            return Evaluation {
                final_pose: state.pose,
                final_velocity: state.velocity,
                outcome: Outcome::TimedOut,
                fitness: 0.0,
                ticks: 0,
            };
        }

        for &action in actions {
            let finished = self.step(&mut state, action, pad).is_some();
            if let Some(snapshots) = trace.as_deref_mut() {
                snapshots.push(snapshot(&state));
            }
            if finished {
                break;
            }
        }

        let outcome = *state.outcome.get_or_insert(Outcome::TimedOut);
        let fitness = fitness(outcome, &state, pad, self.physics.world_width, &self.scoring);

        log::debug!(
            "Run finished after {} ticks: {} (fitness {:.3})",
            state.tick,
            outcome,
            fitness
        );

        Evaluation {
            final_pose: state.pose,
            final_velocity: state.velocity,
            outcome,
            fitness,
            ticks: state.tick,
        }
    }

    /// Advance one tick. Returns the outcome once the run has ended;
    /// a finished state is never advanced again.
    pub fn step(&self, state: &mut LanderState, action: Action, pad: &LandingPad) -> Option<Outcome> {
        if state.outcome.is_some() {
            return state.outcome;
        }

        let dt = self.physics.dt();
        let turn = self.physics.rotation_per_second * dt;

        state.jet_on = false;
        match action {
            Action::RotateLeft => state.pose.rotation = normalize_angle(state.pose.rotation - turn),
            Action::RotateRight => state.pose.rotation = normalize_angle(state.pose.rotation + turn),
            Action::Thrust => {
                let accel = self.physics.thrust * dt / state.mass;
                let (sin, cos) = state.pose.rotation.sin_cos();
                state.velocity += Vector2D::new(sin, cos) * accel;
                state.jet_on = true;
            }
            Action::None => {}
        }

        state.velocity.y += self.physics.gravity * dt;
        state.pose.position += state.velocity * (dt * self.physics.scaling_factor);
        state.tick += 1;

        let hull = world_transform(&SHIP_VERTICES, &state.pose, self.physics.ship_scale);
        if touches_ground(&hull, pad.position.y) {
            let outcome = if is_safe_touchdown(state, pad, &self.physics) {
                Outcome::Landed
            } else {
                Outcome::Crashed
            };
            state.outcome = Some(outcome);
        } else if self.out_of_bounds(&state.pose.position) {
            state.outcome = Some(Outcome::TimedOut);
        }

        state.outcome
    }

    fn out_of_bounds(&self, position: &Vector2D) -> bool {
        position.x < 0.0 || position.x > self.physics.world_width || position.y > self.physics.world_height
    }
}

fn snapshot(state: &LanderState) -> Snapshot {
    Snapshot {
        tick: state.tick,
        pose: state.pose,
        jet_on: state.jet_on,
    }
}

/// Wrap into (-PI, PI]
fn normalize_angle(angle: f64) -> f64 {
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> LanderSimulator {
        LanderSimulator::new(PhysicsConfig::default(), ScoringConfig::default())
    }

    fn pad() -> LandingPad {
        LandingPad::new(Vector2D::new(200.0, 50.0), 30.0)
    }

    /// Upright, feet one unit above the pad
    fn hover_pose(x: f64) -> Pose {
        Pose::new(Vector2D::new(x, 56.0), 0.0)
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(PI + 0.1) - (-PI + 0.1)).abs() < 1e-12);
        assert!((normalize_angle(-PI - 0.1) - (PI - 0.1)).abs() < 1e-12);
        assert_eq!(normalize_angle(PI), PI);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_gentle_drop_lands() {
        let sim = simulator();
        let genes = vec![Gene::new(Action::None, 60)];
        let eval = sim.evaluate(&genes, hover_pose(200.0), &pad());
        assert_eq!(eval.outcome, Outcome::Landed);
        assert!(eval.fitness >= ScoringConfig::default().landing_base);
        assert!(eval.ticks < 60);
    }

    #[test]
    fn test_drop_beside_pad_crashes() {
        let sim = simulator();
        let genes = vec![Gene::new(Action::None, 60)];
        let eval = sim.evaluate(&genes, hover_pose(250.0), &pad());
        assert_eq!(eval.outcome, Outcome::Crashed);
    }

    #[test]
    fn test_sliding_touchdown_crashes_but_beats_far_crash() {
        let sim = simulator();
        let pad = pad();
        let actions = vec![Action::None; 60];

        let sliding = LanderState::new(hover_pose(195.0), 100.0).with_velocity(Vector2D::new(1.0, 0.0));
        let sliding = sim.run(&actions, sliding, &pad);
        assert_eq!(sliding.outcome, Outcome::Crashed);

        let far = sim.run(&actions, LanderState::new(hover_pose(250.0), 100.0), &pad);
        assert_eq!(far.outcome, Outcome::Crashed);

        assert!(sliding.fitness > far.fitness);
    }

    #[test]
    fn test_empty_stream_times_out_with_zero_fitness() {
        let sim = simulator();
        let eval = sim.evaluate(&[], hover_pose(200.0), &pad());
        assert_eq!(eval.outcome, Outcome::TimedOut);
        assert_eq!(eval.fitness, 0.0);
        assert_eq!(eval.ticks, 0);
    }

    #[test]
    fn test_exhausted_stream_times_out() {
        let sim = simulator();
        let start = Pose::new(Vector2D::new(200.0, 300.0), 0.0);
        let eval = sim.evaluate(&[Gene::new(Action::None, 5)], start, &pad());
        assert_eq!(eval.outcome, Outcome::TimedOut);
        assert_eq!(eval.ticks, 5);
        assert!(eval.fitness <= ScoringConfig::default().timeout_weight);
    }

    #[test]
    fn test_rotation_and_thrust() {
        let sim = simulator();
        let pad = pad();
        let mut state = LanderState::new(Pose::new(Vector2D::new(200.0, 300.0), 0.0), 100.0);

        sim.step(&mut state, Action::RotateRight, &pad);
        assert!((state.pose.rotation - 3.0 / 60.0).abs() < 1e-12);
        assert!(!state.jet_on);

        sim.step(&mut state, Action::RotateLeft, &pad);
        assert!(state.pose.rotation.abs() < 1e-12);

        let before = state.velocity.y;
        sim.step(&mut state, Action::Thrust, &pad);
        assert!(state.jet_on);
        // thrust (350/60/100) outweighs one tick of lunar gravity
        assert!(state.velocity.y > before);
    }

    #[test]
    fn test_leaving_world_times_out() {
        let sim = simulator();
        let pad = pad();
        let state = LanderState::new(Pose::new(Vector2D::new(399.0, 300.0), 0.0), 100.0)
            .with_velocity(Vector2D::new(5.0, 0.0));
        let eval = sim.run(&[Action::None; 10], state, &pad);
        assert_eq!(eval.outcome, Outcome::TimedOut);
        assert_eq!(eval.ticks, 1);
    }

    #[test]
    fn test_outcome_is_latched() {
        let sim = simulator();
        let pad = pad();
        let mut state = LanderState::new(hover_pose(200.0), 100.0);
        let mut outcome = None;
        for _ in 0..60 {
            outcome = sim.step(&mut state, Action::None, &pad);
            if outcome.is_some() {
                break;
            }
        }
        let ticks = state.tick;
        let pose = state.pose;
        assert_eq!(sim.step(&mut state, Action::Thrust, &pad), outcome);
        assert_eq!(state.tick, ticks);
        assert_eq!(state.pose, pose);
    }

    #[test]
    fn test_trace_records_every_tick() {
        let sim = simulator();
        let genes = vec![Gene::new(Action::Thrust, 3), Gene::new(Action::None, 2)];
        let start = Pose::new(Vector2D::new(200.0, 300.0), 0.0);
        let trajectory = sim.simulate_with_trace(&genes, start, &pad());
        assert_eq!(trajectory.snapshots.len(), 6);
        assert_eq!(trajectory.snapshots[0].pose, start);
        assert!(trajectory.snapshots[1].jet_on);
        assert!(!trajectory.snapshots[5].jet_on);
        assert_eq!(trajectory.evaluation, sim.evaluate(&genes, start, &pad()));
    }
}
