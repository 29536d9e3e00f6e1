//! Fishing line state machine.
//!
//! ```text
//!   hold          release            hits water
//!  ┌─────┐      ┌─────────┐        ┌───────────┐
//!  │ Pole │────▶│ Casting │───────▶│   Cast    │◀─┐ escaped
//!  └─────┘      └─────────┘        └───────────┘  │
//!     ▲                     press │    │ bite     │
//!     │ tip reached               │    ▼          │
//!  ┌─────────┐     press      ┌───────────┐       │
//!  │ Reeling │◀───────────────│  Hooked   │───────┘
//!  └─────────┘                └───────────┘
//! ```
//!
//! Everything runs once per frame from [`FishingLine::update`]. The states
//! are checked in order, so a transition made early in a frame lets the
//! following state run in that same frame.

pub mod pole;
pub mod random;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::ocean::WaveField;
pub use pole::*;
pub use random::random_event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum FishingState {
    /// Bobber hangs from the rod tip. Holding the cast button charges.
    #[default]
    Pole,
    /// Bobber is flying toward the water.
    Casting,
    /// Bobber floats, waiting for a bite.
    Cast,
    /// A fish is biting. Reel now to catch it.
    Hooked,
    /// Line is being pulled back to the rod.
    Reeling,
}

/// Tunable constants of the fishing loop. Rates are per second.
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct FishingTuning {
    pub charge_rate: f32,
    pub decay_rate: f32,
    pub max_cast_angle: f32,
    /// Launch speed per radian of charge.
    pub launch_speed: f32,
    pub gravity: f32,
    pub max_bobber_speed: f32,
    pub bite_mean_seconds: f32,
    pub escape_mean_seconds: f32,
    pub reel_speed: f32,
    /// Height of the bite marker above the bobber.
    pub marker_height: f32,
}

impl Default for FishingTuning {
    fn default() -> Self {
        Self {
            charge_rate: 3.0 * PI / 4.0,
            decay_rate: 6.0 * PI,
            max_cast_angle: 2.0 * PI / 3.0,
            launch_speed: 30.0,
            gravity: 30.0,
            max_bobber_speed: 100_000.0,
            bite_mean_seconds: 15.0,
            escape_mean_seconds: 3.0,
            reel_speed: 120.0,
            marker_height: 5.0,
        }
    }
}

/// Cast button state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FishingInput {
    pub held: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Camera and clock for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FishingFrame {
    pub eye: Vec3,
    pub forward: Vec3,
    /// Seconds since startup, drives the wave field.
    pub time: f32,
    pub delta: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum FishingEvent {
    Cast { speed: f32 },
    Landed { position: Vec3 },
    Hooked,
    Escaped,
    ReelStarted { hooked: bool },
    /// The bobber is back on the rod. `hooked` tells whether a fish was on
    /// the line when reeling began.
    ReeledIn { hooked: bool },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct FishingLine {
    pub state: FishingState,
    pub cast_angle: f32,
    pub bobber: Vec3,
    pub bobber_velocity: Vec3,
    /// Where the bite marker floats while hooked.
    pub marker: Vec3,
    pub pole: PolePose,
    reel_hooked: bool,
}

impl Default for FishingLine {
    fn default() -> Self {
        let pole = PolePose::default();
        Self {
            state: FishingState::Pole,
            cast_angle: 0.0,
            bobber: pole.tip,
            bobber_velocity: Vec3::ZERO,
            marker: pole.tip,
            pole,
            reel_hooked: false,
        }
    }
}

fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + offset / distance * max_step
    }
}

impl FishingLine {
    /// The line and hook drawn on the rod itself only show while the bobber
    /// is on the pole.
    pub fn rod_line_visible(&self) -> bool {
        self.state == FishingState::Pole
    }

    /// Whether a line should be drawn between the bobber and the rod tip.
    pub fn loose_line_visible(&self) -> bool {
        self.state != FishingState::Pole
    }

    pub fn marker_visible(&self) -> bool {
        self.state == FishingState::Hooked
    }

    /// Advances the line by one frame and returns what happened.
    pub fn update(
        &mut self,
        input: FishingInput,
        frame: &FishingFrame,
        waves: &WaveField,
        tuning: &FishingTuning,
        rng: &mut impl Rng,
    ) -> Vec<FishingEvent> {
        let mut events = Vec::new();
        let dt = frame.delta;
        let forward = frame.forward.normalize_or(Vec3::NEG_Z);

        if self.state == FishingState::Pole && input.held {
            self.cast_angle += tuning.charge_rate * dt;
        } else {
            self.cast_angle -= tuning.decay_rate * dt;
        }
        self.cast_angle = self.cast_angle.clamp(0.0, tuning.max_cast_angle);

        self.pole = pole_pose(frame.eye, forward, self.cast_angle);

        if self.state == FishingState::Pole {
            self.bobber = self.pole.tip;
            if input.released {
                let speed = tuning.launch_speed * self.cast_angle;
                self.bobber_velocity = forward * speed;
                self.state = FishingState::Casting;
                events.push(FishingEvent::Cast { speed });
            }
        }

        if self.state == FishingState::Casting {
            self.bobber_velocity.y -= tuning.gravity * dt;
            self.bobber_velocity = self.bobber_velocity.clamp_length_max(tuning.max_bobber_speed);
            self.bobber += self.bobber_velocity * dt;
            if waves.is_submerged(self.bobber, frame.time) {
                self.state = FishingState::Cast;
                events.push(FishingEvent::Landed {
                    position: self.bobber,
                });
            }
        }

        if matches!(self.state, FishingState::Cast | FishingState::Hooked) {
            self.bobber.y = waves.surface_y(self.bobber.x, self.bobber.z, frame.time);

            if self.state == FishingState::Cast
                && random_event(tuning.bite_mean_seconds, dt, rng)
            {
                self.state = FishingState::Hooked;
                events.push(FishingEvent::Hooked);
            }

            if input.pressed {
                self.reel_hooked = self.state == FishingState::Hooked;
                self.state = FishingState::Reeling;
                events.push(FishingEvent::ReelStarted {
                    hooked: self.reel_hooked,
                });
            }
        }

        if self.state == FishingState::Hooked {
            self.marker = self.bobber + Vec3::Y * tuning.marker_height;
            if random_event(tuning.escape_mean_seconds, dt, rng) {
                self.state = FishingState::Cast;
                events.push(FishingEvent::Escaped);
            }
        }

        if self.state == FishingState::Reeling {
            self.bobber = move_towards(self.bobber, self.pole.tip, tuning.reel_speed * dt);
            if self.bobber == self.pole.tip {
                self.state = FishingState::Pole;
                events.push(FishingEvent::ReeledIn {
                    hooked: self.reel_hooked,
                });
                self.reel_hooked = false;
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::OceanConfig;
    use rand::{rngs::StdRng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        line: FishingLine,
        waves: WaveField,
        tuning: FishingTuning,
        rng: StdRng,
        time: f32,
    }

    impl Rig {
        fn new(tuning: FishingTuning) -> Self {
            Self {
                line: FishingLine::default(),
                waves: WaveField::new(OceanConfig::flat(-13.0)),
                tuning,
                rng: StdRng::seed_from_u64(7),
                time: 0.0,
            }
        }

        fn step(&mut self, input: FishingInput) -> Vec<FishingEvent> {
            self.time += DT;
            let frame = FishingFrame {
                eye: Vec3::new(0.0, 2.0, 0.0),
                forward: Vec3::NEG_Z,
                time: self.time,
                delta: DT,
            };
            self.line
                .update(input, &frame, &self.waves, &self.tuning, &mut self.rng)
        }

        fn hold(&mut self, frames: usize) {
            for _ in 0..frames {
                self.step(FishingInput {
                    held: true,
                    ..Default::default()
                });
            }
        }

        fn release(&mut self) -> Vec<FishingEvent> {
            self.step(FishingInput {
                released: true,
                ..Default::default()
            })
        }

        fn press(&mut self) -> Vec<FishingEvent> {
            self.step(FishingInput {
                pressed: true,
                held: true,
                ..Default::default()
            })
        }

        fn idle_until(&mut self, state: FishingState, max_frames: usize) -> Vec<FishingEvent> {
            let mut all = Vec::new();
            for _ in 0..max_frames {
                if self.line.state == state {
                    break;
                }
                all.extend(self.step(FishingInput::default()));
            }
            all
        }
    }

    fn no_bites() -> FishingTuning {
        FishingTuning {
            bite_mean_seconds: f32::MAX,
            ..Default::default()
        }
    }

    #[test]
    fn test_charge_is_clamped() {
        let mut rig = Rig::new(no_bites());
        rig.hold(600);
        assert_eq!(rig.line.cast_angle, rig.tuning.max_cast_angle);
        assert_eq!(rig.line.state, FishingState::Pole);
    }

    #[test]
    fn test_charge_decays_when_released_without_casting() {
        let mut rig = Rig::new(no_bites());
        rig.hold(30);
        rig.release();
        // now casting; angle keeps decaying to zero
        rig.step(FishingInput::default());
        rig.step(FishingInput::default());
        rig.step(FishingInput::default());
        assert_eq!(rig.line.cast_angle, 0.0);
    }

    #[test]
    fn test_bobber_follows_tip_on_pole() {
        let mut rig = Rig::new(no_bites());
        rig.hold(10);
        assert_eq!(rig.line.bobber, rig.line.pole.tip);
        assert!(rig.line.rod_line_visible());
        assert!(!rig.line.loose_line_visible());
    }

    #[test]
    fn test_cast_lands_on_water() {
        let mut rig = Rig::new(no_bites());
        rig.hold(60);
        let events = rig.release();
        assert_eq!(rig.line.state, FishingState::Casting);
        let Some(FishingEvent::Cast { speed }) = events.first() else {
            panic!("expected a cast event, got {events:?}");
        };
        assert!(*speed > 0.0);

        let events = rig.idle_until(FishingState::Cast, 600);
        assert_eq!(rig.line.state, FishingState::Cast);
        assert!(events
            .iter()
            .any(|e| matches!(e, FishingEvent::Landed { .. })));
        assert!(rig.line.bobber.z < -5.0, "bobber flew forward");

        rig.step(FishingInput::default());
        assert_eq!(rig.line.bobber.y, -13.0);
        assert!(rig.line.loose_line_visible());
    }

    #[test]
    fn test_uncharged_release_drops_at_feet() {
        let mut rig = Rig::new(no_bites());
        let events = rig.release();
        assert_eq!(rig.line.state, FishingState::Casting);
        assert_eq!(events, vec![FishingEvent::Cast { speed: 0.0 }]);
        assert_eq!(rig.line.bobber_velocity.z, 0.0);
        rig.idle_until(FishingState::Cast, 600);
        assert_eq!(rig.line.state, FishingState::Cast);
    }

    #[test]
    fn test_pressing_during_flight_is_ignored() {
        let mut rig = Rig::new(no_bites());
        rig.hold(60);
        rig.release();
        rig.press();
        assert_eq!(rig.line.state, FishingState::Casting);
    }

    #[test]
    fn test_reel_in_empty_line() {
        let mut rig = Rig::new(no_bites());
        rig.hold(60);
        rig.release();
        rig.idle_until(FishingState::Cast, 600);

        let events = rig.press();
        assert_eq!(events, vec![FishingEvent::ReelStarted { hooked: false }]);

        let events = rig.idle_until(FishingState::Pole, 600);
        assert_eq!(rig.line.state, FishingState::Pole);
        assert!(events.contains(&FishingEvent::ReeledIn { hooked: false }));
        assert_eq!(rig.line.bobber, rig.line.pole.tip);
    }

    #[test]
    fn test_bite_then_catch() {
        let tuning = FishingTuning {
            bite_mean_seconds: DT / 2.0,
            escape_mean_seconds: f32::MAX,
            ..Default::default()
        };
        let mut rig = Rig::new(tuning);
        rig.hold(60);
        rig.release();
        let events = rig.idle_until(FishingState::Hooked, 600);
        assert!(events.contains(&FishingEvent::Hooked));
        assert!(rig.line.marker_visible());
        assert_eq!(rig.line.marker, rig.line.bobber + Vec3::Y * 5.0);

        let events = rig.press();
        assert!(events.contains(&FishingEvent::ReelStarted { hooked: true }));
        let events = rig.idle_until(FishingState::Pole, 600);
        assert!(events.contains(&FishingEvent::ReeledIn { hooked: true }));
    }

    #[test]
    fn test_fish_escapes() {
        let tuning = FishingTuning {
            bite_mean_seconds: DT / 2.0,
            escape_mean_seconds: DT / 2.0,
            ..Default::default()
        };
        let mut rig = Rig::new(tuning);
        rig.hold(60);
        rig.release();
        let events = rig.idle_until(FishingState::Reeling, 120);
        assert!(events.contains(&FishingEvent::Hooked));
        assert!(events.contains(&FishingEvent::Escaped));
        assert_eq!(rig.line.state, FishingState::Cast);
    }

    #[test]
    fn test_move_towards_snaps_to_target() {
        let to = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(move_towards(Vec3::ZERO, to, 2.0), to);
        assert_eq!(move_towards(Vec3::ZERO, to * 10.0, 2.0), Vec3::new(2.0, 0.0, 0.0));
    }
}
