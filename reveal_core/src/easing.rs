// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves and spring physics.
//!
//! Tweened curves map normalized time `t ∈ [0, 1]` to progress. Springs are
//! time-based: progress is the analytic displacement of a damped harmonic
//! oscillator released from 0 toward 1, and the transition lasts until the
//! envelope decays below [`SPRING_REST_EPSILON`].

use core::fmt;

use crate::time::Duration;

/// Envelope amplitude at which a spring counts as settled.
pub const SPRING_REST_EPSILON: f64 = 1e-3;

/// Parameters of a damped spring.
///
/// Construct with [`SpringParams::new`], which rejects values that would
/// never settle or are not physical.
#[derive(Clone, Copy, PartialEq)]
pub struct SpringParams {
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl SpringParams {
    /// A soft spring with a little overshoot.
    pub const GENTLE: Self = Self {
        stiffness: 100.0,
        damping: 15.0,
        mass: 1.0,
    };

    /// Validates and creates spring parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSpring`] if any value is non-finite or not strictly
    /// positive.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self, InvalidSpring> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(stiffness) && ok(damping) && ok(mass) {
            Ok(Self {
                stiffness,
                damping,
                mass,
            })
        } else {
            Err(InvalidSpring {
                stiffness,
                damping,
                mass,
            })
        }
    }

    /// Spring stiffness.
    #[must_use]
    pub const fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping coefficient.
    #[must_use]
    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// Mass.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    fn natural_frequency(&self) -> f64 {
        libm::sqrt(self.stiffness / self.mass)
    }

    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * libm::sqrt(self.stiffness * self.mass))
    }

    /// Displacement toward the target after `t` seconds, starting at rest
    /// at 0. Underdamped springs overshoot past 1.
    #[must_use]
    pub fn position(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            let wd = w0 * libm::sqrt(1.0 - zeta * zeta);
            let envelope = libm::exp(-zeta * w0 * t);
            1.0 - envelope * (libm::cos(wd * t) + (zeta * w0 / wd) * libm::sin(wd * t))
        } else if zeta == 1.0 {
            1.0 - libm::exp(-w0 * t) * (1.0 + w0 * t)
        } else {
            let root = libm::sqrt(zeta * zeta - 1.0);
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            1.0 - (r2 * libm::exp(r1 * t) - r1 * libm::exp(r2 * t)) / (r2 - r1)
        }
    }

    /// Time until the oscillation envelope decays below
    /// [`SPRING_REST_EPSILON`].
    #[must_use]
    pub fn settle_duration(&self) -> Duration {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let decay = if zeta <= 1.0 {
            zeta * w0
        } else {
            // The slow root dominates an overdamped response.
            w0 * (zeta - libm::sqrt(zeta * zeta - 1.0))
        };
        Duration::from_secs_f64(-libm::log(SPRING_REST_EPSILON) / decay)
    }
}

impl fmt::Debug for SpringParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpringParams")
            .field("stiffness", &self.stiffness)
            .field("damping", &self.damping)
            .field("mass", &self.mass)
            .finish()
    }
}

/// Spring parameters that failed validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidSpring {
    /// Offending stiffness.
    pub stiffness: f64,
    /// Offending damping.
    pub damping: f64,
    /// Offending mass.
    pub mass: f64,
}

impl fmt::Display for InvalidSpring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spring needs finite positive stiffness, damping and mass (got {}, {}, {})",
            self.stiffness, self.damping, self.mass
        )
    }
}

impl core::error::Error for InvalidSpring {}

/// How a transition progresses over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS `ease-out`.
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier([f64; 4]),
    /// Physics-driven; the authored duration is ignored.
    Spring(SpringParams),
}

impl Easing {
    /// Returns the control points for tweened curves, `None` for springs.
    #[must_use]
    pub const fn control_points(&self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => Some([0.0, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
            Self::CubicBezier(points) => Some(*points),
            Self::Spring(_) => None,
        }
    }

    /// Returns `true` if the control points describe a valid timing
    /// function (x coordinates in `[0, 1]`, everything finite).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self.control_points() {
            Some([x1, y1, x2, y2]) => {
                y1.is_finite()
                    && y2.is_finite()
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            None => true,
        }
    }

    /// Maps normalized time `t` to progress for tweened curves.
    ///
    /// Springs are time-based and return `t` unchanged here; use
    /// [`SpringParams::position`] instead.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear | Self::Spring(_) => t,
            _ => match self.control_points() {
                Some([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
                None => t,
            },
        }
    }
}

fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    // B(s) with P0 = 0 and P3 = 1.
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Newton first, bisection if the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if libm::fabs(err) < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if libm::fabs(slope) < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(x1, x2, s);
        if libm::fabs(value - x) < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_axis(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tweened_curves_pin_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier([0.6, -0.05, 0.01, 0.99]),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-2.0), 0.0, "{easing:?} clamps below");
            assert_eq!(easing.apply(2.0), 1.0, "{easing:?} clamps above");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-4, "expected ~0.5, got {mid}");
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-4, "expected symmetry, got {a} + {b}");
    }

    #[test]
    fn ease_out_leads_linear() {
        for i in 1..10 {
            let t = f64::from(i) / 10.0;
            assert!(Easing::EaseOut.apply(t) > t, "ease-out at {t}");
        }
    }

    #[test]
    fn invalid_control_points_are_detected() {
        assert!(!Easing::CubicBezier([1.5, 0.0, 0.5, 1.0]).is_valid());
        assert!(!Easing::CubicBezier([0.5, f64::NAN, 0.5, 1.0]).is_valid());
        assert!(Easing::CubicBezier([0.5, -2.0, 0.5, 3.0]).is_valid());
    }

    #[test]
    fn spring_rejects_non_physical_params() {
        assert!(SpringParams::new(100.0, 10.0, 1.0).is_ok());
        assert!(SpringParams::new(0.0, 10.0, 1.0).is_err());
        assert!(SpringParams::new(100.0, 0.0, 1.0).is_err());
        assert!(SpringParams::new(100.0, 10.0, -1.0).is_err());
        assert!(SpringParams::new(f64::INFINITY, 10.0, 1.0).is_err());
    }

    #[test]
    fn spring_starts_at_rest_and_settles_at_target() {
        for (k, c, m) in [(100.0, 10.0, 1.0), (100.0, 20.0, 1.0), (100.0, 60.0, 1.0)] {
            let spring = SpringParams::new(k, c, m).unwrap();
            assert_eq!(spring.position(0.0), 0.0);
            let settle = spring.settle_duration().as_secs_f64();
            let end = spring.position(settle);
            assert!(
                (end - 1.0).abs() < 1e-2,
                "spring ({k}, {c}, {m}) ended at {end} after {settle}s"
            );
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let spring = SpringParams::new(100.0, 5.0, 1.0).unwrap();
        let peak = (1..200)
            .map(|i| spring.position(f64::from(i) / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn stiffer_spring_settles_faster() {
        let soft = SpringParams::new(50.0, 10.0, 1.0).unwrap();
        let stiff = SpringParams::new(400.0, 40.0, 1.0).unwrap();
        assert!(stiff.settle_duration() < soft.settle_duration());
    }
}
