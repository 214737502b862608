// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation variant registry.
//!
//! Entrance animations are drawn from a fixed catalog addressed by
//! [`VariantName`]. The catalog is immutable once built: the standard one is
//! a `static` ([`VariantRegistry::standard`]) and custom catalogs go through
//! [`RegistryBuilder`], which validates every timing value. A malformed
//! entry (negative or non-finite duration or delay, invalid curve, invalid
//! spring) is reported as a [`RegistryError`] from
//! [`build`](RegistryBuilder::build) and can never reach a running
//! [`AnimationController`](crate::animation::AnimationController).

use core::fmt;

use crate::easing::{Easing, InvalidSpring, SpringParams};
use crate::time::Duration;

/// The animatable style of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl StyleState {
    /// Fully shown, untransformed.
    pub const REST: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    /// Interpolates toward `target`. `progress` may leave `[0, 1]` for
    /// springs; opacity is clamped, offset and scale are not.
    #[must_use]
    pub fn lerp(&self, target: &Self, progress: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * progress;
        Self {
            opacity: mix(self.opacity, target.opacity).clamp(0.0, 1.0),
            translate_y: mix(self.translate_y, target.translate_y),
            scale: mix(self.scale, target.scale),
        }
    }

    fn is_finite(&self) -> bool {
        self.opacity.is_finite() && self.translate_y.is_finite() && self.scale.is_finite()
    }
}

/// Timing of one transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    duration: Duration,
    delay: Duration,
    easing: Easing,
}

impl Transition {
    /// Creates a tween from whole milliseconds.
    #[must_use]
    pub const fn tween_ms(duration_ms: u64, delay_ms: u64, easing: Easing) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            delay: Duration::from_millis(delay_ms),
            easing,
        }
    }

    /// Creates a spring transition.
    #[must_use]
    pub const fn spring(params: SpringParams) -> Self {
        Self {
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            easing: Easing::Spring(params),
        }
    }

    /// Authored tween duration (ignored by springs).
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Delay before the transition starts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// The easing curve.
    #[must_use]
    pub const fn easing(&self) -> &Easing {
        &self.easing
    }

    /// How long the transition moves once started.
    #[must_use]
    pub fn active_duration(&self) -> Duration {
        match &self.easing {
            Easing::Spring(spring) => spring.settle_duration(),
            _ => self.duration,
        }
    }

    /// Progress after `elapsed` time since the transition was triggered
    /// (delay included). Zero before the delay has passed.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let Some(local) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        match &self.easing {
            Easing::Spring(spring) => {
                if local >= spring.settle_duration() {
                    1.0
                } else {
                    spring.position(local.as_secs_f64())
                }
            }
            easing => {
                if self.duration == Duration::ZERO {
                    return 1.0;
                }
                let t = local.as_secs_f64() / self.duration.as_secs_f64();
                easing.apply(t)
            }
        }
    }

    /// Returns `true` once the transition has reached its target.
    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay.saturating_add(self.active_duration())
    }
}

/// An entrance animation for a single element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationVariant {
    /// Style while hidden.
    pub initial: StyleState,
    /// Style once the entrance completes.
    pub target: StyleState,
    /// Timing.
    pub transition: Transition,
}

impl AnimationVariant {
    /// Samples the style `elapsed` after the variant was triggered.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> StyleState {
        self.initial
            .lerp(&self.target, self.transition.progress(elapsed))
    }
}

/// A variant applied to an ordered group of children with cascading delays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerGroup {
    /// Variant each child plays.
    pub child: AnimationVariant,
    /// Extra delay per child index.
    pub per_child_delay: Duration,
    /// Delay before the first child.
    pub group_delay: Duration,
}

impl StaggerGroup {
    /// Effective delay for the child at `index`:
    /// `group_delay + index × per_child_delay`.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> Duration {
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        self.group_delay
            .saturating_add(self.per_child_delay.saturating_mul(index))
    }
}

/// A resolved catalog entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Variant {
    /// Every child plays the same variant at the same time.
    Single(AnimationVariant),
    /// Children cascade.
    Stagger(StaggerGroup),
}

impl Variant {
    /// The variant each child plays.
    #[must_use]
    pub const fn child(&self) -> &AnimationVariant {
        match self {
            Self::Single(v) => v,
            Self::Stagger(g) => &g.child,
        }
    }

    /// Offset before the child at `index` is triggered.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> Duration {
        match self {
            Self::Single(_) => Duration::ZERO,
            Self::Stagger(g) => g.child_delay(index),
        }
    }
}

/// Names of catalog entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariantName {
    /// Fade in while rising into place.
    FadeInUp,
    /// Fade in while growing to full size.
    ScaleIn,
    /// Cascade [`FadeInUp`](Self::FadeInUp) over the children.
    StaggerChildren,
    /// [`FadeInUp`](Self::FadeInUp) styles driven by a spring.
    Custom(SpringParams),
}

/// A validated, immutable catalog of variants.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantRegistry {
    fade_in_up: AnimationVariant,
    scale_in: AnimationVariant,
    stagger_children: StaggerGroup,
}

const FADE_IN_UP: AnimationVariant = AnimationVariant {
    initial: StyleState {
        opacity: 0.0,
        translate_y: 60.0,
        scale: 1.0,
    },
    target: StyleState::REST,
    transition: Transition::tween_ms(600, 0, Easing::CubicBezier([0.6, -0.05, 0.01, 0.99])),
};

static STANDARD: VariantRegistry = VariantRegistry {
    fade_in_up: FADE_IN_UP,
    scale_in: AnimationVariant {
        initial: StyleState {
            opacity: 0.0,
            translate_y: 0.0,
            scale: 0.8,
        },
        target: StyleState::REST,
        transition: Transition::tween_ms(500, 0, Easing::EaseOut),
    },
    stagger_children: StaggerGroup {
        child: FADE_IN_UP,
        per_child_delay: Duration::from_millis(100),
        group_delay: Duration::ZERO,
    },
};

impl VariantRegistry {
    /// The process-wide standard catalog.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Starts building a custom catalog.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolves a name to its entry.
    #[must_use]
    pub fn resolve(&self, name: VariantName) -> Variant {
        match name {
            VariantName::FadeInUp => Variant::Single(self.fade_in_up),
            VariantName::ScaleIn => Variant::Single(self.scale_in),
            VariantName::StaggerChildren => Variant::Stagger(self.stagger_children),
            VariantName::Custom(spring) => Variant::Single(AnimationVariant {
                transition: Transition::spring(spring),
                ..self.fade_in_up
            }),
        }
    }

    /// Re-checks every entry.
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        check_variant("fade_in_up", &self.fade_in_up)?;
        check_variant("scale_in", &self.scale_in)?;
        check_variant("stagger_children", &self.stagger_children.child)
    }
}

fn check_variant(entry: &'static str, variant: &AnimationVariant) -> Result<(), RegistryError> {
    if !variant.initial.is_finite() || !variant.target.is_finite() {
        return Err(RegistryError::InvalidStyle { entry });
    }
    if !variant.transition.easing.is_valid() {
        return Err(RegistryError::InvalidEasing { entry });
    }
    Ok(())
}

/// Authored timing of a transition, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    /// Tween duration.
    pub duration_ms: f64,
    /// Delay before starting.
    pub delay_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

/// Authored variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantSpec {
    /// Style while hidden.
    pub initial: StyleState,
    /// Style once shown.
    pub target: StyleState,
    /// Timing.
    pub transition: TransitionSpec,
}

/// Authored stagger group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerSpec {
    /// Child variant.
    pub child: VariantSpec,
    /// Delay added per child index.
    pub per_child_delay_ms: f64,
    /// Delay before the first child.
    pub group_delay_ms: f64,
}

/// Builds a [`VariantRegistry`] from authored specs.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    fade_in_up: Option<VariantSpec>,
    scale_in: Option<VariantSpec>,
    stagger_children: Option<StaggerSpec>,
}

impl RegistryBuilder {
    /// Sets the [`VariantName::FadeInUp`] entry.
    #[must_use]
    pub fn fade_in_up(mut self, spec: VariantSpec) -> Self {
        self.fade_in_up = Some(spec);
        self
    }

    /// Sets the [`VariantName::ScaleIn`] entry.
    #[must_use]
    pub fn scale_in(mut self, spec: VariantSpec) -> Self {
        self.scale_in = Some(spec);
        self
    }

    /// Sets the [`VariantName::StaggerChildren`] entry.
    #[must_use]
    pub fn stagger_children(mut self, spec: StaggerSpec) -> Self {
        self.stagger_children = Some(spec);
        self
    }

    /// Validates every entry and freezes the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for a missing entry or any invalid value.
    pub fn build(self) -> Result<VariantRegistry, RegistryError> {
        let fade_in_up = variant(
            "fade_in_up",
            self.fade_in_up.ok_or(RegistryError::MissingEntry("fade_in_up"))?,
        )?;
        let scale_in = variant(
            "scale_in",
            self.scale_in.ok_or(RegistryError::MissingEntry("scale_in"))?,
        )?;
        let stagger = self
            .stagger_children
            .ok_or(RegistryError::MissingEntry("stagger_children"))?;
        let stagger_children = StaggerGroup {
            child: variant("stagger_children", stagger.child)?,
            per_child_delay: millis("stagger_children", stagger.per_child_delay_ms)?,
            group_delay: millis("stagger_children", stagger.group_delay_ms)?,
        };
        Ok(VariantRegistry {
            fade_in_up,
            scale_in,
            stagger_children,
        })
    }
}

fn millis(entry: &'static str, value_ms: f64) -> Result<Duration, RegistryError> {
    Duration::try_from_millis_f64(value_ms).ok_or(RegistryError::InvalidTiming { entry, value_ms })
}

fn variant(entry: &'static str, spec: VariantSpec) -> Result<AnimationVariant, RegistryError> {
    let transition = Transition {
        duration: millis(entry, spec.transition.duration_ms)?,
        delay: millis(entry, spec.transition.delay_ms)?,
        easing: spec.transition.easing,
    };
    let built = AnimationVariant {
        initial: spec.initial,
        target: spec.target,
        transition,
    };
    check_variant(entry, &built)?;
    Ok(built)
}

/// A malformed registry entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegistryError {
    /// A duration or delay was negative or non-finite.
    InvalidTiming {
        /// Catalog entry.
        entry: &'static str,
        /// Offending value in milliseconds.
        value_ms: f64,
    },
    /// Cubic-bezier control points were out of range or non-finite.
    InvalidEasing {
        /// Catalog entry.
        entry: &'static str,
    },
    /// A style value was non-finite.
    InvalidStyle {
        /// Catalog entry.
        entry: &'static str,
    },
    /// Spring parameters failed validation.
    InvalidSpring(InvalidSpring),
    /// The builder was missing an entry.
    MissingEntry(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTiming { entry, value_ms } => {
                write!(f, "{entry}: invalid duration or delay ({value_ms}ms)")
            }
            Self::InvalidEasing { entry } => write!(f, "{entry}: invalid easing curve"),
            Self::InvalidStyle { entry } => write!(f, "{entry}: non-finite style value"),
            Self::InvalidSpring(err) => write!(f, "{err}"),
            Self::MissingEntry(entry) => write!(f, "missing registry entry `{entry}`"),
        }
    }
}

impl core::error::Error for RegistryError {}

impl From<InvalidSpring> for RegistryError {
    fn from(err: InvalidSpring) -> Self {
        Self::InvalidSpring(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(duration_ms: f64, delay_ms: f64) -> VariantSpec {
        VariantSpec {
            initial: StyleState {
                opacity: 0.0,
                translate_y: 20.0,
                scale: 1.0,
            },
            target: StyleState::REST,
            transition: TransitionSpec {
                duration_ms,
                delay_ms,
                easing: Easing::Linear,
            },
        }
    }

    fn full_builder() -> RegistryBuilder {
        VariantRegistry::builder()
            .fade_in_up(spec(400.0, 0.0))
            .scale_in(spec(300.0, 0.0))
            .stagger_children(StaggerSpec {
                child: spec(400.0, 0.0),
                per_child_delay_ms: 80.0,
                group_delay_ms: 20.0,
            })
    }

    #[test]
    fn standard_catalog_is_valid() {
        assert_eq!(VariantRegistry::standard().validate(), Ok(()));
    }

    #[test]
    fn stagger_delays_follow_source_order() {
        let Variant::Stagger(group) =
            VariantRegistry::standard().resolve(VariantName::StaggerChildren)
        else {
            panic!("stagger entry should resolve to a group");
        };
        let delays: [Duration; 3] = core::array::from_fn(|i| group.child_delay(i));
        assert_eq!(
            delays,
            [
                Duration::from_millis(0),
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
    }

    #[test]
    fn builder_accepts_valid_specs() {
        let registry = full_builder().build().unwrap();
        let Variant::Stagger(group) = registry.resolve(VariantName::StaggerChildren) else {
            panic!("stagger entry should resolve to a group");
        };
        assert_eq!(group.child_delay(2), Duration::from_millis(180));
    }

    #[test]
    fn negative_duration_is_rejected_at_build() {
        let err = full_builder().scale_in(spec(-5.0, 0.0)).build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidTiming {
                entry: "scale_in",
                value_ms: -5.0
            }
        );
    }

    #[test]
    fn non_finite_delay_is_rejected_at_build() {
        let err = full_builder()
            .stagger_children(StaggerSpec {
                child: spec(400.0, 0.0),
                per_child_delay_ms: f64::INFINITY,
                group_delay_ms: 0.0,
            })
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidTiming {
                entry: "stagger_children",
                ..
            }
        ));
    }

    #[test]
    fn bad_curve_is_rejected_at_build() {
        let mut bad = spec(400.0, 0.0);
        bad.transition.easing = Easing::CubicBezier([2.0, 0.0, 0.5, 1.0]);
        let err = full_builder().fade_in_up(bad).build().unwrap_err();
        assert_eq!(err, RegistryError::InvalidEasing { entry: "fade_in_up" });
    }

    #[test]
    fn missing_entry_is_reported() {
        let err = VariantRegistry::builder()
            .fade_in_up(spec(1.0, 0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::MissingEntry("scale_in"));
    }

    #[test]
    fn invalid_spring_converts_into_registry_error() {
        let err: RegistryError = SpringParams::new(-1.0, 1.0, 1.0).unwrap_err().into();
        assert!(matches!(err, RegistryError::InvalidSpring(_)));
    }

    #[test]
    fn custom_spring_keeps_fade_in_up_styles() {
        let registry = VariantRegistry::standard();
        let Variant::Single(custom) = registry.resolve(VariantName::Custom(SpringParams::GENTLE))
        else {
            panic!("custom entry should resolve to a single variant");
        };
        let Variant::Single(fade) = registry.resolve(VariantName::FadeInUp) else {
            panic!("fade entry should resolve to a single variant");
        };
        assert_eq!(custom.initial, fade.initial);
        assert_eq!(custom.target, fade.target);
        assert!(matches!(custom.transition.easing(), Easing::Spring(_)));
    }

    #[test]
    fn transition_waits_for_delay() {
        let t = Transition::tween_ms(100, 50, Easing::Linear);
        assert_eq!(t.progress(Duration::from_millis(0)), 0.0);
        assert_eq!(t.progress(Duration::from_millis(50)), 0.0);
        assert!((t.progress(Duration::from_millis(100)) - 0.5).abs() < 1e-9);
        assert_eq!(t.progress(Duration::from_millis(150)), 1.0);
        assert!(!t.is_complete(Duration::from_millis(149)));
        assert!(t.is_complete(Duration::from_millis(150)));
    }

    #[test]
    fn spring_transition_completes_at_settle() {
        let t = Transition::spring(SpringParams::GENTLE);
        let settle = t.active_duration();
        assert!(settle > Duration::ZERO);
        assert_eq!(t.progress(settle), 1.0);
        assert!(t.is_complete(settle));
    }

    #[test]
    fn lerp_clamps_opacity_only() {
        let from = StyleState {
            opacity: 0.0,
            translate_y: 60.0,
            scale: 0.8,
        };
        let over = from.lerp(&StyleState::REST, 1.2);
        assert_eq!(over.opacity, 1.0);
        assert!(over.translate_y < 0.0, "offset overshoots past target");
        assert!(over.scale > 1.0, "scale overshoots past target");
    }
}
