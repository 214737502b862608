// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-driven entrance animation state.
//!
//! Each mounted view region owns an [`AnimationScope`]: a two-state machine
//! (`Hidden`, `Visible`) plus an epoch counter. Visibility transitions from
//! the [`VisibilityObserver`](crate::visibility::VisibilityObserver) drive
//! the machine:
//!
//! ```text
//!            isVisible = true  (epoch += 1, clock restarts)
//!   Hidden ─────────────────────────────────────────────► Visible
//!      ▲                                                     │
//!      └──────────── isVisible = false (Replay::Always) ─────┘
//! ```
//!
//! A [`Replay::Once`] scope ignores the hide signal after its first entrance
//! and stays frozen at its target style.
//!
//! The epoch is the render key. Every Hidden→Visible transition bumps it and
//! restarts the entrance clock, so children are sampled from their initial
//! style again instead of resuming from wherever an interrupted entrance
//! left them. Transitions are applied in delivery order, one epoch bump per
//! entrance.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::time::{Duration, HostTime};
use crate::variant::{StyleState, Variant};
use crate::visibility::{RegionId, VisibilityChange};

/// The two states of a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeState {
    /// Children rest at their initial style.
    Hidden,
    /// Children play toward their target style.
    Visible,
}

/// Whether a scope re-triggers when it scrolls back into view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Replay {
    /// Animate on the first entrance only, then freeze.
    Once,
    /// Reset on every exit and replay on every entrance.
    #[default]
    Always,
}

/// A state change of one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeTransition {
    /// New state.
    pub state: ScopeState,
    /// Epoch after the transition.
    pub epoch: u64,
}

/// Animation state for one mounted view region.
#[derive(Clone, Debug)]
pub struct AnimationScope {
    variant: Variant,
    children: usize,
    replay: Replay,
    state: ScopeState,
    epoch: u64,
    visible_since: Option<HostTime>,
    frozen: bool,
}

impl AnimationScope {
    /// Creates a hidden scope with `children` elements playing `variant`.
    #[must_use]
    pub fn new(variant: Variant, children: usize, replay: Replay) -> Self {
        Self {
            variant,
            children,
            replay,
            state: ScopeState::Hidden,
            epoch: 0,
            visible_since: None,
            frozen: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// Number of completed Hidden→Visible transitions.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of children.
    #[must_use]
    pub fn children(&self) -> usize {
        self.children
    }

    /// The variant children play.
    #[must_use]
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Returns `true` for a [`Replay::Once`] scope that has already entered.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Updates the child count, e.g. after the item list was filtered.
    pub fn set_children(&mut self, children: usize) {
        self.children = children;
    }

    /// Feeds one visibility signal.
    ///
    /// Returns the transition, or `None` if the signal did not change state.
    pub fn set_visible(&mut self, is_visible: bool, now: HostTime) -> Option<ScopeTransition> {
        match (self.state, is_visible) {
            (ScopeState::Hidden, true) => {
                self.state = ScopeState::Visible;
                self.epoch += 1;
                self.visible_since = Some(now);
                if self.replay == Replay::Once {
                    self.frozen = true;
                }
            }
            (ScopeState::Visible, false) if !self.frozen => {
                self.state = ScopeState::Hidden;
                self.visible_since = None;
            }
            _ => return None,
        }
        Some(ScopeTransition {
            state: self.state,
            epoch: self.epoch,
        })
    }

    /// Trigger offset of the child at `index`, or `None` if out of range.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> Option<Duration> {
        (index < self.children).then(|| self.variant.child_delay(index))
    }

    /// Style of the child at `index` at time `now`.
    ///
    /// Hidden scopes and children whose delay has not yet elapsed report the
    /// initial style.
    #[must_use]
    pub fn child_style(&self, index: usize, now: HostTime) -> StyleState {
        let child = self.variant.child();
        match self.child_elapsed(index, now) {
            Some(elapsed) => child.sample(elapsed),
            None => child.initial,
        }
    }

    /// Returns `true` while any child is still moving.
    #[must_use]
    pub fn is_animating(&self, now: HostTime) -> bool {
        if self.state == ScopeState::Hidden || self.children == 0 {
            return false;
        }
        let last = self.children - 1;
        match self.child_elapsed(last, now) {
            Some(elapsed) => !self.variant.child().transition.is_complete(elapsed),
            // Last child has not been triggered yet.
            None => true,
        }
    }

    fn child_elapsed(&self, index: usize, now: HostTime) -> Option<Duration> {
        let since = self.visible_since?;
        let offset = self.child_delay(index)?;
        now.saturating_duration_since(since).checked_sub(offset)
    }
}

/// Owns the scopes of every mounted region.
#[derive(Clone, Debug, Default)]
pub struct AnimationController {
    scopes: BTreeMap<RegionId, AnimationScope>,
}

impl AnimationController {
    /// Creates a controller with no scopes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `scope` to `region`, replacing any previous scope.
    pub fn mount(&mut self, region: RegionId, scope: AnimationScope) {
        self.scopes.insert(region, scope);
    }

    /// Drops the scope for `region`.
    pub fn unmount(&mut self, region: RegionId) -> Option<AnimationScope> {
        self.scopes.remove(&region)
    }

    /// Returns the scope for `region`.
    #[must_use]
    pub fn scope(&self, region: RegionId) -> Option<&AnimationScope> {
        self.scopes.get(&region)
    }

    /// Returns the scope for `region` mutably.
    pub fn scope_mut(&mut self, region: RegionId) -> Option<&mut AnimationScope> {
        self.scopes.get_mut(&region)
    }

    /// Applies visibility changes in order and appends the resulting
    /// transitions to `out`. Changes for unmounted regions are ignored.
    pub fn apply(
        &mut self,
        changes: &[VisibilityChange],
        now: HostTime,
        out: &mut Vec<(RegionId, ScopeTransition)>,
    ) {
        for change in changes {
            if let Some(scope) = self.scopes.get_mut(&change.region)
                && let Some(transition) = scope.set_visible(change.is_visible, now)
            {
                out.push((change.region, transition));
            }
        }
    }

    /// Returns `true` while any scope is still animating, i.e. while the
    /// frame loop should keep requesting frames.
    #[must_use]
    pub fn is_animating(&self, now: HostTime) -> bool {
        self.scopes.values().any(|s| s.is_animating(now))
    }

    /// Number of mounted scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if no scope is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
