//! Transition Controller
//!
//! Animates the corner icon (check or cross) in and out as the status moves
//! into and out of a terminal state.
//!
//! # State Machine
//!
//! ```text
//!   absent ──apply(Some)──▶ entering ──settled──▶ present
//!     ▲                        │                     │
//!     │                        └──apply(other)───────┤
//!     │                                              ▼
//!     └────────────removed─────────────────────── leaving
//! ```
//!
//! There is one incoming slot and one outgoing slot. A status change always
//! supersedes whatever is in flight: the incoming icon (if any) becomes the
//! outgoing one, and an icon that was already leaving is dropped on the spot.
//! Nothing is queued and nothing is debounced.
//!
//! # Gating
//!
//! The first transition of an instance (its mount, or the first transition
//! after [`TransitionController::reset`]) uses the instant profile so that a
//! badge which is already `success` when it appears does not pop in. Every
//! later transition uses the gentle spring unless reduced motion is on.
//!
//! Only entering is eased. A leaving icon always uses the instant profile:
//! it is hidden at once and stays in the tree as an overlay until the next
//! tick, or is removed on the spot when nothing animates.

mod latch;

pub use latch::AnimationLatch;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{Spring, SpringParams, SpringProfile};
use crate::resolver::Glyph;

/// Scale the icon enters from
pub const ENTER_FROM_SCALE: f32 = 1.3;

/// Visibility phase of the icon slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconPhase {
    /// Nothing shown
    Absent,
    /// Animating in
    Entering,
    /// Fully shown, no animation in flight
    Present,
    /// Animating out
    Leaving,
}

/// Transform applied to an icon
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// No transform at all
    Identity,
    /// Uniform scale, never exactly 1.0
    Scale(f32),
}

impl Transform {
    /// Scale transform, or `Identity` for a unit scale
    #[must_use]
    pub fn scale(factor: f32) -> Self {
        if (factor - 1.0).abs() <= f32::EPSILON {
            Self::Identity
        } else {
            Self::Scale(factor)
        }
    }
}

/// How an icon participates in layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconLayout {
    /// Takes up space in the badge
    Flow,
    /// Drawn on top without taking space (leaving icons)
    Overlay,
}

/// One icon as it should be painted this frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconFrame {
    /// Which icon
    pub glyph: Glyph,
    /// Opacity, clamped to 0.0..=1.0
    pub opacity: f32,
    /// Transform to apply
    pub transform: Transform,
    /// Layout participation
    pub layout: IconLayout,
    /// Phase of this icon
    pub phase: IconPhase,
}

/// Observable transition milestones, in the order they happened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionEvent {
    /// An icon started entering
    Enter {
        /// Entering icon
        glyph: Glyph,
        /// Profile used
        profile: SpringProfile,
    },
    /// An icon started leaving
    Leave {
        /// Leaving icon
        glyph: Glyph,
        /// Profile used
        profile: SpringProfile,
    },
    /// The shown icon was replaced by a different one
    Superseded {
        /// Icon being replaced
        outgoing: Glyph,
        /// Icon replacing it
        incoming: Glyph,
    },
    /// An entering icon came to rest; its transform is now identity
    Settled {
        /// Settled icon
        glyph: Glyph,
    },
    /// An icon was removed from the tree
    Removed {
        /// Removed icon
        glyph: Glyph,
    },
}

#[derive(Clone, Debug)]
struct IncomingIcon {
    glyph: Glyph,
    scale: Spring,
    opacity: Spring,
    transform: Transform,
    phase: IconPhase,
}

impl IncomingIcon {
    fn animated(glyph: Glyph, params: SpringParams) -> Self {
        Self {
            glyph,
            scale: Spring::new(ENTER_FROM_SCALE, 1.0, params),
            opacity: Spring::new(0.0, 1.0, params),
            transform: Transform::Scale(ENTER_FROM_SCALE),
            phase: IconPhase::Entering,
        }
    }

    fn settled(glyph: Glyph) -> Self {
        Self {
            glyph,
            scale: Spring::at_rest(1.0),
            opacity: Spring::at_rest(1.0),
            transform: Transform::Identity,
            phase: IconPhase::Present,
        }
    }

    /// Scale reached rest: drop the transform instead of leaving a unit scale.
    fn on_scale_settled(&mut self) {
        self.transform = Transform::Identity;
    }

    /// Post-animation hook, once both springs are at rest
    fn on_settled(&mut self) {
        self.on_scale_settled();
        self.phase = IconPhase::Present;
    }

    fn frame(&self) -> IconFrame {
        IconFrame {
            glyph: self.glyph,
            opacity: self.opacity.value().clamp(0.0, 1.0),
            transform: self.transform,
            layout: IconLayout::Flow,
            phase: self.phase,
        }
    }
}

/// A hidden icon waiting for the next tick to leave the tree
#[derive(Clone, Debug)]
struct OutgoingIcon {
    glyph: Glyph,
}

/// Enter/leave animation state for one badge's icon slot
#[derive(Clone, Debug)]
pub struct TransitionController {
    latch: AnimationLatch,
    reduced_motion: bool,
    params: SpringParams,
    incoming: Option<IncomingIcon>,
    outgoing: Option<OutgoingIcon>,
    events: Vec<TransitionEvent>,
    mounted: bool,
}

impl TransitionController {
    /// Create an unmounted controller
    #[must_use]
    pub fn new(params: SpringParams, reduced_motion: bool) -> Self {
        Self {
            latch: AnimationLatch::new(),
            reduced_motion,
            params,
            incoming: None,
            outgoing: None,
            events: Vec::new(),
            mounted: false,
        }
    }

    /// Mount with the initial icon. This is the instance's first transition.
    pub fn mount(&mut self, glyph: Option<Glyph>) {
        self.mounted = true;
        self.transition_to(glyph);
    }

    /// Show `glyph` (or nothing), superseding anything in flight
    pub fn apply(&mut self, glyph: Option<Glyph>) {
        if !self.mounted {
            self.mount(glyph);
            return;
        }
        if self.current_glyph() == glyph {
            return;
        }
        self.transition_to(glyph);
    }

    /// Drop all animation state and replay `glyph` as a first transition
    pub fn reset(&mut self, glyph: Option<Glyph>) {
        self.clear();
        self.latch = AnimationLatch::new();
        self.mounted = true;
        debug!(?glyph, "transition state reset");
        self.transition_to(glyph);
    }

    /// Remove every icon; the slot ends absent
    pub fn unmount(&mut self) {
        self.clear();
        self.mounted = false;
    }

    /// Advance in-flight springs.
    ///
    /// Returns `true` while something is still animating.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if let Some(incoming) = self.incoming.as_mut() {
            if incoming.phase == IconPhase::Entering {
                incoming.scale.step(delta);
                incoming.opacity.step(delta);

                if incoming.scale.is_settled() {
                    incoming.on_scale_settled();
                } else {
                    incoming.transform = Transform::scale(incoming.scale.value());
                }

                if incoming.scale.is_settled() && incoming.opacity.is_settled() {
                    incoming.on_settled();
                    self.events.push(TransitionEvent::Settled {
                        glyph: incoming.glyph,
                    });
                }
            }
        }

        if let Some(outgoing) = self.outgoing.take() {
            self.events.push(TransitionEvent::Removed {
                glyph: outgoing.glyph,
            });
        }

        self.is_animating()
    }

    /// Turn reduced motion on or off. Turning it on finishes any animation.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if !reduced_motion {
            return;
        }
        if let Some(incoming) = self.incoming.as_mut() {
            if incoming.phase == IconPhase::Entering {
                incoming.scale.settle();
                incoming.opacity.settle();
                incoming.on_settled();
                self.events.push(TransitionEvent::Settled {
                    glyph: incoming.glyph,
                });
            }
        }
        if let Some(outgoing) = self.outgoing.take() {
            self.events.push(TransitionEvent::Removed {
                glyph: outgoing.glyph,
            });
        }
    }

    /// Phase of the icon slot
    #[must_use]
    pub fn phase(&self) -> IconPhase {
        match (&self.incoming, &self.outgoing) {
            (Some(incoming), _) => incoming.phase,
            (None, Some(_)) => IconPhase::Leaving,
            (None, None) => IconPhase::Absent,
        }
    }

    /// Icon that is entering or present
    #[must_use]
    pub fn current_glyph(&self) -> Option<Glyph> {
        self.incoming.as_ref().map(|i| i.glyph)
    }

    /// Icons to paint this frame, bottom-most first
    #[must_use]
    pub fn icons(&self) -> Vec<IconFrame> {
        let mut frames = Vec::with_capacity(2);
        if let Some(outgoing) = &self.outgoing {
            frames.push(IconFrame {
                glyph: outgoing.glyph,
                opacity: 0.0,
                transform: Transform::Identity,
                layout: IconLayout::Overlay,
                phase: IconPhase::Leaving,
            });
        }
        if let Some(incoming) = &self.incoming {
            frames.push(incoming.frame());
        }
        frames
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether any spring is in flight
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.outgoing.is_some()
            || self
                .incoming
                .as_ref()
                .is_some_and(|i| i.phase == IconPhase::Entering)
    }

    /// Whether the next transition would animate
    #[must_use]
    pub fn animation_enabled(&self) -> bool {
        self.latch.is_enabled() && !self.reduced_motion
    }

    /// Whether the controller has been mounted
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn transition_to(&mut self, glyph: Option<Glyph>) {
        let profile = if self.animation_enabled() {
            SpringProfile::Gentle
        } else {
            SpringProfile::Instant
        };
        if self.latch.enable() {
            debug!("animations enabled after first transition");
        }

        // Only one outgoing icon at a time: an older leave is cut short.
        if let Some(stale) = self.outgoing.take() {
            self.events.push(TransitionEvent::Removed { glyph: stale.glyph });
        }

        if let Some(current) = self.incoming.take() {
            if let Some(next) = glyph {
                debug!(outgoing = ?current.glyph, incoming = ?next, "icon superseded");
                self.events.push(TransitionEvent::Superseded {
                    outgoing: current.glyph,
                    incoming: next,
                });
            }
            self.events.push(TransitionEvent::Leave {
                glyph: current.glyph,
                profile: SpringProfile::Instant,
            });
            if profile.animates() {
                self.outgoing = Some(OutgoingIcon {
                    glyph: current.glyph,
                });
            } else {
                self.events.push(TransitionEvent::Removed {
                    glyph: current.glyph,
                });
            }
        }

        if let Some(next) = glyph {
            self.events.push(TransitionEvent::Enter {
                glyph: next,
                profile,
            });
            if profile.animates() {
                self.incoming = Some(IncomingIcon::animated(next, self.params));
            } else {
                self.incoming = Some(IncomingIcon::settled(next));
                self.events.push(TransitionEvent::Settled { glyph: next });
            }
        }
    }

    fn clear(&mut self) {
        if let Some(outgoing) = self.outgoing.take() {
            self.events.push(TransitionEvent::Removed {
                glyph: outgoing.glyph,
            });
        }
        if let Some(incoming) = self.incoming.take() {
            self.events.push(TransitionEvent::Removed {
                glyph: incoming.glyph,
            });
        }
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(SpringParams::GENTLE, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settle(controller: &mut TransitionController) {
        for _ in 0..300 {
            if !controller.tick(Duration::from_millis(16)) {
                return;
            }
        }
        panic!("transition never settled");
    }

    fn mounted(glyph: Option<Glyph>) -> TransitionController {
        let mut controller = TransitionController::default();
        controller.mount(glyph);
        controller.drain_events();
        controller
    }

    #[test]
    fn test_starts_absent() {
        let controller = TransitionController::default();
        assert_eq!(controller.phase(), IconPhase::Absent);
        assert!(!controller.is_mounted());
        assert!(controller.icons().is_empty());
    }

    #[test]
    fn test_mount_with_icon_is_instant() {
        let mut controller = TransitionController::default();
        controller.mount(Some(Glyph::Check));

        assert_eq!(controller.phase(), IconPhase::Present);
        assert_eq!(
            controller.drain_events(),
            vec![
                TransitionEvent::Enter {
                    glyph: Glyph::Check,
                    profile: SpringProfile::Instant
                },
                TransitionEvent::Settled { glyph: Glyph::Check },
            ]
        );
        let icons = controller.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].transform, Transform::Identity);
        assert_eq!(icons[0].opacity, 1.0);
    }

    #[test]
    fn test_mount_without_icon_still_flips_latch() {
        let controller = mounted(None);
        assert!(controller.animation_enabled());
        assert_eq!(controller.phase(), IconPhase::Absent);
    }

    #[test]
    fn test_second_transition_is_gentle() {
        let mut controller = mounted(None);
        controller.apply(Some(Glyph::Check));

        assert_eq!(controller.phase(), IconPhase::Entering);
        assert_eq!(
            controller.drain_events(),
            vec![TransitionEvent::Enter {
                glyph: Glyph::Check,
                profile: SpringProfile::Gentle
            }]
        );
        let icon = controller.icons()[0];
        assert_eq!(icon.transform, Transform::Scale(ENTER_FROM_SCALE));
        assert_eq!(icon.opacity, 0.0);
    }

    #[test]
    fn test_enter_settles_to_identity() {
        let mut controller = mounted(None);
        controller.apply(Some(Glyph::Cross));
        controller.tick(Duration::from_millis(16));
        assert!(matches!(controller.icons()[0].transform, Transform::Scale(_)));

        settle(&mut controller);

        assert_eq!(controller.phase(), IconPhase::Present);
        assert_eq!(controller.icons()[0].transform, Transform::Identity);
        assert!(controller
            .drain_events()
            .contains(&TransitionEvent::Settled { glyph: Glyph::Cross }));
    }

    #[test]
    fn test_leave_is_instant_overlay_removed_next_tick() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(None);

        assert_eq!(controller.phase(), IconPhase::Leaving);
        let icons = controller.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].layout, IconLayout::Overlay);
        assert_eq!(icons[0].opacity, 0.0);

        assert!(!controller.tick(Duration::from_millis(16)));
        assert_eq!(controller.phase(), IconPhase::Absent);
        assert!(controller.icons().is_empty());
        assert_eq!(
            controller.drain_events(),
            vec![
                TransitionEvent::Leave {
                    glyph: Glyph::Check,
                    profile: SpringProfile::Instant
                },
                TransitionEvent::Removed { glyph: Glyph::Check },
            ]
        );
    }

    #[test]
    fn test_swap_is_one_leave_and_one_enter() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(Some(Glyph::Cross));

        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                TransitionEvent::Superseded {
                    outgoing: Glyph::Check,
                    incoming: Glyph::Cross
                },
                TransitionEvent::Leave {
                    glyph: Glyph::Check,
                    profile: SpringProfile::Instant
                },
                TransitionEvent::Enter {
                    glyph: Glyph::Cross,
                    profile: SpringProfile::Gentle
                },
            ]
        );
        assert_eq!(controller.current_glyph(), Some(Glyph::Cross));

        controller.tick(Duration::from_millis(16));
        let icons = controller.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].layout, IconLayout::Flow);

        settle(&mut controller);
        let icons = controller.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].glyph, Glyph::Cross);
    }

    #[test]
    fn test_rapid_flips_keep_one_outgoing() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(Some(Glyph::Cross));
        controller.apply(Some(Glyph::Check));
        controller.apply(Some(Glyph::Cross));

        let icons = controller.icons();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].layout, IconLayout::Overlay);
        assert_eq!(icons[0].glyph, Glyph::Check);
        assert_eq!(icons[1].glyph, Glyph::Cross);

        let removed = controller
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, TransitionEvent::Removed { .. }))
            .count();
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_enter_never_reports_unit_scale() {
        let mut controller = mounted(None);
        controller.apply(Some(Glyph::Check));

        let mut frames = 0;
        while controller.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 300, "transition never settled");
            let icon = controller.icons()[0];
            if let Transform::Scale(scale) = icon.transform {
                assert!(scale != 1.0, "unit scale at frame {frames}");
            }
        }
        assert_eq!(controller.icons()[0].transform, Transform::Identity);
    }

    #[test]
    fn test_scale_rest_clears_transform_before_opacity_rests() {
        let mut controller = mounted(None);
        controller.apply(Some(Glyph::Cross));

        let mut saw_identity_while_entering = false;
        for _ in 0..300 {
            controller.tick(Duration::from_millis(16));
            let icon = controller.icons()[0];
            if icon.phase == IconPhase::Entering && icon.transform == Transform::Identity {
                saw_identity_while_entering = true;
            }
            if icon.phase == IconPhase::Present {
                break;
            }
        }
        assert!(saw_identity_while_entering);
        assert_eq!(controller.phase(), IconPhase::Present);
    }

    #[test]
    fn test_unit_scale_constructor_is_identity() {
        assert_eq!(Transform::scale(1.0), Transform::Identity);
        assert_eq!(Transform::scale(1.2), Transform::Scale(1.2));
    }

    #[test]
    fn test_same_glyph_is_noop() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(Some(Glyph::Check));
        controller.apply(None);
        controller.drain_events();
        controller.apply(None);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_reentering_a_leaving_icon_starts_fresh() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(None);
        controller.apply(Some(Glyph::Check));

        assert_eq!(controller.phase(), IconPhase::Entering);
        assert_eq!(controller.icons().len(), 1);
    }

    #[test]
    fn test_reset_replays_first_transition() {
        let mut controller = mounted(None);
        controller.apply(Some(Glyph::Check));
        controller.reset(Some(Glyph::Cross));

        assert_eq!(controller.phase(), IconPhase::Present);
        let events = controller.drain_events();
        assert!(events.contains(&TransitionEvent::Enter {
            glyph: Glyph::Cross,
            profile: SpringProfile::Instant
        }));

        controller.apply(Some(Glyph::Check));
        assert_eq!(controller.phase(), IconPhase::Entering);
    }

    #[test]
    fn test_reduced_motion_is_always_instant() {
        let mut controller = TransitionController::new(SpringParams::GENTLE, true);
        controller.mount(None);
        controller.apply(Some(Glyph::Check));
        assert_eq!(controller.phase(), IconPhase::Present);
        controller.apply(None);
        assert_eq!(controller.phase(), IconPhase::Absent);
        assert!(!controller.animation_enabled());
    }

    #[test]
    fn test_enabling_reduced_motion_finishes_animations() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(Some(Glyph::Cross));
        controller.set_reduced_motion(true);

        let icons = controller.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].transform, Transform::Identity);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_unmount_ends_absent() {
        let mut controller = mounted(Some(Glyph::Check));
        controller.apply(Some(Glyph::Cross));
        controller.unmount();
        assert_eq!(controller.phase(), IconPhase::Absent);
        assert!(controller.icons().is_empty());
        assert!(!controller.is_mounted());
    }

    #[test]
    fn test_apply_before_mount_mounts() {
        let mut controller = TransitionController::default();
        controller.apply(Some(Glyph::Check));
        assert!(controller.is_mounted());
        assert_eq!(controller.phase(), IconPhase::Present);
    }
}
