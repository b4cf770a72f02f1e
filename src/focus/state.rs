//! Hover / popup state machine.
//!
//! [`reduce`] is a pure function from `(state, event)` to `(state, effects)`.
//! Time only enters through the timestamps carried by events, so the debounce
//! timer is an ordinary field of the state and a host advances it by sending
//! [`FocusEvent::Tick`]. Effects describe the callbacks the host should run
//! after storing the new state.

use super::clamp::popup_position;
use crate::config::FocusConfig;
use crate::layout::ItemPlacement;
use crate::model::Rgba;

/// What a display notification carries: the item, its horizontal insets, and
/// its colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDisplay {
    pub index: usize,
    /// Distance of the item's left edge from the container's left edge, in percent.
    pub left_pct: f64,
    /// Distance of the item's right edge from the container's right edge, in percent.
    pub right_pct: f64,
    pub color: Rgba,
}

impl ItemDisplay {
    /// Midpoint of the item's on-screen extent, in percent.
    pub fn midpoint_pct(&self) -> f64 {
        (self.left_pct + (100.0 - self.right_pct)) / 2.0
    }
}

impl From<&ItemPlacement> for ItemDisplay {
    fn from(p: &ItemPlacement) -> Self {
        Self {
            index: p.index,
            left_pct: p.left_pct,
            right_pct: p.right_pct,
            color: p.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FocusEvent {
    /// Pointer or touch entered an item.
    Enter { target: ItemDisplay, now_ms: u64 },
    /// Pointer or touch left the timeline.
    Leave { now_ms: u64 },
    /// The container was (re)measured.
    Resize { container_width: f32 },
    /// Time advanced; fires the pending timer if it is due.
    Tick { now_ms: u64 },
}

/// A callback the host should invoke.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A popup was confirmed open for this item.
    Display(ItemDisplay),
    /// The displayed item was cleared.
    DisplayCleared,
    /// The pointer or touch left the timeline.
    Left,
}

/// Host-side receivers for [`Effect`]s.
pub trait FocusCallbacks {
    /// `None` is the "no item" notification.
    fn item_displayed(&mut self, display: Option<&ItemDisplay>);
    fn left(&mut self);
}

impl Effect {
    pub fn apply<C: FocusCallbacks + ?Sized>(&self, callbacks: &mut C) {
        match self {
            Self::Display(display) => callbacks.item_displayed(Some(display)),
            Self::DisplayCleared => callbacks.item_displayed(None),
            Self::Left => callbacks.left(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    Open(ItemDisplay),
    Clear,
}

/// The single outstanding debounce timer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub deadline_ms: u64,
    pub action: TimerAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    /// Nothing hovered, nothing pending.
    Idle,
    /// An item is hovered but its popup is not confirmed yet.
    Hovering,
    /// The popup is open on the displayed item.
    Popped,
    /// The pointer left; the displayed item is about to be cleared.
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusState {
    /// Updated immediately on enter, for cheap highlight feedback.
    pub hovered: Option<usize>,
    pub hovered_color: Option<Rgba>,
    /// Item backing the popup. Only changes once the debounce settles.
    pub displayed: Option<usize>,
    /// Whether the popup surface exists (possibly closed).
    pub primed: bool,
    pub open: bool,
    /// Where the arrow points, in percent. Never clamped.
    pub arrow_pos: f64,
    /// Where the popup body is centred, in percent, clamped to the container.
    pub popup_pos: f64,
    /// Last measured container width in pixels; `0.0` until measured.
    pub container_width: f32,
    pending: Option<PendingTimer>,
    next_timer: u64,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            hovered: None,
            hovered_color: None,
            displayed: None,
            primed: false,
            open: false,
            arrow_pos: 50.0,
            popup_pos: 50.0,
            container_width: 0.0,
            pending: None,
            next_timer: 0,
        }
    }
}

impl FocusState {
    pub fn pending(&self) -> Option<&PendingTimer> {
        self.pending.as_ref()
    }

    /// When the host should next send a tick, if anything is pending.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|t| t.deadline_ms)
    }

    pub fn phase(&self) -> FocusPhase {
        match (&self.pending, self.hovered) {
            (Some(PendingTimer { action: TimerAction::Clear, .. }), _) => FocusPhase::Closing,
            _ if self.open && self.displayed.is_some() => FocusPhase::Popped,
            (_, Some(_)) => FocusPhase::Hovering,
            _ => FocusPhase::Idle,
        }
    }

    /// Replace any pending timer with a new one.
    fn arm(&mut self, deadline_ms: u64, action: TimerAction) {
        self.cancel_timer();
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.pending = Some(PendingTimer {
            id,
            deadline_ms,
            action,
        });
    }

    /// No-op when nothing is pending.
    fn cancel_timer(&mut self) -> Option<PendingTimer> {
        self.pending.take()
    }

    fn open_now(&mut self, target: ItemDisplay, config: &FocusConfig, effects: &mut Vec<Effect>) {
        self.displayed = Some(target.index);
        self.primed = true;
        self.arrow_pos = target.midpoint_pct();
        self.popup_pos = popup_position(self.arrow_pos, self.container_width, config.popup_width);
        self.open = true;
        effects.push(Effect::Display(target));
    }

    fn clear_now(&mut self, effects: &mut Vec<Effect>) {
        self.displayed = None;
        self.primed = false;
        self.open = false;
        effects.push(Effect::DisplayCleared);
    }
}

fn debounced(config: &FocusConfig) -> bool {
    config.popup_enabled && config.popup_delay_ms > 0
}

/// Apply one event.
pub fn reduce(
    config: &FocusConfig,
    mut state: FocusState,
    event: FocusEvent,
) -> (FocusState, Vec<Effect>) {
    let mut effects = Vec::new();
    match event {
        FocusEvent::Enter { target, now_ms } => {
            if !config.interactive || state.hovered == Some(target.index) {
                return (state, effects);
            }
            state.hovered = Some(target.index);
            state.hovered_color = Some(target.color);
            if debounced(config) {
                // First hover mounts the popup closed; it still waits out the delay.
                state.primed = true;
                state.open = false;
                state.arm(
                    now_ms.saturating_add(config.popup_delay_ms),
                    TimerAction::Open(target),
                );
            } else {
                state.cancel_timer();
                state.open_now(target, config, &mut effects);
            }
        }
        FocusEvent::Leave { now_ms } => {
            if !config.interactive {
                return (state, effects);
            }
            state.hovered = None;
            state.hovered_color = None;
            state.open = false;
            if debounced(config) {
                state.arm(
                    now_ms.saturating_add(config.popup_delay_ms),
                    TimerAction::Clear,
                );
            } else {
                state.cancel_timer();
                state.clear_now(&mut effects);
            }
            effects.push(Effect::Left);
        }
        FocusEvent::Resize { container_width } => {
            state.container_width = container_width;
            state.popup_pos = popup_position(state.arrow_pos, container_width, config.popup_width);
        }
        FocusEvent::Tick { now_ms } => {
            let due = state
                .pending
                .as_ref()
                .is_some_and(|timer| timer.deadline_ms <= now_ms);
            if due {
                if let Some(timer) = state.cancel_timer() {
                    match timer.action {
                        TimerAction::Open(target) => state.open_now(target, config, &mut effects),
                        TimerAction::Clear => state.clear_now(&mut effects),
                    }
                }
            }
        }
    }
    (state, effects)
}

/// Owns a [`FocusState`] and its config.
#[derive(Debug, Clone, Default)]
pub struct FocusMachine {
    config: FocusConfig,
    state: FocusState,
}

impl FocusMachine {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            state: FocusState::default(),
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Swap the config. The popup is re-clamped against the new width.
    pub fn set_config(&mut self, config: FocusConfig) {
        self.config = config;
        let width = self.state.container_width;
        self.handle(FocusEvent::Resize {
            container_width: width,
        });
    }

    pub fn handle(&mut self, event: FocusEvent) -> Vec<Effect> {
        let before = self.state.phase();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = reduce(&self.config, state, event);
        self.state = state;
        let after = self.state.phase();
        if before != after {
            tracing::debug!(?before, ?after, hovered = ?self.state.hovered, displayed = ?self.state.displayed, "focus transition");
        }
        effects
    }

    pub fn enter(&mut self, target: ItemDisplay, now_ms: u64) -> Vec<Effect> {
        self.handle(FocusEvent::Enter { target, now_ms })
    }

    pub fn leave(&mut self, now_ms: u64) -> Vec<Effect> {
        self.handle(FocusEvent::Leave { now_ms })
    }

    pub fn resize(&mut self, container_width: f32) -> Vec<Effect> {
        self.handle(FocusEvent::Resize { container_width })
    }

    pub fn tick(&mut self, now_ms: u64) -> Vec<Effect> {
        self.handle(FocusEvent::Tick { now_ms })
    }

    /// Drop all focus, e.g. when the item list is replaced. No callbacks fire.
    pub fn reset(&mut self) {
        let width = self.state.container_width;
        self.state = FocusState {
            container_width: width,
            ..FocusState::default()
        };
    }
}
