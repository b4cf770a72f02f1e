pub mod clamp;
pub mod hit_test;
pub mod state;

pub use clamp::popup_position;
pub use hit_test::{touch_event, HitTest, LayoutHitTest, TouchPhase};
pub use state::{
    reduce, Effect, FocusCallbacks, FocusEvent, FocusMachine, FocusPhase, FocusState,
    ItemDisplay, PendingTimer, TimerAction, TimerId,
};
