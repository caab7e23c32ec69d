//! Mode state machine and the rotation/gesture → action table.

use heapless::Vec;

use super::encoder::Rotation;
use super::gesture::Gesture;

/// What the knob's rotation currently controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Volume,
    Scroll,
}

impl Mode {
    /// Text shown on the display for this mode.
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Volume => "VOLUME",
            Mode::Scroll => "SCROLL",
        }
    }

    /// The only mode transition. Called for `Gesture::LongPress` alone.
    fn on_long_press(&mut self) -> ModeChange {
        *self = match self {
            Mode::Volume => Mode::Scroll,
            Mode::Scroll => Mode::Volume,
        };
        ModeChange::new(*self)
    }
}

/// Semantic user intent, translated to a host code by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    VolumeUp,
    VolumeDown,
    ScrollUp,
    ScrollDown,
    Play,
    Next,
    Previous,
}

/// Emitted on the tick the mode flips. The display replaces its contents
/// with `label`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeChange {
    pub mode: Mode,
    pub label: &'static str,
}

impl ModeChange {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            label: mode.label(),
        }
    }
}

/// Actions for one tick: rotation-derived first, then gesture-derived.
pub type Actions = Vec<Action, 2>;

/// Everything one tick produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub actions: Actions,
    pub mode_change: Option<ModeChange>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.mode_change.is_none()
    }
}

fn rotation_action(rotation: Rotation, mode: Mode) -> Action {
    match (mode, rotation) {
        (Mode::Volume, Rotation::Clockwise) => Action::VolumeUp,
        (Mode::Volume, Rotation::CounterClockwise) => Action::VolumeDown,
        (Mode::Scroll, Rotation::Clockwise) => Action::ScrollUp,
        (Mode::Scroll, Rotation::CounterClockwise) => Action::ScrollDown,
    }
}

fn click_action(count: u8) -> Option<Action> {
    match count {
        1 => Some(Action::Play),
        2 => Some(Action::Next),
        3 => Some(Action::Previous),
        _ => None,
    }
}

/// Map one tick's rotation and gesture to actions, toggling `mode` on a
/// long-press.
///
/// The rotation is resolved against the mode as it was at the start of the
/// tick.
pub fn resolve(
    rotation: Option<Rotation>,
    gesture: Option<Gesture>,
    mode: &mut Mode,
) -> Resolution {
    let mut resolution = Resolution::default();

    if let Some(rotation) = rotation {
        // Capacity 2, at most two pushes per call.
        let _ = resolution.actions.push(rotation_action(rotation, *mode));
    }

    match gesture {
        Some(Gesture::Click(count)) => {
            if let Some(action) = click_action(count) {
                let _ = resolution.actions.push(action);
            }
        }
        Some(Gesture::LongPress) => {
            resolution.mode_change = Some(mode.on_long_press());
        }
        None => {}
    }

    resolution
}

/// Owns the process-wide [`Mode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Resolver {
    mode: Mode,
}

impl Resolver {
    pub const fn new() -> Self {
        Self { mode: Mode::Volume }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn resolve(&mut self, rotation: Option<Rotation>, gesture: Option<Gesture>) -> Resolution {
        resolve(rotation, gesture, &mut self.mode)
    }
}
