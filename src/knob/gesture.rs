//! Push-button gesture classification.
//!
//! The classifier is fed the button level once per tick and turns the
//! press/release history into clicks (1-3 taps) or a long-press. It keeps:
//!
//! - a hold timer, armed on the first pressed sample and cleared on release
//!   or when a long-press fires
//! - the release timestamps of the current tap group (at most three)
//! - a cooldown deadline after a long-press, during which the button is
//!   ignored so the trailing release is not read as a tap
//!
//! A hold that produced a long-press is *consumed*: the button must be seen
//! released before a new hold can start.

use heapless::Vec;

use crate::config::KnobConfig;

/// Largest tap count that maps to a gesture.
pub const MAX_CLICKS: usize = 3;

/// A classified button gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// `n` taps inside one gesture window (1..=3).
    Click(u8),
    /// Button held for at least the long-press threshold.
    LongPress,
}

/// When a tap group turns into a `Click`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickPolicy {
    /// Wait until the first release of the group is one window old, then
    /// report the number of taps collected. Double and triple clicks work,
    /// a single click costs one window of latency.
    #[default]
    Windowed,
    /// Report `Click(1)` on the very tick of the release. Lowest latency,
    /// but multi-tap gestures are never produced.
    Optimistic,
}

/// Classifier thresholds (ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureTiming {
    pub window_ms: u64,
    pub long_press_ms: u64,
    pub cooldown_ms: u64,
}

impl From<&KnobConfig> for GestureTiming {
    fn from(config: &KnobConfig) -> Self {
        Self {
            window_ms: config.gesture_window_ms,
            long_press_ms: config.long_press_ms,
            cooldown_ms: config.click_cooldown_ms,
        }
    }
}

/// Mutable accumulator threaded through every [`classify`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Release timestamps of the open tap group, oldest first.
    pub press_history: Vec<u64, MAX_CLICKS>,
    /// Tick the current hold started on.
    pub hold_start: Option<u64>,
    /// The current hold already fired a long-press.
    pub hold_consumed: bool,
    /// Button input is ignored until this tick.
    pub cooldown_until: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Classifier {
    timing: GestureTiming,
    policy: ClickPolicy,
    state: ClassifierState,
}

impl Classifier {
    pub fn new(timing: GestureTiming, policy: ClickPolicy) -> Self {
        Self {
            timing,
            policy,
            state: ClassifierState::default(),
        }
    }

    pub fn from_config(config: &KnobConfig) -> Self {
        Self::new(GestureTiming::from(config), config.click_policy)
    }

    /// Feed one tick's button level. Returns at most one gesture.
    pub fn classify(&mut self, pressed: bool, now_ms: u64) -> Option<Gesture> {
        classify(pressed, now_ms, &self.timing, self.policy, &mut self.state)
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn is_cooling_down(&self, now_ms: u64) -> bool {
        self.state.cooldown_until.is_some_and(|until| now_ms < until)
    }
}

/// Classify one tick's button level against the accumulated `state`.
///
/// At most one gesture is returned per call. Under [`ClickPolicy::Windowed`]
/// a tap group is reported once its first release is `window_ms` old, and
/// never while the button is held.
pub fn classify(
    pressed: bool,
    now_ms: u64,
    timing: &GestureTiming,
    policy: ClickPolicy,
    state: &mut ClassifierState,
) -> Option<Gesture> {
    if cooling_down(state, pressed, now_ms) {
        return None;
    }

    if pressed {
        if !state.hold_consumed {
            let start = *state.hold_start.get_or_insert(now_ms);
            if now_ms.saturating_sub(start) >= timing.long_press_ms {
                return Some(fire_long_press(state, timing, now_ms));
            }
        }
        // A hold in progress may still turn into a long-press that
        // swallows the pending taps.
        return None;
    }

    state.hold_consumed = false;
    if state.hold_start.take().is_some() {
        return record_release(state, timing, policy, now_ms);
    }

    match policy {
        ClickPolicy::Windowed => settle_expired(state, timing, now_ms),
        ClickPolicy::Optimistic => None,
    }
}

fn cooling_down(state: &mut ClassifierState, pressed: bool, now_ms: u64) -> bool {
    let Some(until) = state.cooldown_until else {
        return false;
    };
    if !pressed {
        state.hold_consumed = false;
    }
    if now_ms < until {
        return true;
    }
    state.cooldown_until = None;
    false
}

fn fire_long_press(state: &mut ClassifierState, timing: &GestureTiming, now_ms: u64) -> Gesture {
    state.hold_start = None;
    state.hold_consumed = true;
    state.press_history.clear();
    state.cooldown_until = Some(now_ms.saturating_add(timing.cooldown_ms));
    Gesture::LongPress
}

/// Handle the end of a hold. Optimistic clicks fire here and never enter
/// the history; in windowed mode a group that expired while the button was
/// held is settled first and returned.
fn record_release(
    state: &mut ClassifierState,
    timing: &GestureTiming,
    policy: ClickPolicy,
    now_ms: u64,
) -> Option<Gesture> {
    if policy == ClickPolicy::Optimistic {
        return Some(Gesture::Click(1));
    }

    let settled = settle_expired(state, timing, now_ms);
    if state.press_history.push(now_ms).is_err() {
        // Fourth tap inside one window: not a gesture, start over.
        #[cfg(feature = "defmt")]
        defmt::debug!("Knob: dropping tap group at {} ms", now_ms);
        state.press_history.clear();
    }
    settled
}

fn settle_expired(
    state: &mut ClassifierState,
    timing: &GestureTiming,
    now_ms: u64,
) -> Option<Gesture> {
    let first = *state.press_history.first()?;
    if now_ms.saturating_sub(first) < timing.window_ms {
        return None;
    }
    let count = state.press_history.len() as u8;
    state.press_history.clear();
    Some(Gesture::Click(count))
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&KnobConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: u64 = 5;

    /// Hold the button at `pressed` for ticks in `[from, to)`.
    fn drive(
        classifier: &mut Classifier,
        pressed: bool,
        from: u64,
        to: u64,
        out: &mut std::vec::Vec<(u64, Gesture)>,
    ) {
        let mut now = from;
        while now < to {
            if let Some(gesture) = classifier.classify(pressed, now) {
                out.push((now, gesture));
            }
            now += STEP;
        }
    }

    /// Press at `release - 40`, release at `release`, stay released until `until`.
    fn tap(
        classifier: &mut Classifier,
        release: u64,
        until: u64,
        out: &mut std::vec::Vec<(u64, Gesture)>,
    ) {
        drive(classifier, true, release - 40, release, out);
        drive(classifier, false, release, until, out);
    }

    fn optimistic() -> Classifier {
        Classifier::from_config(&KnobConfig {
            click_policy: ClickPolicy::Optimistic,
            ..KnobConfig::DEFAULT
        })
    }

    #[test]
    fn single_tap_settles_after_window() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 2000, &mut out);
        assert_eq!(out, [(550, Gesture::Click(1))]);
        assert!(c.state().press_history.is_empty());
    }

    #[test]
    fn two_taps_in_window_are_a_double_click() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 200, &mut out);
        tap(&mut c, 350, 2000, &mut out);
        assert_eq!(out, [(550, Gesture::Click(2))]);
        assert!(c.state().press_history.is_empty());
    }

    #[test]
    fn three_taps_in_window_are_a_triple_click() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 150, &mut out);
        tap(&mut c, 200, 300, &mut out);
        tap(&mut c, 400, 2000, &mut out);
        assert_eq!(out, [(550, Gesture::Click(3))]);
    }

    #[test]
    fn taps_a_window_apart_are_independent() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 610, &mut out);
        tap(&mut c, 650, 2000, &mut out);
        assert_eq!(out, [(550, Gesture::Click(1)), (1150, Gesture::Click(1))]);
    }

    #[test]
    fn fourth_tap_in_window_drops_the_group() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 100, &mut out);
        tap(&mut c, 150, 200, &mut out);
        tap(&mut c, 250, 300, &mut out);
        tap(&mut c, 350, 2000, &mut out);
        assert!(out.is_empty());
        assert!(c.state().press_history.is_empty());
    }

    #[test]
    fn taps_after_a_dropped_group_start_fresh() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 100, &mut out);
        tap(&mut c, 150, 200, &mut out);
        tap(&mut c, 250, 300, &mut out);
        tap(&mut c, 350, 1000, &mut out);
        tap(&mut c, 1050, 3000, &mut out);
        assert_eq!(out, [(1550, Gesture::Click(1))]);
    }

    #[test]
    fn long_press_fires_once_at_threshold() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        drive(&mut c, true, 0, 3200, &mut out);
        drive(&mut c, false, 3200, 6000, &mut out);
        assert_eq!(out, [(3000, Gesture::LongPress)]);
        assert_eq!(c.state().hold_start, None);
    }

    #[test]
    fn very_long_hold_fires_only_once() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        drive(&mut c, true, 0, 10_000, &mut out);
        drive(&mut c, false, 10_000, 12_000, &mut out);
        assert_eq!(out, [(3000, Gesture::LongPress)]);
    }

    #[test]
    fn long_press_swallows_pending_taps() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 150, &mut out);
        tap(&mut c, 200, 250, &mut out);
        drive(&mut c, true, 250, 3400, &mut out);
        drive(&mut c, false, 3400, 6000, &mut out);
        assert_eq!(out, [(3250, Gesture::LongPress)]);
        assert!(c.state().press_history.is_empty());
    }

    #[test]
    fn taps_during_cooldown_are_ignored() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        drive(&mut c, true, 0, 3100, &mut out);
        drive(&mut c, false, 3100, 3200, &mut out);
        assert!(c.is_cooling_down(3200));
        tap(&mut c, 3250, 4000, &mut out);
        assert!(!c.is_cooling_down(4000));
        tap(&mut c, 4050, 6000, &mut out);
        assert_eq!(out, [(3000, Gesture::LongPress), (4550, Gesture::Click(1))]);
    }

    #[test]
    fn release_of_consumed_hold_is_not_a_tap_even_without_cooldown() {
        let mut c = Classifier::from_config(&KnobConfig {
            click_cooldown_ms: 0,
            ..KnobConfig::DEFAULT
        });
        let mut out = std::vec::Vec::new();
        drive(&mut c, true, 0, 4000, &mut out);
        drive(&mut c, false, 4000, 6000, &mut out);
        assert_eq!(out, [(3000, Gesture::LongPress)]);
    }

    #[test]
    fn release_after_expired_group_settles_old_group_first() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 300, &mut out);
        // Still holding when the first group's window runs out.
        drive(&mut c, true, 300, 700, &mut out);
        drive(&mut c, false, 700, 2000, &mut out);
        assert_eq!(out, [(700, Gesture::Click(1)), (1200, Gesture::Click(1))]);
    }

    #[test]
    fn idle_button_never_produces_gestures() {
        let mut c = Classifier::default();
        let mut out = std::vec::Vec::new();
        drive(&mut c, false, 0, 20_000, &mut out);
        assert!(out.is_empty());
        assert_eq!(c.state(), &ClassifierState::default());
    }

    #[test]
    fn optimistic_policy_clicks_on_release() {
        let mut c = optimistic();
        let mut out = std::vec::Vec::new();
        tap(&mut c, 50, 200, &mut out);
        tap(&mut c, 250, 1000, &mut out);
        assert_eq!(out, [(50, Gesture::Click(1)), (250, Gesture::Click(1))]);
    }

    #[test]
    fn optimistic_policy_still_detects_long_press() {
        let mut c = optimistic();
        let mut out = std::vec::Vec::new();
        drive(&mut c, true, 0, 3500, &mut out);
        drive(&mut c, false, 3500, 5000, &mut out);
        assert_eq!(out, [(3000, Gesture::LongPress)]);
    }

    #[test]
    fn optimistic_release_leaves_no_history() {
        let mut c = optimistic();
        assert_eq!(c.classify(true, 0), None);
        assert_eq!(c.classify(false, 40), Some(Gesture::Click(1)));
        assert!(c.state().press_history.is_empty());
        assert_eq!(c.classify(false, 45), None);
    }

    #[test]
    fn free_classify_threads_caller_state() {
        let timing = GestureTiming::from(&KnobConfig::DEFAULT);
        let mut state = ClassifierState::default();
        let mut out = std::vec::Vec::new();
        for (now, pressed) in [(0, true), (20, false), (250, true), (301, false)] {
            if let Some(g) = classify(pressed, now, &timing, ClickPolicy::Windowed, &mut state) {
                out.push((now, g));
            }
        }
        assert_eq!(state.press_history.as_slice(), &[20, 301]);
        for now in 302..1000 {
            if let Some(g) = classify(false, now, &timing, ClickPolicy::Windowed, &mut state) {
                out.push((now, g));
            }
        }
        assert_eq!(out, [(520, Gesture::Click(2))]);
        assert_eq!(state, ClassifierState::default());
    }

    #[test]
    fn hold_start_is_set_while_pressed_only() {
        let mut c = Classifier::default();
        assert_eq!(c.classify(true, 10), None);
        assert_eq!(c.state().hold_start, Some(10));
        assert_eq!(c.classify(true, 20), None);
        assert_eq!(c.state().hold_start, Some(10));
        assert_eq!(c.classify(false, 30), None);
        assert_eq!(c.state().hold_start, None);
        assert_eq!(c.state().press_history.as_slice(), &[30]);
    }
}
