//! Two-valued state with a crossfade countdown.
//!
//! A transition runs in two halves of `max_transition` seconds each: the
//! old state fades out while `current != next`, then `current` is committed
//! and the new state fades in. Logic only acts on a settled state.

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionState<S> {
    current: S,
    next: S,
    /// Seconds remaining in the running half.
    transition: f32,
    max_transition: f32,
}

impl<S: Copy + PartialEq> TransitionState<S> {
    /// Settled into `initial` with no countdown.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            next: initial,
            transition: 0.0,
            max_transition: 0.0,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    /// The requested target; equals `current` once committed.
    pub fn next(&self) -> S {
        self.next
    }

    /// Request entry into `to`, crossfading over `duration` seconds in total.
    ///
    /// Redundant requests (already current, or already pending) are ignored
    /// and return `false`.
    pub fn request(&mut self, to: S, duration: f32) -> bool {
        if self.current == to || self.next == to {
            return false;
        }
        self.next = to;
        self.max_transition = (duration * 0.5).max(0.0);
        self.transition = self.max_transition;
        true
    }

    /// Advance the countdown. Commits a pending state once its exit half
    /// has run out, then starts the entry half.
    pub fn tick(&mut self, dt: f32) {
        if self.current != self.next && self.transition <= 0.0 {
            self.current = self.next;
            self.transition = self.max_transition;
        }
        self.transition = (self.transition - dt).max(0.0);
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.next && self.transition <= 0.0
    }

    /// Settled in exactly `state`.
    pub fn is_settled_in(&self, state: S) -> bool {
        self.is_settled() && self.current == state
    }

    /// Activeness of `current` in `[0, 1]`: rising while it fades in,
    /// falling while it fades out toward a pending `next`.
    pub fn progress(&self) -> f32 {
        if self.max_transition <= 0.0 {
            return 1.0;
        }
        let t = (self.transition / self.max_transition).clamp(0.0, 1.0);
        if self.current == self.next { 1.0 - t } else { t }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Light {
        Off,
        On,
        Blinking,
    }

    #[test]
    fn starts_settled() {
        let ts = TransitionState::new(Light::Off);
        assert!(ts.is_settled());
        assert!(ts.is_settled_in(Light::Off));
        assert_eq!(ts.progress(), 1.0);
    }

    #[test]
    fn request_is_idempotent() {
        let mut ts = TransitionState::new(Light::Off);
        assert!(!ts.request(Light::Off, 1.0));
        assert!(ts.request(Light::On, 1.0));
        assert!(!ts.request(Light::On, 4.0));
        assert_eq!(ts.next(), Light::On);
        assert_eq!(ts.max_transition, 0.5);
    }

    #[test]
    fn exit_then_entry_halves() {
        let mut ts = TransitionState::new(Light::Off);
        ts.request(Light::On, 1.0);
        assert!(!ts.is_settled());

        ts.tick(0.25);
        assert_eq!(ts.current(), Light::Off);
        assert_eq!(ts.progress(), 0.5);

        ts.tick(0.25);
        assert_eq!(ts.current(), Light::Off); // exit half just ran out

        ts.tick(0.25); // commit, then entry half starts counting
        assert_eq!(ts.current(), Light::On);
        assert!(!ts.is_settled());
        assert_eq!(ts.progress(), 0.5);

        ts.tick(0.25);
        assert!(ts.is_settled_in(Light::On));
        assert_eq!(ts.progress(), 1.0);
    }

    #[test]
    fn zero_duration_commits_on_next_tick() {
        let mut ts = TransitionState::new(Light::Off);
        ts.request(Light::Blinking, 0.0);
        assert!(!ts.is_settled());
        assert_eq!(ts.progress(), 1.0);
        ts.tick(0.0);
        assert!(ts.is_settled_in(Light::Blinking));
    }

    #[test]
    fn retarget_while_pending() {
        let mut ts = TransitionState::new(Light::Off);
        ts.request(Light::On, 1.0);
        ts.tick(0.125);
        assert!(ts.request(Light::Blinking, 1.0));
        assert_eq!(ts.next(), Light::Blinking);
        for _ in 0..8 {
            ts.tick(0.25);
        }
        assert!(ts.is_settled_in(Light::Blinking));
    }

    #[test]
    fn countdown_never_negative() {
        let mut ts = TransitionState::new(Light::Off);
        ts.request(Light::On, 0.5);
        ts.tick(10.0);
        assert_eq!(ts.transition, 0.0);
    }
}
