//! Combination lock state machine.

use crate::events::Hook;

/// Digits in a combination unless configured otherwise.
pub const DEFAULT_COMBO_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

/// Result of a single digit press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The buffer was already full; the press was dropped.
    Ignored,
    /// Digit stored; the buffer now holds this many digits.
    Buffered(usize),
    /// A full sequence did not match. Buffer cleared.
    Rejected,
    /// A full sequence matched while the lock was already open. Buffer cleared.
    Accepted,
    /// A full sequence matched and the lock opened.
    Unlocked,
    /// Reset mode: the sequence became the new combination and the lock closed.
    Rekeyed,
}

/// A combination lock driven by button-index presses.
///
/// Digits accumulate until the buffer holds as many digits as the
/// combination, then the sequence is evaluated and the buffer cleared. Only
/// an exact full-sequence match unlocks. A resettable lock arms reset mode
/// right after unlocking, so the next complete sequence becomes the new
/// combination and the lock closes again.
///
/// Digits are not range-checked; the button set defines the valid domain.
#[derive(Debug)]
pub struct ComboLock {
    target: Vec<usize>,
    buffer: Vec<usize>,
    state: LockState,
    resettable: bool,
    pending_reset: bool,
    unlock_action: Hook,
    lock_action: Hook,
}

impl ComboLock {
    /// A locked lock expecting `target`.
    pub fn new(target: Vec<usize>, resettable: bool) -> Self {
        let capacity = target.len();
        Self {
            target,
            buffer: Vec::with_capacity(capacity),
            state: LockState::Locked,
            resettable,
            pending_reset: false,
            unlock_action: Hook::new(),
            lock_action: Hook::new(),
        }
    }

    /// Reinitialize with a new combination. Subscribers are kept, and an
    /// unlocked lock fires its lock hook as it closes.
    pub fn initialize(&mut self, target: Vec<usize>, resettable: bool) {
        self.target = target;
        self.buffer.clear();
        self.resettable = resettable;
        self.pending_reset = false;
        self.transition(LockState::Locked);
    }

    /// Observe transitions into [`LockState::Unlocked`].
    pub fn on_unlock(&mut self, observer: impl FnMut() + 'static) {
        self.unlock_action.subscribe(observer);
    }

    /// Observe transitions into [`LockState::Locked`].
    pub fn on_lock(&mut self, observer: impl FnMut() + 'static) {
        self.lock_action.subscribe(observer);
    }

    /// Current lock state.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Whether the lock is closed.
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// The combination that unlocks.
    pub fn target(&self) -> &[usize] {
        &self.target
    }

    /// Digits entered since the last evaluation.
    pub fn input(&self) -> &[usize] {
        &self.buffer
    }

    /// Number of digits in the combination.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the combination has no digits.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Whether the next complete sequence will rekey the lock.
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Feed one digit.
    pub fn on_button_pressed(&mut self, index: usize) -> PressOutcome {
        if self.buffer.len() >= self.target.len() {
            return PressOutcome::Ignored;
        }
        self.buffer.push(index);
        if self.buffer.len() == self.target.len() {
            self.evaluate()
        } else {
            PressOutcome::Buffered(self.buffer.len())
        }
    }

    fn evaluate(&mut self) -> PressOutcome {
        if self.pending_reset {
            self.pending_reset = false;
            self.target = std::mem::take(&mut self.buffer);
            self.buffer.reserve(self.target.len());
            log::info!("combination rekeyed, lock re-armed");
            self.transition(LockState::Locked);
            return PressOutcome::Rekeyed;
        }

        let matches = self
            .buffer
            .iter()
            .zip(&self.target)
            .filter(|(entered, expected)| entered == expected)
            .count();
        self.buffer.clear();

        if matches != self.target.len() {
            log::debug!("combination mismatch ({} of {} digits)", matches, self.target.len());
            return PressOutcome::Rejected;
        }

        let opened = self.transition(LockState::Unlocked);
        if self.resettable {
            self.pending_reset = true;
        }
        if opened {
            PressOutcome::Unlocked
        } else {
            PressOutcome::Accepted
        }
    }

    /// Move to `next`, firing its hook only if the state actually changed.
    fn transition(&mut self, next: LockState) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        match next {
            LockState::Unlocked => {
                log::info!("combination lock unlocked");
                self.unlock_action.emit();
            }
            LockState::Locked => {
                log::info!("combination lock locked");
                self.lock_action.emit();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(lock: &mut ComboLock) -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let unlocks = Rc::new(Cell::new(0));
        let locks = Rc::new(Cell::new(0));
        let u = Rc::clone(&unlocks);
        lock.on_unlock(move || u.set(u.get() + 1));
        let l = Rc::clone(&locks);
        lock.on_lock(move || l.set(l.get() + 1));
        (unlocks, locks)
    }

    fn enter(lock: &mut ComboLock, digits: &[usize]) -> PressOutcome {
        let mut last = PressOutcome::Ignored;
        for &d in digits {
            last = lock.on_button_pressed(d);
        }
        last
    }

    #[test]
    fn test_correct_combo_unlocks() {
        let mut lock = ComboLock::new(vec![1, 2, 3], false);
        let (unlocks, locks) = counted(&mut lock);
        assert_eq!(lock.on_button_pressed(1), PressOutcome::Buffered(1));
        assert_eq!(lock.on_button_pressed(2), PressOutcome::Buffered(2));
        assert_eq!(lock.on_button_pressed(3), PressOutcome::Unlocked);
        assert_eq!(lock.state(), LockState::Unlocked);
        assert_eq!(unlocks.get(), 1);
        assert_eq!(locks.get(), 0);
        assert!(lock.input().is_empty());
    }

    #[test]
    fn test_wrong_combo_stays_locked() {
        let mut lock = ComboLock::new(vec![1, 2, 3], false);
        let (unlocks, _) = counted(&mut lock);
        assert_eq!(enter(&mut lock, &[1, 2, 4]), PressOutcome::Rejected);
        assert!(lock.is_locked());
        assert!(lock.input().is_empty());
        assert_eq!(unlocks.get(), 0);
    }

    #[test]
    fn test_permutation_does_not_unlock() {
        let mut lock = ComboLock::new(vec![1, 2, 3], false);
        assert_eq!(enter(&mut lock, &[3, 2, 1]), PressOutcome::Rejected);
        assert!(lock.is_locked());
    }

    #[test]
    fn test_matching_again_while_unlocked_does_not_refire() {
        let mut lock = ComboLock::new(vec![0, 0, 0], false);
        let (unlocks, _) = counted(&mut lock);
        enter(&mut lock, &[0, 0, 0]);
        assert_eq!(enter(&mut lock, &[0, 0, 0]), PressOutcome::Accepted);
        assert_eq!(unlocks.get(), 1);
        assert_eq!(lock.state(), LockState::Unlocked);
    }

    #[test]
    fn test_mismatch_while_unlocked_keeps_state() {
        let mut lock = ComboLock::new(vec![5, 5, 5], false);
        enter(&mut lock, &[5, 5, 5]);
        assert_eq!(enter(&mut lock, &[1, 1, 1]), PressOutcome::Rejected);
        assert_eq!(lock.state(), LockState::Unlocked);
    }

    #[test]
    fn test_reset_scenario() {
        let mut lock = ComboLock::new(vec![1, 2, 3], true);
        let (unlocks, locks) = counted(&mut lock);

        assert_eq!(enter(&mut lock, &[1, 2, 3]), PressOutcome::Unlocked);
        assert!(lock.pending_reset());
        assert!(lock.input().is_empty());

        assert_eq!(enter(&mut lock, &[4, 4, 4]), PressOutcome::Rekeyed);
        assert_eq!(lock.target(), &[4, 4, 4]);
        assert!(lock.is_locked());
        assert!(!lock.pending_reset());
        assert_eq!(locks.get(), 1);

        assert_eq!(enter(&mut lock, &[1, 2, 3]), PressOutcome::Rejected);
        assert!(lock.is_locked());

        assert_eq!(enter(&mut lock, &[4, 4, 4]), PressOutcome::Unlocked);
        assert_eq!(unlocks.get(), 2);
    }

    #[test]
    fn test_initialize_rearms() {
        let mut lock = ComboLock::new(vec![1, 2], true);
        let (unlocks, locks) = counted(&mut lock);
        enter(&mut lock, &[1, 2]);
        lock.on_button_pressed(9);

        lock.initialize(vec![7, 7, 7, 7], false);
        assert!(lock.is_locked());
        assert_eq!(locks.get(), 1);
        assert!(lock.input().is_empty());
        assert!(!lock.pending_reset());
        assert_eq!(lock.len(), 4);

        enter(&mut lock, &[7, 7, 7, 7]);
        assert_eq!(unlocks.get(), 2);
    }

    #[test]
    fn test_empty_combination_ignores_presses() {
        let mut lock = ComboLock::new(Vec::new(), false);
        assert!(lock.is_empty());
        assert_eq!(lock.on_button_pressed(1), PressOutcome::Ignored);
        assert!(lock.is_locked());
    }

    proptest! {
        #[test]
        fn prop_exact_match_unlocks_once(target in prop::collection::vec(0usize..10, DEFAULT_COMBO_LENGTH)) {
            let mut lock = ComboLock::new(target.clone(), false);
            let (unlocks, _) = counted(&mut lock);
            let outcome = enter(&mut lock, &target);
            prop_assert_eq!(outcome, PressOutcome::Unlocked);
            prop_assert_eq!(unlocks.get(), 1);
            prop_assert_eq!(lock.state(), LockState::Unlocked);
        }

        #[test]
        fn prop_any_difference_stays_locked(
            target in prop::collection::vec(0usize..10, DEFAULT_COMBO_LENGTH),
            presses in prop::collection::vec(0usize..10, DEFAULT_COMBO_LENGTH),
        ) {
            prop_assume!(target != presses);
            let mut lock = ComboLock::new(target, false);
            let (unlocks, _) = counted(&mut lock);
            enter(&mut lock, &presses);
            prop_assert!(lock.is_locked());
            prop_assert!(lock.input().is_empty());
            prop_assert_eq!(unlocks.get(), 0);
        }

        #[test]
        fn prop_reset_round_trip(
            old in prop::collection::vec(0usize..10, DEFAULT_COMBO_LENGTH),
            new in prop::collection::vec(0usize..10, DEFAULT_COMBO_LENGTH),
        ) {
            prop_assume!(old != new);
            let mut lock = ComboLock::new(old.clone(), true);
            enter(&mut lock, &old);
            prop_assert_eq!(enter(&mut lock, &new), PressOutcome::Rekeyed);
            prop_assert!(lock.is_locked());
            prop_assert_eq!(enter(&mut lock, &old), PressOutcome::Rejected);
            prop_assert_eq!(enter(&mut lock, &new), PressOutcome::Unlocked);
        }

        #[test]
        fn prop_buffer_never_exceeds_length(presses in prop::collection::vec(0usize..10, 0..40)) {
            let mut lock = ComboLock::new(vec![9, 8, 7], true);
            for p in presses {
                lock.on_button_pressed(p);
                prop_assert!(lock.input().len() < lock.len());
            }
        }
    }
}
