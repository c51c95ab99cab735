//! Trailing-Edge Debouncer
//!
//! Owns at most one pending timer. Each `call` replaces the pending
//! argument and restarts the timer; only the last argument fires.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run a callback after a delay.
///
/// Dropping the returned handle cancels the callback.
pub trait Schedule: 'static {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout`-backed scheduling
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSchedule;

impl Schedule for BrowserSchedule {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

struct Slot<A, H> {
    pending: Option<A>,
    timer: Option<H>,
    generation: u64,
}

pub struct Debouncer<A: 'static, S: Schedule = BrowserSchedule> {
    delay_ms: u32,
    schedule: S,
    action: Rc<dyn Fn(A)>,
    slot: Rc<RefCell<Slot<A, S::Handle>>>,
}

impl<A: 'static, S: Schedule> Debouncer<A, S> {
    pub fn new(delay_ms: u32, schedule: S, action: impl Fn(A) + 'static) -> Self {
        Self {
            delay_ms,
            schedule,
            action: Rc::new(action),
            slot: Rc::new(RefCell::new(Slot {
                pending: None,
                timer: None,
                generation: 0,
            })),
        }
    }

    /// Queue `arg`, replacing any pending one and restarting the delay
    pub fn call(&self, arg: A) {
        let (generation, stale) = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.pending = Some(arg);
            (slot.generation, slot.timer.take())
        };
        drop(stale);

        let slot = Rc::clone(&self.slot);
        let action = Rc::clone(&self.action);
        let handle = self.schedule.schedule(
            self.delay_ms,
            Box::new(move || {
                // The fired handle stays in the slot; it is dropped by the
                // next call/cancel, never from inside its own callback.
                let arg = {
                    let mut slot = slot.borrow_mut();
                    if slot.generation != generation {
                        return;
                    }
                    slot.pending.take()
                };
                if let Some(arg) = arg {
                    action(arg);
                }
            }),
        );
        self.slot.borrow_mut().timer = Some(handle);
    }

    /// Drop the pending argument without running it
    pub fn cancel(&self) {
        let stale = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.pending = None;
            slot.timer.take()
        };
        drop(stale);
    }

    /// Run the pending argument now. Returns whether anything ran.
    pub fn flush(&self) -> bool {
        let (arg, stale) = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            (slot.pending.take(), slot.timer.take())
        };
        drop(stale);
        match arg {
            Some(arg) => {
                (self.action)(arg);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().pending.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::manual::ManualSchedule;
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn rapid_calls_collapse_to_last() {
        let clock = ManualSchedule::default();
        let (seen, action) = recorder();
        let debouncer = Debouncer::new(300, clock.clone(), action);

        debouncer.call(1);
        debouncer.call(2);
        debouncer.call(3);
        assert_eq!(clock.live_timers(), 1);
        assert_eq!(clock.last_delay(), Some(300));

        assert_eq!(clock.fire_all(), 1);
        assert_eq!(*seen.borrow(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_discards_pending() {
        let clock = ManualSchedule::default();
        let (seen, action) = recorder();
        let debouncer = Debouncer::new(300, clock.clone(), action);

        debouncer.call(7);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(clock.fire_all(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn flush_runs_immediately_once() {
        let clock = ManualSchedule::default();
        let (seen, action) = recorder();
        let debouncer = Debouncer::new(300, clock.clone(), action);

        debouncer.call(4);
        assert!(debouncer.flush());
        assert!(!debouncer.flush());
        clock.fire_all();
        assert_eq!(*seen.borrow(), vec![4]);
    }

    #[test]
    fn separate_bursts_each_fire() {
        let clock = ManualSchedule::default();
        let (seen, action) = recorder();
        let debouncer = Debouncer::new(300, clock.clone(), action);

        debouncer.call(1);
        clock.fire_all();
        debouncer.call(2);
        clock.fire_all();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
