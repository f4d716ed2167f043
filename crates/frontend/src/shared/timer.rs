//! Cancellable one-shot timers and a debouncer built on them

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task. Dropping it leaves the task scheduled.
#[derive(Clone, Default)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Runs a task once after a delay unless its handle is cancelled first
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle;
}

/// `setTimeout` backed scheduler
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if !guard.is_cancelled() {
                task();
            }
        });
        handle
    }
}

/// Keeps at most one pending task; scheduling again restarts the delay
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    pending: RefCell<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn schedule(&self, task: Task) {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay_ms, task);
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    struct Entry {
        due_ms: u64,
        seq: u64,
        handle: TimerHandle,
        task: Task,
    }

    /// Virtual clock for tests: tasks run only when time is advanced
    #[derive(Default)]
    pub struct ManualScheduler {
        now_ms: Cell<u64>,
        seq: Cell<u64>,
        queue: RefCell<Vec<Entry>>,
    }

    impl ManualScheduler {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn now_ms(&self) -> u64 {
            self.now_ms.get()
        }

        /// Number of scheduled tasks that are neither run nor cancelled
        pub fn pending(&self) -> usize {
            self.queue
                .borrow()
                .iter()
                .filter(|e| !e.handle.is_cancelled())
                .count()
        }

        /// Moves the clock forward, running due tasks in due order
        pub fn advance(&self, ms: u64) {
            let target = self.now_ms.get() + ms;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    let idx = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due_ms <= target)
                        .min_by_key(|(_, e)| (e.due_ms, e.seq))
                        .map(|(i, _)| i);
                    idx.map(|i| queue.remove(i))
                };
                let Some(entry) = next else { break };
                self.now_ms.set(entry.due_ms);
                if !entry.handle.is_cancelled() {
                    (entry.task)();
                }
            }
            self.now_ms.set(target);
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
            let handle = TimerHandle::new();
            let seq = self.seq.get();
            self.seq.set(seq + 1);
            self.queue.borrow_mut().push(Entry {
                due_ms: self.now_ms.get() + u64::from(delay_ms),
                seq,
                handle: handle.clone(),
                task,
            });
            handle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;

    #[test]
    fn test_task_runs_after_delay() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        scheduler.schedule(300, Box::new(move || f.set(f.get() + 1)));

        scheduler.advance(299);
        assert_eq!(fired.get(), 0);
        scheduler.advance(1);
        assert_eq!(fired.get(), 1);
        scheduler.advance(1000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let handle = scheduler.schedule(100, Box::new(move || f.set(true)));
        handle.cancel();
        scheduler.advance(500);
        assert!(!fired.get());
    }

    #[test]
    fn test_dropped_handle_keeps_task() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        drop(scheduler.schedule(100, Box::new(move || f.set(true))));
        scheduler.advance(100);
        assert!(fired.get());
    }

    #[test]
    fn test_debouncer_restarts_delay() {
        let scheduler = ManualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), 300);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let c = calls.clone();
        debouncer.schedule(Box::new(move || c.borrow_mut().push("first")));
        scheduler.advance(100);
        let c = calls.clone();
        debouncer.schedule(Box::new(move || c.borrow_mut().push("second")));

        scheduler.advance(250);
        assert!(calls.borrow().is_empty());
        scheduler.advance(50);
        assert_eq!(*calls.borrow(), vec!["second"]);
        assert_eq!(scheduler.now_ms(), 400);
    }

    #[test]
    fn test_debouncer_cancel() {
        let scheduler = ManualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), 300);
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        debouncer.schedule(Box::new(move || f.set(true)));
        debouncer.cancel();
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(1000);
        assert!(!fired.get());
    }
}
