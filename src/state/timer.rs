// Clock and deferred-callback scheduling for gesture timers
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

pub trait Clock {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;
}

pub trait Scheduler {
    /// Runs `task` once after `delay_ms`. `None` if the platform refused the timer.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<TimerId>;
    /// Cancelling an unknown or already-fired timer is a no-op.
    fn cancel(&self, id: TimerId);
}

/// Owned handle to a scheduled task. The task is cancelled when the handle
/// is dropped, so every exit path (touch end, re-arm, teardown) releases it.
pub struct PendingTimer {
    id: TimerId,
    scheduler: Rc<dyn Scheduler>,
}

impl PendingTimer {
    pub fn schedule(
        scheduler: &Rc<dyn Scheduler>,
        delay_ms: u32,
        task: Box<dyn FnOnce()>,
    ) -> Option<Self> {
        let id = scheduler.schedule(delay_ms, task)?;
        Some(Self {
            id,
            scheduler: scheduler.clone(),
        })
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        self.scheduler.cancel(self.id);
    }
}

impl std::fmt::Debug for PendingTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTimer").field("id", &self.id).finish()
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Waiting,
    Running,
    Done,
}

struct Slot {
    _closure: Closure<dyn FnMut()>,
    state: Rc<Cell<SlotState>>,
}

/// `setTimeout`-backed scheduler. Closures are kept alive until they fire or
/// are cancelled. A closure is never dropped while it is running: fired ones
/// are swept on a later schedule call.
pub struct BrowserScheduler {
    window: web_sys::Window,
    slots: RefCell<HashMap<i32, Slot>>,
}

impl BrowserScheduler {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            slots: RefCell::new(HashMap::new()),
        })
    }

    fn sweep(&self) {
        self.slots
            .borrow_mut()
            .retain(|_, s| s.state.get() != SlotState::Done);
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<TimerId> {
        self.sweep();
        let state = Rc::new(Cell::new(SlotState::Waiting));
        let state_cb = state.clone();
        let mut task = Some(task);
        let closure = Closure::wrap(Box::new(move || {
            state_cb.set(SlotState::Running);
            if let Some(t) = task.take() {
                t();
            }
            state_cb.set(SlotState::Done);
        }) as Box<dyn FnMut()>);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            ) {
            Ok(id) => {
                self.slots.borrow_mut().insert(
                    id,
                    Slot {
                        _closure: closure,
                        state,
                    },
                );
                Some(TimerId(id))
            }
            Err(err) => {
                log::warn!("setTimeout failed: {:?}", err);
                None
            }
        }
    }

    fn cancel(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0);
        let mut slots = self.slots.borrow_mut();
        let running = slots
            .get(&id.0)
            .is_some_and(|s| s.state.get() == SlotState::Running);
        if !running {
            slots.remove(&id.0);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for id in self.slots.get_mut().keys() {
            self.window.clear_timeout_with_handle(*id);
        }
    }
}
