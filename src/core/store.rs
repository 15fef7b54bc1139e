//! Observable UI state shared by every display surface.
//!
//! [`VibeStore`] is a cheap, cloneable handle created once at startup and
//! passed to whoever needs it. Every mutation swaps in a whole new
//! [`SharedState`] snapshot and then calls each subscriber synchronously.
//!
//! The store is deliberately `!Send`: all mutation and notification happen
//! on the single thread driving the event loop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::core::steps::{AgentStep, StepStatus};
use crate::core::theme::Theme;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SharedState {
    pub theme: Theme,
    pub steps: Vec<AgentStep>,
    pub is_busy: bool,
}

type Listener = Rc<dyn Fn(&SharedState)>;

struct StoreInner {
    state: RefCell<Rc<SharedState>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
}

#[derive(Clone)]
pub struct VibeStore {
    inner: Rc<StoreInner>,
}

impl fmt::Debug for VibeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VibeStore")
            .field("state", &*self.inner.state.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl Default for VibeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl VibeStore {
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(SharedState {
                    theme,
                    ..SharedState::default()
                })),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Current snapshot. Later mutations never change a snapshot already handed out.
    pub fn get_state(&self) -> Rc<SharedState> {
        Rc::clone(&self.inner.state.borrow())
    }

    pub fn set_theme(&self, theme: Theme) {
        self.replace(|state| SharedState {
            theme,
            ..state.clone()
        });
    }

    pub fn set_steps(&self, steps: Vec<AgentStep>) {
        self.replace(|state| SharedState {
            steps,
            ..state.clone()
        });
    }

    pub fn set_is_busy(&self, is_busy: bool) {
        self.replace(|state| SharedState {
            is_busy,
            ..state.clone()
        });
    }

    /// Change the status of the step with `id`, keeping order and every other
    /// field. Unknown ids and transitions that would move a step backwards
    /// are ignored. Returns whether the state changed.
    pub fn update_step_status(&self, id: &str, status: StepStatus) -> bool {
        let current = self.get_state();
        let Some(position) = current.steps.iter().position(|step| step.id == id) else {
            debug!(step = id, "status update for unknown step ignored");
            return false;
        };

        let from = current.steps[position].status;
        if !from.can_transition_to(status) {
            debug!(
                step = id,
                from = from.as_str(),
                to = status.as_str(),
                "step transition rejected"
            );
            return false;
        }

        let mut steps = current.steps.clone();
        steps[position].status = status;
        self.replace(|state| SharedState {
            steps,
            ..state.clone()
        });
        true
    }

    /// Register `listener` for every future state change. The listener stays
    /// registered until the returned [`Subscription`] is dropped or
    /// unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SharedState) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn replace(&self, next: impl FnOnce(&SharedState) -> SharedState) {
        let snapshot = {
            let mut slot = self.inner.state.borrow_mut();
            let updated = Rc::new(next(&slot));
            *slot = Rc::clone(&updated);
            updated
        };

        // Listeners may subscribe or mutate the store from inside the callback,
        // so no borrow is held while they run.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Keeps a store listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::default_steps;

    fn recorder(store: &VibeStore) -> (Rc<RefCell<Vec<SharedState>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (seen, subscription)
    }

    #[test]
    fn new_store_starts_idle_with_given_theme() {
        let store = VibeStore::new(Theme::GlassWhite);
        let state = store.get_state();
        assert_eq!(state.theme, Theme::GlassWhite);
        assert!(state.steps.is_empty());
        assert!(!state.is_busy);
    }

    #[test]
    fn every_setter_notifies_with_new_snapshot() {
        let store = VibeStore::default();
        let (seen, _subscription) = recorder(&store);

        store.set_theme(Theme::CyberpunkNeon);
        store.set_is_busy(true);
        store.set_steps(default_steps());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].theme, Theme::CyberpunkNeon);
        assert!(!seen[0].is_busy);
        assert!(seen[1].is_busy);
        assert_eq!(seen[2].steps.len(), 4);
        assert_eq!(seen[2].theme, Theme::CyberpunkNeon);
    }

    #[test]
    fn snapshots_are_copy_on_write() {
        let store = VibeStore::default();
        let before = store.get_state();
        store.set_is_busy(true);
        assert!(!before.is_busy);
        assert!(store.get_state().is_busy);
    }

    #[test]
    fn update_step_status_changes_only_the_target() {
        let store = VibeStore::default();
        store.set_steps(default_steps());

        assert!(store.update_step_status("2", StepStatus::Processing));

        let state = store.get_state();
        let expected: Vec<_> = default_steps()
            .into_iter()
            .map(|mut step| {
                if step.id == "2" {
                    step.status = StepStatus::Processing;
                }
                step
            })
            .collect();
        assert_eq!(state.steps, expected);
    }

    #[test]
    fn unknown_step_id_is_a_silent_no_op() {
        let store = VibeStore::default();
        store.set_steps(default_steps());
        let (seen, _subscription) = recorder(&store);

        assert!(!store.update_step_status("99", StepStatus::Processing));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn completed_step_never_regresses() {
        let store = VibeStore::default();
        store.set_steps(default_steps());
        store.update_step_status("1", StepStatus::Processing);
        store.update_step_status("1", StepStatus::Complete);

        assert!(!store.update_step_status("1", StepStatus::Processing));
        assert!(!store.update_step_status("1", StepStatus::Idle));
        assert_eq!(store.get_state().steps[0].status, StepStatus::Complete);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = VibeStore::default();
        let (seen, subscription) = recorder(&store);
        assert_eq!(store.subscriber_count(), 1);

        store.set_is_busy(true);
        drop(subscription);
        store.set_is_busy(false);

        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn explicit_unsubscribe_only_removes_its_listener() {
        let store = VibeStore::default();
        let (first, first_sub) = recorder(&store);
        let (second, _second_sub) = recorder(&store);

        first_sub.unsubscribe();
        store.set_theme(Theme::TrustBlue);

        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn listener_may_mutate_the_store() {
        let store = VibeStore::default();
        let handle = store.clone();
        let _subscription = store.subscribe(move |state| {
            if state.is_busy && state.theme != Theme::TrustBlue {
                handle.set_theme(Theme::TrustBlue);
            }
        });

        store.set_is_busy(true);
        assert_eq!(store.get_state().theme, Theme::TrustBlue);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = VibeStore::default();
        let subscription = store.subscribe(|_| {});
        drop(store);
        drop(subscription);
    }
}
