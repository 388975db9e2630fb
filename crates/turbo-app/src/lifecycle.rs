//! App lifecycle tracking.

use std::fmt;

/// Lifecycle phases of an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Modules may be loaded.
    Registration,
    /// Routes have been registered. Terminal.
    Initialized,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration => write!(f, "registration"),
            Self::Initialized => write!(f, "initialized"),
        }
    }
}

/// Lifecycle events emitted after a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A module was loaded.
    ModuleLoaded {
        /// Module name.
        module: String,
        /// Route functions registered so far.
        route_fns: usize,
        /// Actions known to the app after the merge.
        actions: usize,
    },
    /// A module's action replaced one already registered. Only emitted
    /// under [`ActionOverridePolicy::Warn`](crate::ActionOverridePolicy::Warn).
    ActionOverridden {
        /// Module whose action won.
        module: String,
        /// Action name.
        action: String,
    },
    /// All route functions ran and the app is initialized.
    Initialized {
        /// Number of route functions invoked.
        route_fns: usize,
    },
}

impl LifecycleEvent {
    /// The phase the app is in once this event has been emitted.
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            Self::ModuleLoaded { .. } | Self::ActionOverridden { .. } => {
                LifecyclePhase::Registration
            }
            Self::Initialized { .. } => LifecyclePhase::Initialized,
        }
    }
}

/// Observer trait for lifecycle events.
pub trait LifecycleObserver {
    /// Called for each lifecycle event, after the change it reports.
    fn on_event(&self, event: &LifecycleEvent);
}

impl<F> LifecycleObserver for F
where
    F: Fn(&LifecycleEvent),
{
    fn on_event(&self, event: &LifecycleEvent) {
        self(event)
    }
}
