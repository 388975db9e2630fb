//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use turbo_app::prelude::*;
//! ```

pub use crate::{
    Action, ActionMap, ActionOverridePolicy, App, AppConfig, AppError, LifecycleEvent,
    LifecycleObserver, LifecyclePhase, Member, Module,
};
