//! The application container.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::action::{Action, ActionMap};
use crate::config::{ActionOverridePolicy, AppConfig};
use crate::error::AppError;
use crate::lifecycle::{LifecycleEvent, LifecycleObserver, LifecyclePhase};
use crate::module::{Member, Module, ModuleId, RouteFn};

const MISSING_CONTEXT: &str = "Context is required when creating a new app";
const ALREADY_INITIALIZED: &str = "App is already initialized";
const MISSING_MODULE: &str = "Should provide a module to load";
const ALREADY_LOADED: &str = "This module is already loaded";
const MISSING_LOAD_FN: &str = "A module must contain a .load() function";
const ROUTES_NOT_FN: &str = "Module's routes field should be a function";

/// Application container.
///
/// Holds the shared context, collects what modules contribute, and enforces
/// the lifecycle: load any number of modules, then call [`App::init`] once.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = App::new(context)?;
/// app.load_module(Some(&posts))?;
/// app.load_module(Some(&comments))?;
/// app.init()?;
/// ```
pub struct App<C> {
    context: Rc<C>,
    config: AppConfig,
    actions: ActionMap,
    route_fns: Vec<RouteFn>,
    loaded: HashSet<ModuleId>,
    initialized: bool,
    observers: Vec<Box<dyn LifecycleObserver>>,
}

impl<C> App<C> {
    /// Create a new app around the given context.
    ///
    /// The context is moved into the app; use [`App::from_shared`] to keep
    /// a handle to a context the caller already shares. Fails with
    /// [`AppError::Configuration`] when no context is supplied.
    pub fn new(context: impl Into<Option<C>>) -> Result<Self, AppError> {
        Self::with_config(context, AppConfig::default())
    }

    /// Create a new app with an explicit configuration.
    pub fn with_config(context: impl Into<Option<C>>, config: AppConfig) -> Result<Self, AppError> {
        Self::from_shared_with_config(context.into().map(Rc::new), config)
    }

    /// Create a new app around an already shared context.
    ///
    /// The app holds the given `Rc` itself, so [`App::shared_context`]
    /// returns a handle to the same allocation.
    pub fn from_shared(context: Option<Rc<C>>) -> Result<Self, AppError> {
        Self::from_shared_with_config(context, AppConfig::default())
    }

    /// Create a new app around an already shared context, with an explicit
    /// configuration.
    pub fn from_shared_with_config(
        context: Option<Rc<C>>,
        config: AppConfig,
    ) -> Result<Self, AppError> {
        let context =
            context.ok_or_else(|| AppError::Configuration(MISSING_CONTEXT.to_string()))?;

        Ok(Self {
            context,
            config,
            actions: ActionMap::new(),
            route_fns: Vec::new(),
            loaded: HashSet::new(),
            initialized: false,
            observers: Vec::new(),
        })
    }

    /// Register a lifecycle observer.
    pub fn observe(&mut self, observer: impl LifecycleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Load a module.
    ///
    /// Only legal before [`App::init`]. The module's route function is
    /// queued, its actions are merged (later modules win on name clashes),
    /// and its `load` function runs with the app context. An error from
    /// `load` is returned as [`AppError::Load`]; the module then stays
    /// unloaded.
    ///
    /// Routes and actions are merged before `load` runs and are kept when it
    /// fails. Loading the same module again after such a failure queues its
    /// route function a second time, so it runs twice during init.
    pub fn load_module(&mut self, module: Option<&Module<C>>) -> Result<(), AppError> {
        if self.initialized {
            return Err(AppError::Lifecycle(ALREADY_INITIALIZED.to_string()));
        }

        let module = module.ok_or_else(|| AppError::Argument(MISSING_MODULE.to_string()))?;

        if self.loaded.contains(&module.id()) {
            return Err(AppError::State(ALREADY_LOADED.to_string()));
        }

        let load = match module.load() {
            Some(Member::Callable(load)) => Rc::clone(load),
            _ => return Err(AppError::Contract(MISSING_LOAD_FN.to_string())),
        };

        let routes = match module.routes() {
            None => None,
            Some(Member::Callable(routes)) => Some(Rc::clone(routes)),
            Some(Member::Value(_)) => return Err(AppError::Contract(ROUTES_NOT_FN.to_string())),
        };

        if let Some(routes) = routes {
            self.route_fns.push(routes);
        }

        if let Some(actions) = module.actions() {
            self.merge_actions(module.name(), actions);
        }

        load(&*self.context).map_err(AppError::Load)?;
        self.loaded.insert(module.id());

        tracing::debug!(
            app = %self.config.name,
            module = %module.name(),
            route_fns = self.route_fns.len(),
            actions = self.actions.len(),
            "Module loaded"
        );

        self.emit(LifecycleEvent::ModuleLoaded {
            module: module.name().to_string(),
            route_fns: self.route_fns.len(),
            actions: self.actions.len(),
        });

        Ok(())
    }

    /// Initialize the app.
    ///
    /// Runs every queued route function in load order, then marks the app
    /// initialized. Calling this a second time is an error. If a route
    /// function fails, the remaining ones are skipped and the app stays in
    /// the registration phase.
    pub fn init(&mut self) -> Result<(), AppError> {
        if self.initialized {
            return Err(AppError::Lifecycle(ALREADY_INITIALIZED.to_string()));
        }

        for (index, route_fn) in self.route_fns.iter().enumerate() {
            tracing::debug!(app = %self.config.name, index, "Registering routes");
            route_fn().map_err(AppError::Route)?;
        }

        self.initialized = true;

        tracing::info!(
            app = %self.config.name,
            modules = self.loaded.len(),
            route_fns = self.route_fns.len(),
            "App initialized"
        );

        self.emit(LifecycleEvent::Initialized {
            route_fns: self.route_fns.len(),
        });

        Ok(())
    }

    /// The app context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// A shared handle to the app context.
    pub fn shared_context(&self) -> Rc<C> {
        Rc::clone(&self.context)
    }

    /// The configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// All registered actions.
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Queued route functions, in load order.
    pub fn route_fns(&self) -> &[RouteFn] {
        &self.route_fns
    }

    /// Whether [`App::init`] has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether this app has loaded the given module.
    pub fn is_loaded(&self, module: &Module<C>) -> bool {
        self.loaded.contains(&module.id())
    }

    /// Number of modules loaded.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        if self.initialized {
            LifecyclePhase::Initialized
        } else {
            LifecyclePhase::Registration
        }
    }

    fn merge_actions(&mut self, module: &str, actions: &ActionMap) {
        for (name, action) in actions {
            let replaced = self.actions.insert(name.clone(), action.clone());

            if replaced.is_some() && self.config.action_override == ActionOverridePolicy::Warn {
                tracing::warn!(
                    app = %self.config.name,
                    module = %module,
                    action = %name,
                    "Action overridden by later module"
                );

                self.emit(LifecycleEvent::ActionOverridden {
                    module: module.to_string(),
                    action: name.clone(),
                });
            }
        }
    }

    fn emit(&self, event: LifecycleEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for App<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("actions", &self.actions)
            .field("route_fns", &self.route_fns.len())
            .field("loaded", &self.loaded)
            .field("initialized", &self.initialized)
            .finish()
    }
}
