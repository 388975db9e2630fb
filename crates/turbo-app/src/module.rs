//! Module definition.
//!
//! A module is a capability record with one required member (`load`) and
//! two optional ones (`routes`, `actions`). Members are kept loosely typed
//! until the container validates them, so a module assembled from dynamic
//! data can still be rejected with a precise contract error.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::action::{Action, ActionMap};

/// Function invoked with the app context when a module is loaded.
pub type LoadFn<C> = Rc<dyn Fn(&C) -> anyhow::Result<()>>;

/// Route-registration function invoked once during init.
pub type RouteFn = Rc<dyn Fn() -> anyhow::Result<()>>;

/// Process-unique identity of a [`Module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u64);

impl ModuleId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module-{}", self.0)
    }
}

/// A module member that is either callable or some other value.
#[derive(Clone)]
pub enum Member<F> {
    /// A callable member.
    Callable(F),
    /// A member that is present but not callable.
    Value(serde_json::Value),
}

impl<F> Member<F> {
    /// Get the callable, if this member is one.
    pub fn as_callable(&self) -> Option<&F> {
        match self {
            Self::Callable(f) => Some(f),
            Self::Value(_) => None,
        }
    }

    /// Check whether this member is callable.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }
}

impl<F> fmt::Debug for Member<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A pluggable module contributing routes and actions to an app.
///
/// Each module has its own identity; the container tracks which modules it
/// has loaded without touching the module itself.
///
/// # Example
///
/// ```rust,ignore
/// let comments = Module::new("comments")
///     .with_load(|ctx: &Context| {
///         ctx.db.ensure_collection("comments")?;
///         Ok(())
///     })
///     .with_routes(|| Ok(()))
///     .with_action("comments.create", Action::new(create_comment));
/// ```
pub struct Module<C> {
    id: ModuleId,
    name: String,
    load: Option<Member<LoadFn<C>>>,
    routes: Option<Member<RouteFn>>,
    actions: Option<ActionMap>,
}

impl<C> Module<C> {
    /// Create an empty module with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ModuleId::next(),
            name: name.into(),
            load: None,
            routes: None,
            actions: None,
        }
    }

    /// Set the load function.
    pub fn with_load<F>(mut self, load: F) -> Self
    where
        F: Fn(&C) -> anyhow::Result<()> + 'static,
    {
        self.load = Some(Member::Callable(Rc::new(load)));
        self
    }

    /// Set the `load` member to a non-callable value.
    pub fn with_load_value(mut self, value: serde_json::Value) -> Self {
        self.load = Some(Member::Value(value));
        self
    }

    /// Set the route-registration function.
    pub fn with_routes<F>(mut self, routes: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        self.routes = Some(Member::Callable(Rc::new(routes)));
        self
    }

    /// Set the `routes` member to a non-callable value.
    pub fn with_routes_value(mut self, value: serde_json::Value) -> Self {
        self.routes = Some(Member::Value(value));
        self
    }

    /// Replace the module's actions.
    pub fn with_actions(mut self, actions: ActionMap) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Add a single action.
    pub fn with_action(mut self, name: impl Into<String>, action: Action) -> Self {
        self.actions
            .get_or_insert_with(ActionMap::new)
            .insert(name.into(), action);
        self
    }

    /// Module identity.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `load` member, as supplied.
    pub fn load(&self) -> Option<&Member<LoadFn<C>>> {
        self.load.as_ref()
    }

    /// The `routes` member, as supplied.
    pub fn routes(&self) -> Option<&Member<RouteFn>> {
        self.routes.as_ref()
    }

    /// The route function, if `routes` is callable.
    pub fn routes_fn(&self) -> Option<&RouteFn> {
        self.routes.as_ref().and_then(Member::as_callable)
    }

    /// The module's actions, if any.
    pub fn actions(&self) -> Option<&ActionMap> {
        self.actions.as_ref()
    }
}

impl<C> fmt::Debug for Module<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("load", &self.load)
            .field("routes", &self.routes)
            .field("actions", &self.actions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === ModuleId Tests ===

    #[test]
    fn test_module_ids_are_unique() {
        let a = Module::<()>::new("a");
        let b = Module::<()>::new("a");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_module_id_display() {
        let module = Module::<()>::new("posts");
        let expected = format!("module-{}", module.id().as_u64());

        assert_eq!(module.id().to_string(), expected);
    }

    // === Module Tests ===

    #[test]
    fn test_module_new_is_empty() {
        let module = Module::<()>::new("empty");

        assert_eq!(module.name(), "empty");
        assert!(module.load().is_none());
        assert!(module.routes().is_none());
        assert!(module.actions().is_none());
    }

    #[test]
    fn test_module_with_load() {
        let module = Module::<u32>::new("m").with_load(|_| Ok(()));

        assert!(module.load().unwrap().is_callable());
    }

    #[test]
    fn test_module_with_non_callable_members() {
        let module = Module::<()>::new("m")
            .with_load_value(serde_json::json!("not a function"))
            .with_routes_value(serde_json::json!({}));

        assert!(!module.load().unwrap().is_callable());
        assert!(!module.routes().unwrap().is_callable());
        assert!(module.routes_fn().is_none());
    }

    #[test]
    fn test_module_with_routes() {
        let module = Module::<()>::new("m").with_routes(|| Ok(()));

        assert!(module.routes_fn().is_some());
    }

    #[test]
    fn test_module_with_action_accumulates() {
        let module = Module::<()>::new("m")
            .with_action("aa", Action::new(1))
            .with_action("bb", Action::new(2));

        let actions = module.actions().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions["bb"].downcast_ref::<i32>(), Some(&2));
    }

    #[test]
    fn test_module_debug_hides_callables() {
        let module = Module::<()>::new("dbg").with_load(|_| Ok(()));
        let out = format!("{:?}", module);

        assert!(out.contains("dbg"));
        assert!(out.contains("Callable(..)"));
    }
}
