//! Shared action handlers contributed by modules.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Action handlers keyed by action name.
pub type ActionMap = HashMap<String, Action>;

/// An opaque action handler.
///
/// The container never inspects handlers. It only stores them and hands
/// them back, so any value (a closure, a struct, a plain number) can be
/// registered. Cloning shares the same underlying value.
#[derive(Clone)]
pub struct Action(Rc<dyn Any>);

impl Action {
    /// Wrap a handler value.
    pub fn new<T: Any>(handler: T) -> Self {
        Self(Rc::new(handler))
    }

    /// Borrow the handler as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check whether the handler is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Check whether two actions share the same handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
