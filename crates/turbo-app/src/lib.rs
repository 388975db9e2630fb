//! Application container for TurboCommerce modules.
//!
//! An [`App`] holds a shared context and collects what pluggable
//! [`Module`]s contribute:
//! - route-registration functions, run once in load order by [`App::init`]
//! - named [`Action`] handlers, merged into one app-wide map
//!
//! The lifecycle has two phases. Modules may only be loaded during
//! registration; `init` moves the app to the terminal initialized phase and
//! can only succeed once.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use turbo_app::prelude::*;
//!
//! let catalog = Module::new("catalog")
//!     .with_load(|ctx: &Context| ctx.db.migrate())
//!     .with_routes(|| register_catalog_routes())
//!     .with_action("catalog.search", Action::new(search));
//!
//! let mut app = App::new(context)?;
//! app.load_module(Some(&catalog))?;
//! app.init()?;
//! ```

pub mod prelude;
mod action;
mod app;
mod config;
mod error;
mod lifecycle;
mod module;

pub use action::*;
pub use app::*;
pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use module::*;
