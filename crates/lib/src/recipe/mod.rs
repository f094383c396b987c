//! Component resolution against recipe collections.
//!
//! A [`ComponentData`] descriptor names a component and its version. The
//! [`ComponentResolver`] checks the version against the caller's
//! [`Requirements`], picks the one [`RecipeVariant`] of the component's recipe
//! collection whose range covers the requirement, and instantiates it into a
//! [`Component`].

mod logger;
mod registry;
mod resolver;
mod types;

pub use logger::{Logger, NoopLogger, TracingLogger};
pub use registry::{RecipeConstructor, RecipeRegistry, RecipeSelector, RecipeVariant};
pub use resolver::ComponentResolver;
pub use types::{BasicComponent, Component, ComponentData, ComponentInit, Requirement, Requirements, ResolveError, Source};
