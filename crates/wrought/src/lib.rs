// Wrought - small MVC request-dispatch and view-rendering core
// Path-routed controllers over an ordered include path, slot-based views

pub mod value;

// Framework modules
pub mod argv;
pub mod assets;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod pdf;
pub mod renderer;
pub mod request;
pub mod resolver;
pub mod session;
pub mod view;

// Re-export framework types
pub use argv::Argv;
pub use assets::{AssetRegistry, LinkTag};
pub use config::{Config, RuntimeMode};
pub use controller::{action_from_argv, Controller, ControllerFactory, ControllerRegistry, DataHandle};
pub use dispatcher::Dispatcher;
pub use pdf::PdfBackend;
pub use renderer::Renderer;
pub use request::{QueryParams, RouteRequest};
pub use resolver::{ControllerIdentity, ControllerResolver};
pub use session::{Login, Session};
pub use value::Value;
pub use view::{OutputFormat, Rendered, View};

// Re-export the containment helpers for embedders
pub use wrought_paths::resolve_within;
