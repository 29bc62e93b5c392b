pub mod color;
mod definition;
mod error;
pub mod escape;
mod handler;
mod preset;
mod registry;
pub mod template;

pub use definition::HandlerDefinition;
pub use error::HandlerError;
pub use handler::{Condition, ConvertOptions, Handler, Predicate, Render, RenderContext, RenderFn};
pub use preset::preset_handlers;
pub use registry::HandlerRegistry;
