//! Writer collections and the builder that fills them

mod collection;
mod builder;

pub use collection::{LoggingServices, ServiceCollection};
pub use builder::LoggingServiceBuilder;
