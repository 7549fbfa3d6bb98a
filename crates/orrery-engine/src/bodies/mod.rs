pub mod body;
pub mod catalog;

pub use body::{Body, BodyDescriptor, CloudLayer, CometDescriptor, Orbit, Phase};
pub use catalog::{catalog_from_json, default_catalog};
