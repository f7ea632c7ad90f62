//! Run configuration for promptgen.
//!
//! Configuration comes from the process environment and is read exactly once
//! at startup into a [`Config`], which is then passed down the pipeline.
//! The endpoint shape is derived from the configured host by a pure
//! classification function (see [`EndpointShape::classify`]).

mod endpoint;
mod model;
mod operations;


pub use endpoint::EndpointShape;
pub use model::{Config, RemoteConfig, Sampling};
