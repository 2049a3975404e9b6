//! Data types shared by the walkers and the emitter

pub mod generated;

pub use generated::{
    HttpMethod, Model, ModelProperty, Service, ServiceEndpoint, ServiceEndpointParameter, ServiceNode,
};
