//! Mapping profiles between persistence models and HTTP resources
//!
//! `model_to_resource` turns rows and aggregates into response resources;
//! `resource_to_model` turns validated requests into insert/update models.

pub mod model_to_resource;
pub mod resource_to_model;
