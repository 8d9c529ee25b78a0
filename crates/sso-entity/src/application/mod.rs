//! Client application entities.

pub mod model;

pub use model::Application;
