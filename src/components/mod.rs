//! Named-service components
//!
//! Each component is a small record declaring its identity and deferring
//! capability handling to `ComposioBase`.

pub mod youtube;

pub use youtube::{YoutubeComponent, YOUTUBE};
