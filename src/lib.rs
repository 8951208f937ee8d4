pub mod core;
pub mod tools;

// Composio base provider
pub mod composio;

// Named-service components
pub mod components;

pub mod logging;
