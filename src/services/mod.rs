pub mod clipboard;
pub mod tracing_setup;
