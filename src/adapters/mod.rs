// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod console;
pub mod gemini;
pub mod pdf;
pub mod scaledown;
pub mod storage;
