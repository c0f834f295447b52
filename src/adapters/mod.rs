// Adapters layer: concrete implementations for the domain ports.
// The file-backed store stays under src/config next to the CLI settings.

pub mod catalog;
pub mod storage;
