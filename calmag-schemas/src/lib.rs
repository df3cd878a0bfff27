pub mod additive;
pub mod element;
pub mod fertilizer;
pub mod file_formats;
pub mod result;
pub mod target;
pub mod water;
