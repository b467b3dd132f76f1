pub mod analyzer;
pub mod dataset;
pub mod theme;
