pub mod binning;
pub mod density;
pub mod probplot;
pub mod statistics;
