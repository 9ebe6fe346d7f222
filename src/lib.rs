pub mod error;
pub mod grid;
pub mod hpdi;
pub mod kernels;
pub mod posterior;
pub mod region;
pub mod regression;
pub mod sampler;
pub mod stats;
