//! GPU backend: device acquisition, kernel sources, and the compute
//! pipeline for the accelerated multiplication strategy.

pub mod ops;
pub mod shaders;
pub mod webgpu;
