//! Tool composition
//!
//! Both compositions are tools themselves, so they nest freely: a pipeline
//! stage may be a map-reduce, a map-reduce mapper may be a pipeline.
//!
//! - [`Pipeline`]: sequential stages threading outputs forward
//! - [`MapReduce`]: concurrent mapper fan-out plus one reducer call

pub mod map_reduce;
pub mod pipeline;

pub use map_reduce::MapReduce;
pub use pipeline::Pipeline;
