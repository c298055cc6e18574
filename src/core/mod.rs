pub mod emitter;
pub mod sampler;
pub mod tier;

pub use emitter::*;
pub use sampler::*;
pub use tier::*;
