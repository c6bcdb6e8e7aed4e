pub mod definitions;
pub(crate) mod modes;
pub mod registry;
pub mod stream;
pub mod symmetric;
pub mod traits;

pub use definitions::{Algorithm, AlgorithmDescriptor, CipherFamily, RoundsPolicy};
pub use registry::Registry;
