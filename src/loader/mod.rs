pub mod normalizer;
pub mod operations;
pub mod resolver;

pub use normalizer::{SpecEncoding, derive_base_url, normalize};
pub use operations::extract_operations;
pub use resolver::{ReferenceResolver, Resolution};
