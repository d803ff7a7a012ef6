pub mod operation;
pub mod plan;
pub mod sample;
pub mod spec;

pub use operation::{HttpMethod, OperationDescriptor, RequestBodySchema};
pub use plan::{PlannedOperation, TestPlanDocument};
pub use sample::SampleValue;
pub use spec::{CanonicalSpec, SchemaNode};
