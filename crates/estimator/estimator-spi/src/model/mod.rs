//! Wire and handle models shared by estimator bindings.

mod endpoint;
mod handle;
mod param_value;
mod payload;
mod training;

pub use endpoint::{encode_segment, Endpoint, Method};
pub use handle::{DatasetHandle, ModelHandle};
pub use param_value::ParamValue;
pub use payload::Payload;
pub use training::{JobStatus, TrainingRequest};
