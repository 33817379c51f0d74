// What happens after a gesture completes: formatting and the effect pipeline.

pub mod format;
pub mod pipeline;
