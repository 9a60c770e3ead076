mod tracing;

pub use tracing::{TracingLevel, init_file_tracing, set_tracing_level, trace_log_path};
