// Pipeline tracing
// Records what each generate and export step produced

pub mod trace;

pub use trace::{read_trace_file, Stage, TraceEntry, TraceError, TraceWriter};
