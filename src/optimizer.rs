pub mod columns;
pub mod flows;
pub mod io;
pub mod narrative;
pub mod sampling;
pub mod summary;
pub mod types;
pub mod values;

pub use columns::{ColumnRole, ColumnRoles};
pub use flows::optimize_file_flow;
pub use io::{dataset_name, load_table, write_output};
pub use narrative::{narrate_row, narrate_sample, render_sample_document};
pub use sampling::Sampler;
pub use summary::{generate_summary_stats, value_frequencies};
pub use types::{
    OptimizeReport, Sample, SampleOutcome, SampleRule, SkippedRule, ValueFrequency, WrittenFile,
};
