use crate::config::SampleCaps;
use crate::error::OptimizerError;
use polars::prelude::DataFrame;
use std::fmt;
use std::path::PathBuf;

/// The three extraction rules, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleRule {
    Normal,
    Delayed,
    Exception,
}

impl SampleRule {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Delayed, Self::Exception];

    /// File-name label, e.g. `normal_trips`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal_trips",
            Self::Delayed => "delayed_trips",
            Self::Exception => "exception_cases",
        }
    }

    /// Heading used in the sample document, e.g. `Normal Trips`.
    pub fn title(self) -> String {
        self.label()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn cap(self, caps: &SampleCaps) -> usize {
        match self {
            Self::Normal => caps.normal,
            Self::Delayed => caps.delayed,
            Self::Exception => caps.exception,
        }
    }
}

impl fmt::Display for SampleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rows drawn by one rule.
#[derive(Debug, Clone)]
pub struct Sample {
    pub rule: SampleRule,
    pub rows: DataFrame,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.rows.height()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.height() == 0
    }
}

#[derive(Debug)]
pub enum SampleOutcome {
    Sampled(Sample),
    Skipped {
        rule: SampleRule,
        reason: OptimizerError,
    },
}

/// One row of a frequency table. `value` is already rendered for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
}

#[derive(Clone, Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
    /// Narrative count for sample files; `None` for the summary.
    pub records: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct SkippedRule {
    pub rule: SampleRule,
    pub reason: String,
}

#[derive(Clone, Debug)]
pub struct OptimizeReport {
    pub dataset_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub output_dir: PathBuf,
    pub files: Vec<WrittenFile>,
    pub skipped: Vec<SkippedRule>,
}

impl OptimizeReport {
    pub fn file_for(&self, suffix: &str) -> Option<&WrittenFile> {
        let name = format!("{}_{suffix}.md", self.dataset_name);
        self.files
            .iter()
            .find(|f| f.path.file_name() == Some(std::ffi::OsStr::new(&name)))
    }
}
