use clap::ValueEnum;

/// Shape of stdout summaries and stderr error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Human,
    /// One JSON object per command
    Json,
}
