//! Merge raw per-model result files from one run directory
//!
//! Files are discovered recursively (`*_results.json`), sorted
//! lexicographically by path, and folded into one document. Model and case
//! lists become insertion-ordered unions; per-cell conflicts are settled by
//! an explicit [`ConflictPolicy`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::document::{CaseResult, ResultDocument, RESULT_FILE_SUFFIX};
use crate::error::{BenchError, Result};
use crate::trace_time;

/// How to settle two files providing a value for the same (case, model) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The file merged last (in sorted path order) wins
    #[default]
    LastWriteWins,
    /// The file merged first keeps the cell
    FirstWriteWins,
    /// Differing values for the same cell abort the merge
    ErrorOnConflict,
}

impl FromStr for ConflictPolicy {
    type Err = BenchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" | "last" => Ok(ConflictPolicy::LastWriteWins),
            "first-write-wins" | "first" => Ok(ConflictPolicy::FirstWriteWins),
            "error" | "error-on-conflict" => Ok(ConflictPolicy::ErrorOnConflict),
            other => Err(BenchError::invalid_value("conflict policy", other)),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::LastWriteWins => write!(f, "last-write-wins"),
            ConflictPolicy::FirstWriteWins => write!(f, "first-write-wins"),
            ConflictPolicy::ErrorOnConflict => write!(f, "error"),
        }
    }
}

/// Result of merging a run directory
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Nothing matched `*_results.json`; no output was written
    NoMatchingFiles,
    Merged(MergeSummary),
}

/// What a successful merge read and wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    pub files: Vec<PathBuf>,
    pub models: usize,
    pub cases: usize,
    /// (case, model) pairs that more than one file provided a value for
    pub conflicts: usize,
    pub policy: ConflictPolicy,
    pub output: PathBuf,
}

/// Recursively find `*_results.json` files under `root`, sorted by path.
///
/// A missing `root` yields no files. Any entry the walk cannot read (an
/// unreadable directory, a dangling link) fails discovery.
pub fn discover_result_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        warn!(root = %root.display(), "run directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            BenchError::io_operation("walk", path.display(), e)
        })?;
        let is_result = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(RESULT_FILE_SUFFIX));
        if is_result {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CellKind {
    Score,
    DetailScore,
    Metrics,
}

impl CellKind {
    fn label(self) -> &'static str {
        match self {
            CellKind::Score => "absolute score",
            CellKind::DetailScore => "detailed absolute score",
            CellKind::Metrics => "model metrics",
        }
    }
}

/// Combines result documents into one merged document
#[derive(Debug)]
pub struct ResultMerger {
    policy: ConflictPolicy,
    merged: ResultDocument,
    origins: HashMap<(CellKind, String, String), PathBuf>,
    conflicted: HashSet<(String, String)>,
}

impl Default for ResultMerger {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

impl ResultMerger {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            merged: ResultDocument::default(),
            origins: HashMap::new(),
            conflicted: HashSet::new(),
        }
    }

    /// Number of (case, model) pairs provided by more than one document so far
    pub fn conflicts(&self) -> usize {
        self.conflicted.len()
    }

    /// Fold one parsed document into the accumulator.
    ///
    /// `source` identifies the document in conflict errors and logs.
    pub fn merge(&mut self, source: &Path, doc: &ResultDocument) -> Result<()> {
        if self.merged.timestamp.is_none() {
            self.merged.timestamp = doc.timestamp.clone();
        }

        for model in &doc.models {
            self.merged.add_model(model);
        }
        for case in &doc.cases {
            self.merged.add_case(case);
        }

        for (case, block) in &doc.case_results {
            self.merged.add_case(case);
            if !self.merged.case_results.contains_key(case) {
                self.merged.case_results.insert(
                    case.clone(),
                    CaseResult {
                        comparisons: Some(Vec::new()),
                        ..Default::default()
                    },
                );
            }
            for (model, entry) in &block.absolute_scores {
                self.merged.add_model(model);
                let cell = (CellKind::Score, case.clone(), model.clone());
                let slot = &mut self.merged.case_results[case].absolute_scores;
                merge_cell(
                    self.policy,
                    &mut self.origins,
                    &mut self.conflicted,
                    slot,
                    cell,
                    entry,
                    source,
                )?;
            }
        }

        for (case, block) in &doc.case_results_details {
            self.merged.add_case(case);
            self.merged
                .case_results_details
                .entry(case.clone())
                .or_default();

            for (model, entry) in &block.absolute_scores {
                self.merged.add_model(model);
                let cell = (CellKind::DetailScore, case.clone(), model.clone());
                let slot = &mut self.merged.case_results_details[case].absolute_scores;
                merge_cell(
                    self.policy,
                    &mut self.origins,
                    &mut self.conflicted,
                    slot,
                    cell,
                    entry,
                    source,
                )?;
            }

            for (model, metrics) in &block.model_metrics {
                self.merged.add_model(model);
                let cell = (CellKind::Metrics, case.clone(), model.clone());
                let slot = &mut self.merged.case_results_details[case].model_metrics;
                merge_cell(
                    self.policy,
                    &mut self.origins,
                    &mut self.conflicted,
                    slot,
                    cell,
                    metrics,
                    source,
                )?;
            }
        }

        Ok(())
    }

    /// Parse and merge each file in order. The first unparsable file aborts.
    pub fn merge_files(&mut self, files: &[PathBuf]) -> Result<()> {
        for path in files {
            let doc = ResultDocument::load(path)?;
            debug!(
                path = %path.display(),
                models = doc.models.len(),
                cases = doc.cases.len(),
                "merge_file"
            );
            self.merge(path, &doc)?;
        }
        Ok(())
    }

    pub fn finish(self) -> ResultDocument {
        self.merged
    }
}

fn merge_cell<T: Clone + PartialEq>(
    policy: ConflictPolicy,
    origins: &mut HashMap<(CellKind, String, String), PathBuf>,
    conflicted: &mut HashSet<(String, String)>,
    slot: &mut IndexMap<String, T>,
    cell: (CellKind, String, String),
    value: &T,
    source: &Path,
) -> Result<()> {
    let model = &cell.2;
    let Some(existing) = slot.get(model) else {
        slot.insert(model.clone(), value.clone());
        origins.insert(cell, source.to_path_buf());
        return Ok(());
    };

    conflicted.insert((cell.1.clone(), model.clone()));
    let first = origins
        .get(&cell)
        .cloned()
        .unwrap_or_else(|| source.to_path_buf());

    match policy {
        ConflictPolicy::LastWriteWins => {
            debug!(
                kind = cell.0.label(),
                case = %cell.1,
                model = %model,
                previous = %first.display(),
                winner = %source.display(),
                "overwrite_cell"
            );
            slot.insert(model.clone(), value.clone());
            origins.insert(cell, source.to_path_buf());
        }
        ConflictPolicy::FirstWriteWins => {
            debug!(
                kind = cell.0.label(),
                case = %cell.1,
                model = %model,
                kept = %first.display(),
                ignored = %source.display(),
                "keep_cell"
            );
        }
        ConflictPolicy::ErrorOnConflict => {
            if existing != value {
                return Err(BenchError::Conflict {
                    field: cell.0.label().to_string(),
                    case: cell.1,
                    model: cell.2,
                    first,
                    second: source.to_path_buf(),
                });
            }
        }
    }

    Ok(())
}

/// Discover, merge, and write every result file under `run_dir`.
///
/// Returns [`MergeOutcome::NoMatchingFiles`] without touching `output`
/// when the directory holds no result files.
#[tracing::instrument(skip(run_dir, output, policy), fields(run_dir = %run_dir.display(), output = %output.display(), policy = %policy))]
pub fn merge_run_dir(run_dir: &Path, output: &Path, policy: ConflictPolicy) -> Result<MergeOutcome> {
    let start = Instant::now();
    let files = discover_result_files(run_dir)?;
    trace_time!(start, "discover_result_files", files = files.len());

    if files.is_empty() {
        info!("no result files found");
        return Ok(MergeOutcome::NoMatchingFiles);
    }

    let mut merger = ResultMerger::new(policy);
    merger.merge_files(&files)?;
    let conflicts = merger.conflicts();
    let merged = merger.finish();

    merged.save(output)?;
    trace_time!(start, "merge_run_dir");
    info!(files = files.len(), conflicts, "merged run data");

    Ok(MergeOutcome::Merged(MergeSummary {
        models: merged.models.len(),
        cases: merged.cases.len(),
        files,
        conflicts,
        policy,
        output: output.to_path_buf(),
    }))
}
