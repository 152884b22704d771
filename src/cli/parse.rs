//! Value parsers for CLI arguments

use std::str::FromStr;

use vibebench_core::merge::ConflictPolicy;

/// Parse `--on-conflict`, reporting the accepted spellings on failure
pub fn parse_conflict_policy(s: &str) -> Result<ConflictPolicy, String> {
    ConflictPolicy::from_str(s).map_err(|_| {
        format!(
            "unknown conflict policy '{}' (expected: last-write-wins, first-write-wins, error)",
            s
        )
    })
}
