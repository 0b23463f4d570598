//! Ignore-rule matching for repository folders.
//!
//! Matched folders are excluded from candidacy and from pruning, and their
//! subtrees are never descended into. Because the check happens before
//! recursion, a single gate covers both "never select" and "never look
//! inside"; ignored content is completely invisible to the scan.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

use crate::repo::rel_display;

/// Folder exclusion rule. The leading-dot rule (any folder whose name
/// starts with `.`) always applies; a user-supplied pattern is OR-ed with
/// it.
#[derive(Debug)]
pub enum IgnoreRule {
    /// Only the leading-dot rule applies.
    DotOnly,
    /// A user pattern, matched unanchored against the `/`-separated
    /// repository-relative path, in addition to the leading-dot rule.
    Pattern(Regex),
}

impl IgnoreRule {
    /// Build a rule from an optional user pattern. A malformed pattern is
    /// a configuration error and must abort the run before any scanning.
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            None => Ok(Self::DotOnly),
            Some(pattern) => {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("invalid ignore pattern: {}", pattern))?;
                Ok(Self::Pattern(regex))
            }
        }
    }

    /// Test a repository-relative folder path against the rule.
    pub fn matches(&self, rel: &Path) -> bool {
        if let Some(name) = rel.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                return true;
            }
        }

        match self {
            Self::DotOnly => false,
            Self::Pattern(regex) => regex.is_match(&rel_display(rel)),
        }
    }
}
