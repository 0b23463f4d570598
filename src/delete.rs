//! Removal of confirmed candidates.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::repo::PathResolver;
use crate::scanner::Candidate;

/// What came of a deletion pass.
#[derive(Default)]
pub struct DeleteSummary {
    /// Folders removed, including those already gone because a candidate
    /// ancestor was removed first.
    pub removed: usize,
    /// Bytes reclaimed, per the sizes reported during the scan.
    pub bytes_reclaimed: u64,
    /// Folders that could not be removed, with the error for each. These
    /// were already shown to the user as candidates, so they must be
    /// surfaced rather than dropped.
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Delete every candidate folder and its contents.
///
/// Candidates arrive in discovery order, so a stale parent can precede a
/// stale folder nested inside it; `remove_dir_all` on the parent takes the
/// child with it and the child's own removal then reports `NotFound`,
/// which counts as removed. `remove_dir_all` does not follow symlinks, so
/// nothing outside the candidate folder is ever touched.
pub fn delete_candidates(resolver: &PathResolver, candidates: &[Candidate]) -> DeleteSummary {
    let mut summary = DeleteSummary::default();

    for candidate in candidates {
        let abs = resolver.abs_path(Some(&candidate.rel_path));
        match fs::remove_dir_all(&abs) {
            Ok(()) => {
                summary.removed += 1;
                summary.bytes_reclaimed += candidate.size;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                // Already removed together with a candidate ancestor
                summary.removed += 1;
                summary.bytes_reclaimed += candidate.size;
            }
            Err(err) => {
                log::warn!("failed to remove {}: {}", abs.display(), err);
                summary.failures.push((abs, err));
            }
        }
    }

    summary
}
