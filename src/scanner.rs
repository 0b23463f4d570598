//! Depth-first repository scanning and candidate selection.
//!
//! The scan is a single recursive pass. Going down, a folder holding a
//! `.pom` descriptor is evaluated for staleness; coming back up, each call
//! reports whether its folder ended up slated for removal so that a parent
//! emptied entirely by its children's selection can itself become a
//! pruning candidate. Nothing is ever visited twice.

use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::ignore::IgnoreRule;
use crate::repo::{rel_display, PathResolver};
use crate::report::approx_size;
use crate::threshold::{format_access_time, StaleCutoff};

/// File extension marking a folder as holding one artifact version.
pub const DESCRIPTOR_EXT: &str = "pom";

/// Runtime flags controlling scan behavior.
#[derive(Clone, Copy, Default)]
pub struct ScanOptions {
    /// Also select folders left empty once every entry inside them is a
    /// removal candidate.
    pub prune: bool,
    /// Print the per-file access times behind each stale candidate.
    pub verbose: bool,
}

/// Why a folder was selected for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Holds a descriptor and was last accessed before the cutoff.
    StaleArtifact,
    /// Contained no entries at all.
    Empty,
    /// Every entry is itself a removal candidate.
    EmptyAfterRemoval,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::StaleArtifact => write!(f, "stale artifact"),
            Reason::Empty => write!(f, "empty"),
            Reason::EmptyAfterRemoval => write!(f, "empty after removal"),
        }
    }
}

/// A folder slated for removal.
pub struct Candidate {
    /// Repository-relative path; the folder's identity for the whole run.
    pub rel_path: PathBuf,
    pub reason: Reason,
    /// Sum of the folder's direct file sizes. Zero for pruning candidates,
    /// which by construction hold no files of their own.
    pub size: u64,
    /// Most recent access among the folder's direct files. Absent for
    /// pruning candidates.
    pub last_access: Option<SystemTime>,
}

/// Everything a completed scan produced.
#[derive(Default)]
pub struct ScanResult {
    /// Candidates in discovery order.
    pub candidates: Vec<Candidate>,
    /// Sum of all candidate sizes.
    pub total_bytes: u64,
}

/// Outcome of scanning one folder, merged upward by the caller. This is
/// the only state that travels between recursion levels.
#[derive(Default)]
struct FolderScan {
    candidates: Vec<Candidate>,
    total_bytes: u64,
    /// Whether this folder itself ended up in the candidate set.
    removable: bool,
}

impl FolderScan {
    /// Fold a child folder's outcome into this one, returning whether the
    /// child itself is going away.
    fn absorb(&mut self, child: FolderScan) -> bool {
        let child_removable = child.removable;
        self.candidates.extend(child.candidates);
        self.total_bytes += child.total_bytes;
        child_removable
    }
}

/// The depth-first traversal driving selection and pruning.
pub struct Scanner<'a> {
    resolver: &'a PathResolver,
    ignore: &'a IgnoreRule,
    cutoff: &'a StaleCutoff,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(
        resolver: &'a PathResolver,
        ignore: &'a IgnoreRule,
        cutoff: &'a StaleCutoff,
        options: ScanOptions,
    ) -> Self {
        Self {
            resolver,
            ignore,
            cutoff,
            options,
        }
    }

    /// Walk the repository from its root and collect removal candidates.
    pub fn scan(&self) -> Result<ScanResult> {
        let outcome = self.scan_folder(None)?;
        Ok(ScanResult {
            candidates: outcome.candidates,
            total_bytes: outcome.total_bytes,
        })
    }

    /// Scan one folder (`None` = the repository root).
    ///
    /// Entry enumeration order is whatever the filesystem yields; callers
    /// must not rely on sibling ordering beyond discovery order.
    fn scan_folder(&self, rel: Option<&Path>) -> Result<FolderScan> {
        let abs = self.resolver.abs_path(rel);
        let mut out = FolderScan::default();

        let entries = match fs::read_dir(&abs) {
            Ok(entries) => entries,
            Err(err) => {
                // Skip-and-report: an unreadable folder yields no
                // candidates and blocks pruning of its parent.
                log::warn!("skipping unreadable folder {}: {}", abs.display(), err);
                return Ok(out);
            }
        };

        let mut entry_count = 0usize;
        let mut removable_children = 0usize;
        let mut descriptor_checked = false;

        for entry in entries {
            entry_count += 1;

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry in {}: {}", abs.display(), err);
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    log::warn!(
                        "skipping {}: could not determine entry type: {}",
                        entry.path().display(),
                        err
                    );
                    continue;
                }
            };

            if file_type.is_dir() {
                let child_rel = PathResolver::child_rel(rel, &entry.file_name());
                if self.ignore.matches(&child_rel) {
                    // Never look inside: the subtree stays invisible to
                    // both selection and pruning.
                    log::debug!("ignoring {}", rel_display(&child_rel));
                    continue;
                }
                let child = self.scan_folder(Some(&child_rel))?;
                if out.absorb(child) {
                    removable_children += 1;
                }
            } else if file_type.is_file() && !descriptor_checked {
                let name = entry.file_name();
                if Path::new(&name).extension().is_some_and(|ext| ext == DESCRIPTOR_EXT) {
                    // At most one evaluation per folder, however many
                    // descriptor files it holds.
                    descriptor_checked = true;
                    // The root itself is never a candidate.
                    if let Some(rel) = rel {
                        if let Some(candidate) = self.evaluate_artifact(rel, &abs) {
                            out.total_bytes += candidate.size;
                            out.candidates.push(candidate);
                            out.removable = true;
                        }
                    }
                }
            }
            // Symlinks and other entry kinds still count against pruning
            // but are neither descended into nor stat'ed.
        }

        if self.options.prune && !out.removable {
            if let Some(rel) = rel {
                let reason = if entry_count == 0 {
                    Some(Reason::Empty)
                } else if removable_children == entry_count {
                    Some(Reason::EmptyAfterRemoval)
                } else {
                    None
                };

                if let Some(reason) = reason {
                    println!("- {} ({})", rel_display(rel), reason);
                    out.candidates.push(Candidate {
                        rel_path: rel.to_path_buf(),
                        reason,
                        size: 0,
                        last_access: None,
                    });
                    out.removable = true;
                }
            }
        }

        Ok(out)
    }

    /// Decide whether one artifact folder qualifies for removal, and
    /// report it when it does. Not qualifying is not an error.
    fn evaluate_artifact(&self, rel: &Path, abs: &Path) -> Option<Candidate> {
        let last_access = most_recent_access(abs);
        if !self.cutoff.is_stale(last_access) {
            return None;
        }

        let size = folder_size(abs);
        println!("- {} ({})", rel_display(rel), approx_size(size));
        if self.options.verbose {
            self.print_file_access_times(abs);
        }

        Some(Candidate {
            rel_path: rel.to_path_buf(),
            reason: Reason::StaleArtifact,
            size,
            last_access,
        })
    }

    /// Verbose-mode detail: the per-file access times the folder's
    /// timestamp was derived from.
    fn print_file_access_times(&self, abs: &Path) {
        for (name, accessed) in file_access_times(abs) {
            println!("    {} last accessed {}", name, format_access_time(accessed));
        }
    }
}

/// Most recent access time among a folder's direct file children, or
/// `None` when the folder holds no files. Does not recurse: one folder is
/// one artifact version with its files directly inside.
pub fn most_recent_access(abs: &Path) -> Option<SystemTime> {
    file_access_times(abs)
        .into_iter()
        .map(|(_, accessed)| accessed)
        .max()
}

/// Sum of the byte sizes of a folder's direct file children. A folder with
/// no files has size zero; this never fails outright.
pub fn folder_size(abs: &Path) -> u64 {
    let entries = match fs::read_dir(abs) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("could not size {}: {}", abs.display(), err);
            return 0;
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let metadata = fs::symlink_metadata(entry.path()).ok()?;
            metadata.is_file().then(|| metadata.len())
        })
        .sum()
}

/// Access times of a folder's direct file children, with their names.
fn file_access_times(abs: &Path) -> Vec<(String, SystemTime)> {
    let entries = match fs::read_dir(abs) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("could not read {}: {}", abs.display(), err);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let metadata = fs::symlink_metadata(entry.path()).ok()?;
            if !metadata.is_file() {
                return None;
            }
            let accessed = match metadata.accessed() {
                Ok(accessed) => accessed,
                Err(err) => {
                    log::warn!(
                        "no access time for {}: {}",
                        entry.path().display(),
                        err
                    );
                    return None;
                }
            };
            Some((entry.file_name().to_string_lossy().into_owned(), accessed))
        })
        .collect()
}
