//! m2clean - stale dependency removal for local Maven repositories.
//!
//! m2clean walks a Maven-style repository (a folder hierarchy where each
//! version folder directly contains a `.pom` descriptor and its artifact
//! files) and reports folders that have not been accessed since before a
//! configurable cutoff. Optionally it deletes them after confirmation, and
//! can prune folders left with nothing but removal candidates inside.
//!
//! ## Architecture
//!
//! The whole scan is a single depth-first pass ([`scanner::Scanner`]):
//! descriptor detection and staleness selection happen on the way down,
//! while the "everything in this folder is going away" signal needed for
//! pruning propagates back up through each recursion's return value. There
//! is no second pass over the filesystem and no state shared between
//! recursive calls; every call returns its own merged result.

pub mod delete;
pub mod ignore;
pub mod repo;
pub mod report;
pub mod scanner;
pub mod threshold;

// Re-export commonly used items
pub use delete::{delete_candidates, DeleteSummary};
pub use ignore::IgnoreRule;
pub use repo::{default_repo_root, rel_display, PathResolver};
pub use report::approx_size;
pub use scanner::{Candidate, Reason, ScanOptions, ScanResult, Scanner};
pub use threshold::{format_access_time, StaleCutoff};
