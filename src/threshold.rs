//! Staleness cutoff computation and comparison.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Months, NaiveDate};
use std::time::SystemTime;

/// The point in time before which a folder's most recent access must fall
/// for the folder to count as stale.
pub struct StaleCutoff {
    cutoff: SystemTime,
    cutoff_date: DateTime<Local>,
}

impl StaleCutoff {
    /// Cutoff at N calendar months before now.
    pub fn months_before_now(months: u32) -> Result<Self> {
        let now = Local::now();
        let cutoff_date = now
            .checked_sub_months(Months::new(months))
            .context("cutoff date out of range")?;
        Ok(Self {
            cutoff: cutoff_date.into(),
            cutoff_date,
        })
    }

    /// Cutoff at an explicit instant.
    pub fn at(cutoff: SystemTime) -> Self {
        Self {
            cutoff,
            cutoff_date: DateTime::<Local>::from(cutoff),
        }
    }

    /// Whether a folder with the given most-recent access time is stale.
    ///
    /// An absent access time means the folder holds no files at all; such
    /// a folder is treated as not stale rather than never-accessed, so an
    /// all-directories folder can never be selected on staleness grounds.
    pub fn is_stale(&self, last_access: Option<SystemTime>) -> bool {
        match last_access {
            Some(time) => time < self.cutoff,
            None => false,
        }
    }

    /// Calendar date of the cutoff, for report headers.
    pub fn date(&self) -> NaiveDate {
        self.cutoff_date.date_naive()
    }
}

/// Format a file access time for verbose report output.
pub fn format_access_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
