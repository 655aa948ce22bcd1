//! Non-interactive track listing.

use std::io::{self, Write};

use anyhow::Result;
use trackdash_core::Repository;

/// Prints one track per line: id, status, done/total tasks, iteration, title.
pub fn run(repo: &dyn Repository) -> Result<()> {
    let tracks = repo.list_tracks()?;

    let mut out = io::stdout().lock();
    for track in tracks {
        let iteration = track
            .iteration
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        writeln!(
            out,
            "{}\t{}\t{}/{}\t{}\t{}",
            track.id,
            track.status.label(),
            track.done_count,
            track.task_count,
            iteration,
            track.title
        )?;
    }
    Ok(())
}
