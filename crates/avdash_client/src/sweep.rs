use avdash_core::retain_unfinished;
use dash_logging::dash_info;

use crate::{ClientError, Controller};

/// One-shot "clear completed items" sweep over the priority list, run when
/// the control view loads.
///
/// Read-modify-write against server-held state with no transactional
/// guarantee: a concurrent operator edit can race this write. Accepted; the
/// filter is idempotent and the write is skipped entirely when nothing
/// changed, which bounds the damage of duplicate sweeps.
///
/// Returns how many entries were removed.
pub async fn sweep_completed(controller: &dyn Controller) -> Result<usize, ClientError> {
    let paths = controller.priority_list().await?;
    let snapshot = controller.pipeline_snapshot().await?;

    match retain_unfinished(&paths, &snapshot) {
        None => Ok(0),
        Some(filtered) => {
            let removed = paths.len() - filtered.len();
            dash_info!("priority sweep: removing {removed} completed entries");
            controller.set_priority_list(&filtered).await?;
            Ok(removed)
        }
    }
}
