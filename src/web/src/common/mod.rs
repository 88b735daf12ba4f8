pub mod default_handler;

use crate::AppData;
use log::warn;
use std::sync::Arc;

/// Writes the store back to disk without blocking the response. The
/// mutation already succeeded; a failed write is logged and never
/// surfaced to the caller.
pub fn persist_in_background(state: &AppData) {
    let store = Arc::clone(&state.store);

    tokio::spawn(async move {
        if let Err(err) = store.persist().await {
            warn!("store persist failed: {}", err);
        }
    });
}
