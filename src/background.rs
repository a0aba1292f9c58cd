use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn, info_span, Instrument};
use crate::domain::models::events::AvailabilityEvent;
use crate::domain::services::cache::AvailabilityCache;

/// Evicts cached reports as writes land. Runs until every sender is gone.
pub async fn start_cache_invalidator(cache: Arc<AvailabilityCache>, mut events: broadcast::Receiver<AvailabilityEvent>) {
    info!("Starting availability cache invalidator...");

    loop {
        match events.recv().await {
            Ok(event) => {
                let span = info_span!("cache_invalidation", mentor_id = %event.mentor_id());
                async {
                    info!(?event, "Availability changed");
                    cache.invalidate(event.mentor_id());
                }
                    .instrument(span)
                    .await;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Invalidator lagged behind by {} events, clearing cache", skipped);
                cache.clear();
            }
            Err(RecvError::Closed) => {
                info!("Availability event channel closed, stopping invalidator");
                break;
            }
        }
    }
}
