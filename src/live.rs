//! Push-style snapshots of a collection.
//!
//! A live query re-runs its query after every change the actor publishes and
//! hands the result to a `watch` channel, so readers always see the latest
//! filtered, ordered list.

use tokio::sync::{broadcast::error::RecvError, watch};
use tracing::{debug, warn};
use crate::actor_framework::{Entity, FrameworkError, Query, ResourceClient};

/// Starts a live query. The first snapshot is loaded before this returns.
///
/// The background task ends when every receiver is dropped or the actor
/// shuts down; it never keeps the actor alive on its own.
pub async fn live_query<T, F>(
    client: &ResourceClient<T>,
    make_query: F,
) -> Result<watch::Receiver<Vec<T>>, FrameworkError<T::Error>>
where
    T: Entity,
    F: Fn() -> Query<T> + Send + Sync + 'static,
{
    // Subscribe before the first read so no change slips between the two.
    let mut changes = client.subscribe();
    let initial = client.query(make_query()).await?;
    let (tx, rx) = watch::channel(initial);
    let weak = client.downgrade();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                change = changes.recv() => match change {
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => debug!(missed, "Live query lagged, refreshing"),
                    Err(RecvError::Closed) => break,
                },
            }
            match weak.query(make_query()).await {
                Ok(items) => {
                    if tx.send(items).is_err() {
                        break;
                    }
                }
                Err(FrameworkError::ActorClosed) | Err(FrameworkError::ActorDropped) => break,
                Err(e) => warn!(error = %e, "Live query refresh failed"),
            }
        }
        debug!("Live query stopped");
    });

    Ok(rx)
}
