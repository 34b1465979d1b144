//! The event source collaborator.

use async_trait::async_trait;

use crate::error::ScheduleResult;
use crate::event::Event;

/// Supplies a fresh, ordered event list on demand.
///
/// One call per refresh cycle; there is no partial or incremental fetch. On
/// failure the caller keeps its existing model untouched.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self) -> ScheduleResult<Vec<Event>>;
}
