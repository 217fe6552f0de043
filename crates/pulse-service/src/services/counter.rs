//! Counter reconciliation service
//!
//! The record store has no atomic increment, so every counter change is a
//! read-modify-write: read the current value, clamp the new value at zero,
//! write it back. Two concurrent adjusters can interleave between the read
//! and the write and one update is then lost (last write wins on the value
//! it read). That race is a documented property of the storage model, not
//! something this layer papers over.

use tracing::{debug, instrument};

use pulse_core::RecordId;
use pulse_store::repositories::error::entity_not_found;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Counter reconciliation service
pub struct CounterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CounterService<'a> {
    /// Create a new CounterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Adjust a counter field by `delta`, flooring the result at zero.
    /// Returns the value written back.
    ///
    /// Fails with the entity's not-found error when the record is missing.
    #[instrument(skip(self))]
    pub async fn adjust(
        &self,
        collection: &str,
        id: RecordId,
        field: &str,
        delta: i64,
    ) -> ServiceResult<i64> {
        let current = self
            .ctx
            .counter_store()
            .read_counter(collection, id, field)
            .await?
            .ok_or_else(|| entity_not_found(collection, id))?;

        let new_value = (current + delta).max(0);

        self.ctx
            .counter_store()
            .write_counter(collection, id, field, new_value)
            .await?;

        debug!(
            collection = collection,
            id = %id,
            field = field,
            from = current,
            to = new_value,
            "Counter adjusted"
        );

        Ok(new_value)
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end in the integration test member; the floor-at-zero
    // and missing-record paths are exercised there against the memory store.
}
