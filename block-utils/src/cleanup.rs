use twilight_model::id::{Id, marker::MessageMarker};

const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;
const BULK_DELETE_SAFETY_BUFFER_SECS: u64 = 60 * 60;

/// Most messages a single bulk-delete request accepts.
pub const BULK_DELETE_CHUNK: usize = 100;
/// Fewest messages a single bulk-delete request accepts.
pub const BULK_DELETE_MIN: usize = 2;

/// Message ids split by how they can be deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeletePlan {
    /// Chunks of 2..=100 ids young enough for bulk deletion.
    pub bulk: Vec<Vec<Id<MessageMarker>>>,
    /// Ids that must be deleted one by one.
    pub single: Vec<Id<MessageMarker>>,
}

impl DeletePlan {
    pub fn total(&self) -> usize {
        self.bulk.iter().map(Vec::len).sum::<usize>() + self.single.len()
    }
}

/// Oldest timestamp (Unix seconds) still eligible for bulk deletion.
pub fn bulk_delete_cutoff(now_secs: u64) -> i64 {
    let window = BULK_DELETE_MAX_AGE_SECS.saturating_sub(BULK_DELETE_SAFETY_BUFFER_SECS);
    i64::try_from(now_secs.saturating_sub(window)).unwrap_or(i64::MAX)
}

/// Split `(id, sent_at_secs)` pairs into bulk chunks and single deletes.
pub fn plan_deletion(
    messages: impl IntoIterator<Item = (Id<MessageMarker>, i64)>,
    now_secs: u64,
) -> DeletePlan {
    let cutoff = bulk_delete_cutoff(now_secs);
    let mut bulk_candidate_ids: Vec<Id<MessageMarker>> = Vec::new();
    let mut plan = DeletePlan::default();

    for (id, sent_at) in messages {
        if sent_at >= cutoff {
            bulk_candidate_ids.push(id);
        } else {
            plan.single.push(id);
        }
    }

    for chunk in bulk_candidate_ids.chunks(BULK_DELETE_CHUNK) {
        if chunk.len() < BULK_DELETE_MIN {
            plan.single.extend_from_slice(chunk);
        } else {
            plan.bulk.push(chunk.to_vec());
        }
    }

    plan
}
