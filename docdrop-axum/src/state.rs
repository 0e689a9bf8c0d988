use std::sync::Arc;

use docdrop_blob::StorageRouter;

/// Shared handler state: the storage router plus the request size bound
#[derive(Clone)]
pub struct DocDropState {
    pub storage: Arc<StorageRouter>,
    pub max_request_bytes: usize,
}

impl DocDropState {
    pub fn new(storage: Arc<StorageRouter>, max_request_bytes: usize) -> Self {
        Self {
            storage,
            max_request_bytes,
        }
    }
}
