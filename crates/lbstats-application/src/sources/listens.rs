//! Total listen count adapter

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lbstats_domain::error::{Result, SourceKind};
use lbstats_domain::value_objects::{AggregateKind, AggregateRequest};

use super::backing_error;
use crate::ports::providers::{BackingSource, ListenCountStore, SourceValue};

/// Serves `ListenCount` from the listen store
#[derive(Clone)]
pub struct ListenCountAdapter {
    store: Arc<dyn ListenCountStore>,
}

impl ListenCountAdapter {
    pub fn new(store: Arc<dyn ListenCountStore>) -> Self {
        Self { store }
    }
}

impl fmt::Debug for ListenCountAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenCountAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl BackingSource for ListenCountAdapter {
    fn kinds(&self) -> &'static [AggregateKind] {
        &[AggregateKind::ListenCount]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::ListenStore
    }

    async fn fetch(&self, _request: &AggregateRequest) -> Result<SourceValue> {
        self.store
            .total_listen_count()
            .await
            .map(SourceValue::Count)
            .map_err(|e| backing_error(SourceKind::ListenStore, "Listen count query failed", e))
    }
}
