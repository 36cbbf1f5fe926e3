//! Relational user count adapter

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lbstats_domain::error::{Result, SourceKind};
use lbstats_domain::value_objects::{AggregateKind, AggregateRequest};

use super::backing_error;
use crate::ports::providers::{BackingSource, SourceValue, UserCountStore};

/// Serves `UserCount` from the relational store
#[derive(Clone)]
pub struct RelationalCountAdapter {
    store: Arc<dyn UserCountStore>,
}

impl RelationalCountAdapter {
    pub fn new(store: Arc<dyn UserCountStore>) -> Self {
        Self { store }
    }
}

impl fmt::Debug for RelationalCountAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationalCountAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl BackingSource for RelationalCountAdapter {
    fn kinds(&self) -> &'static [AggregateKind] {
        &[AggregateKind::UserCount]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Relational
    }

    async fn fetch(&self, _request: &AggregateRequest) -> Result<SourceValue> {
        self.store
            .count_users()
            .await
            .map(SourceValue::Count)
            .map_err(|e| backing_error(SourceKind::Relational, "User count query failed", e))
    }
}
