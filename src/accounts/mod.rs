pub mod lookup_table;
pub mod resolver;

use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::types::serialize_pubkey;

/// Outcome of a bounds-checked lookup into a [`ResolvedAccountList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountRef {
    Resolved {
        index: usize,
        #[serde(serialize_with = "serialize_pubkey")]
        key: Pubkey,
    },
    OutOfRange {
        index: usize,
    },
}

impl AccountRef {
    pub fn key(&self) -> Option<&Pubkey> {
        match self {
            Self::Resolved { key, .. } => Some(key),
            Self::OutOfRange { .. } => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Resolved { index, .. } | Self::OutOfRange { index } => *index,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// The flat addressing space of a v0 transaction.
///
/// Static keys come first, then for every lookup table in message order its
/// writable addresses followed by its readonly addresses. Built once per
/// transaction and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAccountList(Vec<Pubkey>);

impl ResolvedAccountList {
    pub fn new(static_keys: Vec<Pubkey>) -> Self {
        Self(static_keys)
    }

    /// Build the list from addresses an RPC node already loaded, skipping the table fetch.
    pub fn from_loaded_addresses(
        static_keys: &[Pubkey],
        writable: &[Pubkey],
        readonly: &[Pubkey],
    ) -> Self {
        let mut keys = Vec::with_capacity(static_keys.len() + writable.len() + readonly.len());
        keys.extend_from_slice(static_keys);
        keys.extend_from_slice(writable);
        keys.extend_from_slice(readonly);
        Self(keys)
    }

    pub(crate) fn push(&mut self, key: Pubkey) {
        self.0.push(key);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Pubkey] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Pubkey> {
        self.0.get(index)
    }

    pub fn account_at(&self, index: usize) -> AccountRef {
        match self.0.get(index) {
            Some(key) => AccountRef::Resolved { index, key: *key },
            None => {
                tracing::warn!(index, len = self.0.len(), "account index out of range");
                AccountRef::OutOfRange { index }
            }
        }
    }

    /// Resolve every index in order; out-of-range entries are kept as markers.
    pub fn resolve_indexes(&self, indexes: &[u8]) -> Vec<AccountRef> {
        indexes
            .iter()
            .map(|&idx| self.account_at(usize::from(idx)))
            .collect()
    }
}
