//! Process-lifetime registry of dynamically minted fields.
//!
//! The registry memoizes dynamic fields per (namespace, owner token) so that
//! repeated requests hand out clones of one allocation. Correctness does not
//! depend on the cache: a field built elsewhere for the same owner compares
//! equal, because field equality is name-derived.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;

use crate::config::OwnerPolicy;
use crate::field::{Field, FieldNamespace};

lazy_static! {
    static ref GLOBAL_REGISTRY: FieldRegistry = FieldRegistry::new();
}

/// Two distinct owners that map to the same owner token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCollision {
    pub token: String,
    pub first_owner: String,
    pub second_owner: String,
}

#[derive(Default)]
struct RegistryState {
    fields: HashMap<(FieldNamespace, String), Field>,
    /// First raw owner seen for each token (tracked for collision reports).
    owners: HashMap<String, String>,
    collisions: Vec<OwnerCollision>,
}

/// Mints and deduplicates dynamic fields.
#[derive(Default)]
pub struct FieldRegistry {
    policy: OwnerPolicy,
    state: RwLock<RegistryState>,
}

impl FieldRegistry {
    /// Create a registry that uses owners verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an explicit owner policy.
    pub fn with_policy(policy: OwnerPolicy) -> Self {
        Self {
            policy,
            state: RwLock::default(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static FieldRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn policy(&self) -> OwnerPolicy {
        self.policy
    }

    /// The summary field of `owner`.
    pub fn dynamic_field(&self, owner: &str) -> Field {
        self.dynamic_field_in(FieldNamespace::Summary, owner)
    }

    /// The note field of `owner`.
    pub fn user_note_field(&self, owner: &str) -> Field {
        self.dynamic_field_in(FieldNamespace::UserNote, owner)
    }

    /// The field of `owner` in `namespace`, minted on first request.
    pub fn dynamic_field_in(&self, namespace: FieldNamespace, owner: &str) -> Field {
        let key = (namespace, self.policy.token(owner));

        // Raw tokens are the owners themselves, so a cache hit needs no
        // collision bookkeeping.
        if self.policy == OwnerPolicy::Raw {
            if let Some(field) = self.read().fields.get(&key) {
                return field.clone();
            }
        }

        let mut state = self.write();
        Self::track_owner(&mut state, &key.1, owner);

        // Another thread may have minted it between the two locks.
        if let Some(field) = state.fields.get(&key) {
            return field.clone();
        }

        let field = Field::dynamic(namespace, &key.1);
        tracing::debug!(field = field.name(), "minted dynamic field");
        state.fields.insert(key, field.clone());
        field
    }

    /// Number of minted fields.
    pub fn len(&self) -> usize {
        self.read().fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().fields.is_empty()
    }

    /// All minted fields, sorted by name.
    pub fn minted(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.read().fields.values().cloned().collect();
        fields.sort();
        fields
    }

    /// Owner collisions observed so far (only possible with
    /// [`OwnerPolicy::Normalized`]).
    pub fn collisions(&self) -> Vec<OwnerCollision> {
        self.read().collisions.clone()
    }

    fn track_owner(state: &mut RegistryState, token: &str, owner: &str) {
        match state.owners.get(token) {
            None => {
                state.owners.insert(token.to_string(), owner.to_string());
            }
            Some(first) if first != owner => {
                tracing::warn!(
                    token,
                    first_owner = first.as_str(),
                    second_owner = owner,
                    "distinct owners share one field token"
                );
                let collision = OwnerCollision {
                    token: token.to_string(),
                    first_owner: first.clone(),
                    second_owner: owner.to_string(),
                };
                if !state.collisions.contains(&collision) {
                    state.collisions.push(collision);
                }
            }
            Some(_) => {}
        }
    }

    // A panic while holding the lock cannot leave the maps half-updated, so
    // poisoned locks are recovered.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("policy", &self.policy)
            .field("minted", &self.len())
            .finish()
    }
}
