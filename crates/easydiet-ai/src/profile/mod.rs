//! Nutrition profile: the closed field set, the diffing engine, and
//! the persistence seam.
//!
//! The engine itself is stateless; `parse_candidate`, `diff`, and
//! `render_context` are pure functions, so profile mutation reduces to
//! the store atomically applying whatever update set `diff` returns.

mod engine;

pub use engine::{diff, parse_candidate, render_context};

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use easydiet_common::StoreError;

/// The closed set of profile fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FitnessGoals,
    DietaryRestrictions,
}

impl ProfileField {
    pub const ALL: [ProfileField; 2] = [ProfileField::FitnessGoals, ProfileField::DietaryRestrictions];

    /// Wire/storage key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::FitnessGoals => "fitness_goals",
            ProfileField::DietaryRestrictions => "dietary_restrictions",
        }
    }

    /// Human-readable label used when rendering profile context.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FitnessGoals => "Fitness Goals",
            ProfileField::DietaryRestrictions => "Dietary Restrictions",
        }
    }
}

/// Fields whose value genuinely changed, keyed in declared field order.
pub type UpdateSet = BTreeMap<ProfileField, String>;

/// A user's stored profile. A `None` or empty field means
/// "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub fitness_goals: Option<String>,
    pub dietary_restrictions: Option<String>,
}

impl Profile {
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::FitnessGoals => self.fitness_goals.as_deref(),
            ProfileField::DietaryRestrictions => self.dietary_restrictions.as_deref(),
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::FitnessGoals => self.fitness_goals = Some(value),
            ProfileField::DietaryRestrictions => self.dietary_restrictions = Some(value),
        }
    }

    /// Merge-patch an update set into this profile. Fields absent from
    /// the set are left untouched; absence means "no opinion", not
    /// "clear this field".
    pub fn apply(&mut self, updates: &UpdateSet) {
        for (field, value) in updates {
            self.set(*field, value.clone());
        }
    }
}

/// Per-user profile storage. `apply_update` must be atomic: either the
/// whole update set lands or none of it does.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The stored profile, or the empty default for a new user.
    async fn profile(&self, user_id: &str) -> Result<Profile, StoreError>;

    /// Atomically merge an update set and return the resulting profile.
    async fn apply_update(&self, user_id: &str, updates: &UpdateSet)
        -> Result<Profile, StoreError>;
}

/// In-memory `ProfileStore` for tests and single-process embedders.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned().unwrap_or_default())
    }

    async fn apply_update(
        &self,
        user_id: &str,
        updates: &UpdateSet,
    ) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id.to_string()).or_default();
        profile.apply(updates);
        Ok(profile.clone())
    }
}
