//! Insertion-ordered registries keyed by identifier.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, DomainError, ErrorCode, GroupId};

use super::records::{Group, Light, Scene, Schedule};
use super::update::{LightEnvelope, LightUpdate};

/// A record that can live in a [`Registry`].
pub trait RegistryRecord: Clone {
    type Id: Clone + Debug + Eq + Hash;

    fn id(&self) -> &Self::Id;

    /// Display name used for sorting.
    fn name(&self) -> &str;
}

/// Mapping from id to record that remembers first-insertion order.
///
/// Sorting by name is stable with respect to that order, so two records with
/// the same display name always appear in the order they were first added.
#[derive(Debug, Clone)]
pub struct Registry<T: RegistryRecord> {
    entries: HashMap<T::Id, (u64, T)>,
    next_seq: u64,
}

impl<T: RegistryRecord> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Inserts or replaces a record. Replacing keeps the original position.
    pub fn upsert(&mut self, record: T) {
        if let Some((_, existing)) = self.entries.get_mut(record.id()) {
            *existing = record;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(record.id().clone(), (seq, record));
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entries.get(id).map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.entries.get_mut(id).map(|(_, record)| record)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in first-insertion order.
    pub fn in_insertion_order(&self) -> Vec<T> {
        let mut ordered: Vec<&(u64, T)> = self.entries.values().collect();
        ordered.sort_by_key(|(seq, _)| *seq);
        ordered.into_iter().map(|(_, record)| record.clone()).collect()
    }

    /// Records sorted by case-sensitive name, ties in insertion order.
    pub fn sorted_by_name(&self) -> Vec<T> {
        let mut sorted = self.in_insertion_order();
        // `sort_by` is stable, which preserves insertion order on ties.
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(|(_, record)| record)
    }
}

impl<T: RegistryRecord> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RegistryRecord> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for record in iter {
            registry.upsert(record);
        }
        registry
    }
}

impl<T: RegistryRecord + Serialize> Serialize for Registry<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.in_insertion_order().serialize(serializer)
    }
}

impl<'de, T: RegistryRecord + DeserializeOwned> Deserialize<'de> for Registry<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<T>::deserialize(deserializer)?;
        Ok(records.into_iter().collect())
    }
}

/// All domain registries owned by the shared state store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registries {
    #[serde(default)]
    pub lights: Registry<Light>,
    #[serde(default)]
    pub groups: Registry<Group>,
    #[serde(default)]
    pub scenes: Registry<Scene>,
    #[serde(default)]
    pub schedules: Registry<Schedule>,
}

impl Registries {
    /// Takes a sorted point-in-time copy for page building.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            lights: self.lights.sorted_by_name(),
            groups: self.groups.sorted_by_name(),
            scenes: self.scenes.sorted_by_name(),
            schedules: self.schedules.sorted_by_name(),
            any_light_on: self.lights.values().any(|light| light.on),
        }
    }

    /// Folds a producer update into the stored records.
    ///
    /// Aggregate transitions (`FirstOn`/`LastOff`) carry no state of their
    /// own; they are derived from the individual lights.
    pub fn apply(&mut self, envelope: &LightEnvelope) -> Result<(), DomainError> {
        match &envelope.update {
            LightUpdate::OnOff(on) => self.light_mut(&envelope.light_id)?.on = *on,
            LightUpdate::Brightness(level) => {
                self.light_mut(&envelope.light_id)?.brightness = *level
            }
            LightUpdate::Color(color) => {
                self.light_mut(&envelope.light_id)?.color = Some(*color)
            }
            LightUpdate::GroupFirstOn(group_id) => self.group_mut(group_id)?.any_on = true,
            LightUpdate::GroupLastOff(group_id) => self.group_mut(group_id)?.any_on = false,
            LightUpdate::FirstOn | LightUpdate::LastOff => {}
        }
        Ok(())
    }

    fn light_mut(&mut self, id: &DeviceId) -> Result<&mut Light, DomainError> {
        self.lights.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::LightNotFound, format!("Light {} not found", id))
        })
    }

    fn group_mut(&mut self, id: &GroupId) -> Result<&mut Group, DomainError> {
        self.groups.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::GroupNotFound, format!("Group {} not found", id))
        })
    }
}

/// Sorted, immutable copy of the registries taken at session open.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub lights: Vec<Light>,
    pub groups: Vec<Group>,
    pub scenes: Vec<Scene>,
    pub schedules: Vec<Schedule>,
    pub any_light_on: bool,
}
