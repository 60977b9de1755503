use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GraphError, Result};
use crate::model::{Edge, Entity, Node};

pub type NodeContainer = EntitiesContainer<Node>;
pub type EdgeContainer = EntitiesContainer<Edge>;

/// Insertion-ordered set of ids. Used where only identity matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityIds<Id: Eq + Hash>(IndexSet<Id>);

impl<Id: Eq + Hash> Default for EntityIds<Id> {
    fn default() -> Self {
        Self(IndexSet::new())
    }
}

impl<Id: Eq + Hash + Clone> EntityIds<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already present.
    pub fn add(&mut self, id: Id) -> bool {
        self.0.insert(id)
    }

    pub fn has(&self, id: &Id) -> bool {
        self.0.contains(id)
    }

    pub fn remove(&mut self, id: &Id) -> bool {
        self.0.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<Id> {
        self.0.iter().cloned().collect()
    }

    /// Ids of `self` followed by the ids of `other` not already present.
    pub fn union(&self, other: &Self) -> Self {
        self.0.iter().chain(other.0.iter()).cloned().collect()
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.0.difference(&other.0).cloned().collect()
    }
}

impl<Id: Eq + Hash> FromIterator<Id> for EntityIds<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Id: Eq + Hash> Extend<Id> for EntityIds<Id> {
    fn extend<I: IntoIterator<Item = Id>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<Id: Eq + Hash> IntoIterator for EntityIds<Id> {
    type Item = Id;
    type IntoIter = indexmap::set::IntoIter<Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, Id: Eq + Hash> IntoIterator for &'a EntityIds<Id> {
    type Item = &'a Id;
    type IntoIter = indexmap::set::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

type SecondaryIndex<Id> = IndexMap<String, IndexSet<Id>>;

/// Ordered, id-keyed store of one entity kind with tag and type indexes.
///
/// In strict mode, inserting an existing id or removing a missing one is an
/// error. Otherwise inserts overwrite in place and removals of missing ids
/// are no-ops. Entities are only mutated through [`update`](Self::update),
/// which keeps the indexes in step.
#[derive(Clone)]
pub struct EntitiesContainer<T: Entity> {
    entities: IndexMap<T::Id, T>,
    by_tag: SecondaryIndex<T::Id>,
    by_type: SecondaryIndex<T::Id>,
    strict: bool,
}

impl<T: Entity> Default for EntitiesContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntitiesContainer<T> {
    pub fn new() -> Self {
        Self::with_strict(false)
    }

    pub fn with_strict(strict: bool) -> Self {
        Self {
            entities: IndexMap::new(),
            by_tag: IndexMap::new(),
            by_type: IndexMap::new(),
            strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Insert an entity. Strict mode rejects an id that is already present.
    pub fn add(&mut self, entity: T) -> Result<()> {
        if self.strict && self.entities.contains_key(entity.id()) {
            return Err(GraphError::duplicate(T::KIND, entity.id()));
        }
        self.insert(entity);
        Ok(())
    }

    /// Insert an entity, replacing any existing one with the same id
    /// regardless of mode. Returns the replaced entity.
    pub fn add_safe(&mut self, entity: T) -> Option<T> {
        self.insert(entity)
    }

    fn insert(&mut self, entity: T) -> Option<T> {
        let id = entity.id().clone();
        index_entity(&mut self.by_tag, &mut self.by_type, &entity);
        let previous = self.entities.insert(id, entity);
        if let Some(old) = &previous {
            // Drop index entries the replacement no longer carries.
            let current = &self.entities[old.id()];
            for tag in old.tags() {
                if !current.has_tag(tag) {
                    unindex_key(&mut self.by_tag, tag, old.id());
                }
            }
            if old.entity_type() != current.entity_type() {
                unindex_key(&mut self.by_type, old.entity_type(), old.id());
            }
        }
        previous
    }

    pub fn get(&self, id: &T::Id) -> Result<&T> {
        self.entities
            .get(id)
            .ok_or_else(|| GraphError::not_found(T::KIND, id))
    }

    pub fn maybe_get(&self, id: &T::Id) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.entities.contains_key(id)
    }

    /// Mutate a stored entity in place and re-index its tags and type.
    pub fn update<R>(&mut self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| GraphError::not_found(T::KIND, id))?;
        unindex_entity(&mut self.by_tag, &mut self.by_type, entity);
        let out = f(&mut *entity);
        index_entity(&mut self.by_tag, &mut self.by_type, entity);
        Ok(out)
    }

    /// Remove an entity and purge it from the indexes.
    ///
    /// Strict mode fails if the id is absent; otherwise a missing id yields
    /// `Ok(None)`.
    pub fn remove(&mut self, id: &T::Id) -> Result<Option<T>> {
        match self.entities.shift_remove(id) {
            Some(entity) => {
                unindex_entity(&mut self.by_tag, &mut self.by_type, &entity);
                Ok(Some(entity))
            }
            None if self.strict => Err(GraphError::not_found(T::KIND, id)),
            None => Ok(None),
        }
    }

    /// Entities carrying `tag`, in container order.
    pub fn get_by_tag(&self, tag: &str) -> Vec<&T> {
        self.lookup(self.by_tag.get(tag))
    }

    /// Entities of type `entity_type`, in container order.
    pub fn get_by_type(&self, entity_type: &str) -> Vec<&T> {
        self.lookup(self.by_type.get(entity_type))
    }

    fn lookup(&self, ids: Option<&IndexSet<T::Id>>) -> Vec<&T> {
        let Some(ids) = ids else {
            return Vec::new();
        };
        let mut found: Vec<(usize, &T)> = ids
            .iter()
            .filter_map(|id| self.entities.get_full(id).map(|(pos, _, e)| (pos, e)))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, e)| e).collect()
    }

    /// Every tag in use, in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    /// Every non-empty type in use, in first-seen order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<&T> {
        self.entities.values().filter(|e| predicate(e)).collect()
    }

    pub fn map<R>(&self, f: impl FnMut(&T) -> R) -> Vec<R> {
        self.entities.values().map(f).collect()
    }

    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.entities.values().for_each(f);
    }

    pub fn ids(&self) -> EntityIds<T::Id> {
        self.entities.keys().cloned().collect()
    }

    /// Ids present here but not in `other`.
    pub fn ids_difference(&self, other: &Self) -> EntityIds<T::Id> {
        self.entities
            .keys()
            .filter(|id| !other.contains(id))
            .cloned()
            .collect()
    }

    /// Ids present in both containers, in this container's order.
    pub fn ids_intersection(&self, other: &Self) -> EntityIds<T::Id> {
        self.entities
            .keys()
            .filter(|id| other.contains(id))
            .cloned()
            .collect()
    }

    /// A fully independent copy. Tags and user data are cloned, never shared.
    pub fn deep_copy(&self) -> Self {
        tracing::trace!(kind = T::KIND, count = self.entities.len(), "deep copy");
        self.clone()
    }

    /// Check that the tag/type indexes agree with the primary store.
    pub fn validate(&self) -> Result<()> {
        for (id, entity) in &self.entities {
            if id != entity.id() {
                return Err(GraphError::Inconsistent(format!(
                    "{} stored under {id} reports id {}",
                    T::KIND,
                    entity.id()
                )));
            }
            for tag in entity.tags() {
                if !self.by_tag.get(tag).is_some_and(|ids| ids.contains(id)) {
                    return Err(GraphError::Inconsistent(format!(
                        "{} {id} missing from tag index '{tag}'",
                        T::KIND
                    )));
                }
            }
            let entity_type = entity.entity_type();
            if !entity_type.is_empty()
                && !self
                    .by_type
                    .get(entity_type)
                    .is_some_and(|ids| ids.contains(id))
            {
                return Err(GraphError::Inconsistent(format!(
                    "{} {id} missing from type index '{entity_type}'",
                    T::KIND
                )));
            }
        }
        for (tag, ids) in &self.by_tag {
            for id in ids {
                if !self.entities.get(id).is_some_and(|e| e.has_tag(tag)) {
                    return Err(GraphError::Inconsistent(format!(
                        "tag index '{tag}' holds stale {} {id}",
                        T::KIND
                    )));
                }
            }
        }
        for (entity_type, ids) in &self.by_type {
            for id in ids {
                if !self
                    .entities
                    .get(id)
                    .is_some_and(|e| e.entity_type() == entity_type)
                {
                    return Err(GraphError::Inconsistent(format!(
                        "type index '{entity_type}' holds stale {} {id}",
                        T::KIND
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn index_entity<T: Entity>(
    by_tag: &mut SecondaryIndex<T::Id>,
    by_type: &mut SecondaryIndex<T::Id>,
    entity: &T,
) {
    for tag in entity.tags() {
        by_tag
            .entry(tag.clone())
            .or_default()
            .insert(entity.id().clone());
    }
    if !entity.entity_type().is_empty() {
        by_type
            .entry(entity.entity_type().to_string())
            .or_default()
            .insert(entity.id().clone());
    }
}

fn unindex_entity<T: Entity>(
    by_tag: &mut SecondaryIndex<T::Id>,
    by_type: &mut SecondaryIndex<T::Id>,
    entity: &T,
) {
    for tag in entity.tags() {
        unindex_key(by_tag, tag, entity.id());
    }
    unindex_key(by_type, entity.entity_type(), entity.id());
}

fn unindex_key<Id: Eq + Hash>(index: &mut SecondaryIndex<Id>, key: &str, id: &Id) {
    if let Some(ids) = index.get_mut(key) {
        ids.shift_remove(id);
        if ids.is_empty() {
            index.shift_remove(key);
        }
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for EntitiesContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitiesContainer")
            .field("strict", &self.strict)
            .field("entities", &self.entities)
            .finish()
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntitiesContainer<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.values()
    }
}

impl<T: Entity> FromIterator<T> for EntitiesContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut container = Self::new();
        for entity in iter {
            container.add_safe(entity);
        }
        container
    }
}

/// Serialized as a plain sequence of entities.
impl<T: Entity + Serialize> Serialize for EntitiesContainer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entities.values())
    }
}

/// Rebuilt non-strict: later duplicates overwrite earlier ones.
impl<'de, T: Entity + Deserialize<'de>> Deserialize<'de> for EntitiesContainer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entities = Vec::<T>::deserialize(deserializer)?;
        Ok(entities.into_iter().collect())
    }
}
