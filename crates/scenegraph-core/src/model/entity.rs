use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bounds every entity id type satisfies.
pub trait EntityKey: Clone + Eq + Hash + fmt::Display + fmt::Debug {}

impl<T> EntityKey for T where T: Clone + Eq + Hash + fmt::Display + fmt::Debug {}

/// Fields shared by every identifiable thing in a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque caller payload. Cloned along with the entity.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub user_data: Map<String, Value>,
}

/// An identifiable, taggable, typed value stored in an [`EntitiesContainer`].
///
/// The id is fixed at construction; everything reachable through
/// [`Entity::meta_mut`] may change.
///
/// [`EntitiesContainer`]: crate::container::EntitiesContainer
pub trait Entity: Clone {
    type Id: EntityKey;

    /// Human-readable kind used in error messages ("node", "edge").
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
    fn meta(&self) -> &EntityMeta;
    fn meta_mut(&mut self) -> &mut EntityMeta;

    fn entity_type(&self) -> &str {
        &self.meta().entity_type
    }

    fn tags(&self) -> &BTreeSet<String> {
        &self.meta().tags
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.meta().tags.contains(tag)
    }

    fn label(&self) -> Option<&str> {
        self.meta().label.as_deref()
    }

    /// Label if set, otherwise the id.
    fn display_name(&self) -> String {
        match self.label() {
            Some(label) => label.to_string(),
            None => self.id().to_string(),
        }
    }

    fn with_label(mut self, label: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().label = Some(label.into());
        self
    }

    fn with_type(mut self, entity_type: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().entity_type = entity_type.into();
        self
    }

    fn with_tag(mut self, tag: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().tags.insert(tag.into());
        self
    }

    fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta_mut().tags.extend(tags.into_iter().map(Into::into));
        self
    }

    fn with_description(mut self, description: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().description = Some(description.into());
        self
    }

    fn with_user_data(mut self, key: impl Into<String>, value: Value) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().user_data.insert(key.into(), value);
        self
    }
}
