use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::DisplayConfig;
use crate::graph::Graph;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraphMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SceneGraphMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A graph plus its display configuration and metadata. This is the unit
/// handed to renderers and editors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraph {
    pub metadata: SceneGraphMetadata,
    #[serde(default)]
    display_config: DisplayConfig,
    #[serde(default)]
    graph: Graph,
}

impl SceneGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: SceneGraphMetadata::new(name),
            display_config: DisplayConfig::default(),
            graph: Graph::default(),
        }
    }

    /// Wrap an existing graph, seeding the display config from its types
    /// and tags.
    pub fn from_graph(name: impl Into<String>, graph: Graph) -> Self {
        Self {
            metadata: SceneGraphMetadata::new(name),
            display_config: DisplayConfig::from_graph(&graph),
            graph,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_display_config(mut self, display_config: DisplayConfig) -> Self {
        self.display_config = display_config;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph. Marks the scene as updated.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.touch();
        &mut self.graph
    }

    pub fn display_config(&self) -> &DisplayConfig {
        &self.display_config
    }

    pub fn display_config_mut(&mut self) -> &mut DisplayConfig {
        self.touch();
        &mut self.display_config
    }

    /// Add display entries for any types/tags that appeared since the
    /// config was last seeded.
    pub fn refresh_display_config(&mut self) -> usize {
        let added = self.display_config.register_graph(&self.graph);
        if added > 0 {
            self.touch();
        }
        added
    }

    /// Split into parts, e.g. to run a merge that needs both by value.
    pub fn into_parts(self) -> (SceneGraphMetadata, Graph, DisplayConfig) {
        (self.metadata, self.graph, self.display_config)
    }

    pub fn from_parts(
        metadata: SceneGraphMetadata,
        graph: Graph,
        display_config: DisplayConfig,
    ) -> Self {
        Self {
            metadata,
            display_config,
            graph,
        }
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            display_config: self.display_config.clone(),
            graph: self.graph.deep_copy(),
        }
    }

    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }
}
