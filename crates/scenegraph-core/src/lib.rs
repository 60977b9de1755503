//! In-memory typed graph model: entities, indexed containers, graphs with
//! strict/lenient consistency rules, display configuration and scenes.
//!
//! # Example
//! ```
//! use scenegraph_core::{EdgeArgs, Entity, Graph, GraphOptions, NodeArgs};
//!
//! let mut graph = Graph::new(GraphOptions::strict());
//! graph.create_node("a", NodeArgs::typed("concept")).unwrap();
//! graph.create_node("b", NodeArgs::typed("concept")).unwrap();
//! graph.create_edge("a", "b", EdgeArgs::typed("relatesTo")).unwrap();
//!
//! assert_eq!(graph.nodes_by_type("concept").len(), 2);
//! assert!(graph.create_edge("a", "missing", EdgeArgs::default()).is_err());
//! assert_eq!(graph.get_edge(&"a:::b".into()).unwrap().entity_type(), "relatesTo");
//! ```
//!
//! Nothing here is `Sync`-aware: a graph is owned by one thread of control
//! and callers needing shared access wrap it in their own lock.

pub mod config;
pub mod container;
pub mod display;
pub mod error;
pub mod graph;
pub mod model;
pub mod scene;

pub use config::GraphOptions;
pub use container::{EdgeContainer, EntitiesContainer, EntityIds, NodeContainer};
pub use display::{DisplayConfig, RenderingConfig, RenderingConfigMap};
pub use error::{GraphError, Result};
pub use graph::{Graph, GraphMap};
pub use model::{
    Dimensions, Edge, EdgeArgs, EdgeId, Entity, EntityKey, EntityMeta, Node, NodeArgs, NodeDisplay,
    NodeId, Position, EDGE_ID_SEPARATOR,
};
pub use scene::{SceneGraph, SceneGraphMetadata};
