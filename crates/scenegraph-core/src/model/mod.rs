pub mod edge;
pub mod entity;
pub mod ids;
pub mod node;

pub use edge::{Edge, EdgeArgs};
pub use entity::{Entity, EntityKey, EntityMeta};
pub use ids::{EdgeId, NodeId, EDGE_ID_SEPARATOR};
pub use node::{Dimensions, Node, NodeArgs, NodeDisplay, Position};
