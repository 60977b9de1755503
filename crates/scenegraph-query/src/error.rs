use scenegraph_core::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Merge left graph inconsistent: {0}")]
    Merge(String),
}
