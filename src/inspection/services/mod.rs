pub mod dependency_tree;
pub mod version_grouper;

pub use dependency_tree::{
    Completion, DependencyTree, FetchRequest, NodeId, NodeStatus, RowMarker, ToggleOutcome,
    TreeNode, TreeRow,
};
pub use version_grouper::{VersionGrouper, VersionNode, VersionSeries};
