use crate::inspection::domain::{Gav, Package};
use crate::shared::error::JarHellError;
use crate::shared::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Index of a node inside its [`DependencyTree`]
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    token: CancellationToken,
}

/// One node of the explorer arena
#[derive(Debug)]
pub struct TreeNode {
    key: String,
    scope: Option<String>,
    optional: bool,
    reference: Package,
    fetched: Option<Package>,
    status: NodeStatus,
    expanded: bool,
    children: Option<Vec<NodeId>>,
    parent: Option<NodeId>,
    depth: usize,
    in_flight: Option<InFlight>,
}

impl TreeNode {
    fn new(
        reference: Package,
        scope: Option<String>,
        optional: bool,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        Self {
            key: reference.gav().to_string(),
            scope,
            optional,
            reference,
            fetched: None,
            status: NodeStatus::Idle,
            expanded: false,
            children: None,
            parent,
            depth,
            in_flight: None,
        }
    }

    /// Coordinate string identifying the node
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Best-known package: fetched data if any, otherwise the parent's reference
    pub fn artifact(&self) -> &Package {
        self.fetched.as_ref().unwrap_or(&self.reference)
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn status(&self) -> &NodeStatus {
        &self.status
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.status == NodeStatus::Loading
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Unresolved packages and packages without dependencies never expand
    pub fn is_leaf(&self) -> bool {
        let artifact = self.artifact();
        artifact.is_unresolved() || artifact.total_dependencies() == 0
    }

    fn has_local_dependencies(&self) -> bool {
        self.artifact()
            .as_resolved()
            .is_some_and(|pkg| pkg.has_loaded_dependencies())
    }
}

/// A one-level fetch the caller has to perform on behalf of the tree
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub tree_id: u64,
    pub node: NodeId,
    pub gav: Gav,
    pub token: CancellationToken,
    ticket: u64,
}

#[derive(Debug, Clone)]
pub enum ToggleOutcome {
    /// The node is loading, nothing changed
    Ignored,
    /// The node cannot be expanded
    Leaf,
    Collapsed,
    Expanded,
    /// Already in the requested state
    Unchanged,
    /// The node is now loading; the fetch must be run and fed back through
    /// [`DependencyTree::complete`]
    FetchRequired(FetchRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    Leaf,
    Collapsed,
    Expanded,
    Loading,
    Failed,
}

/// Flattened, render-ready view of a visible node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: usize,
    pub key: String,
    pub scope: Option<String>,
    pub optional: bool,
    pub unresolved: bool,
    pub marker: RowMarker,
    pub error: Option<String>,
}

/// Lazily fetched dependency tree.
///
/// The tree owns a root cancellation token; every fetch it hands out carries
/// a child of that token. Dropping the tree cancels all of them, and results
/// that come back for a cancelled or superseded request are discarded.
#[derive(Debug)]
pub struct DependencyTree {
    id: u64,
    token: CancellationToken,
    nodes: Vec<TreeNode>,
    next_ticket: u64,
}

impl DependencyTree {
    pub const ROOT: NodeId = 0;

    pub fn new(root: Package) -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            token: CancellationToken::new(),
            nodes: vec![TreeNode::new(root, None, false, None, 0)],
            next_ticket: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with a fetch in flight
    pub fn loading(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].is_loading())
            .collect()
    }

    /// Flips a node between collapsed and expanded
    pub fn toggle(&mut self, id: NodeId) -> Result<ToggleOutcome> {
        let node = self.node_mut(id)?;
        if node.is_loading() {
            return Ok(ToggleOutcome::Ignored);
        }
        if node.is_leaf() {
            return Ok(ToggleOutcome::Leaf);
        }
        if node.expanded {
            node.expanded = false;
            return Ok(ToggleOutcome::Collapsed);
        }
        if node.children.is_some() || node.has_local_dependencies() {
            self.reveal_children(id);
            return Ok(ToggleOutcome::Expanded);
        }
        Ok(ToggleOutcome::FetchRequired(self.start_fetch(id)))
    }

    pub fn expand(&mut self, id: NodeId) -> Result<ToggleOutcome> {
        if self.node_mut(id)?.expanded {
            return Ok(ToggleOutcome::Unchanged);
        }
        self.toggle(id)
    }

    pub fn collapse(&mut self, id: NodeId) -> Result<ToggleOutcome> {
        let node = self.node_mut(id)?;
        if !node.expanded {
            return Ok(if node.is_leaf() {
                ToggleOutcome::Leaf
            } else {
                ToggleOutcome::Unchanged
            });
        }
        self.toggle(id)
    }

    /// Applies the result of a fetch started by this tree
    pub fn complete(&mut self, request: &FetchRequest, result: Result<Package>) -> Completion {
        if request.tree_id != self.id || request.token.is_cancelled() {
            return Completion::Discarded;
        }
        let Some(node) = self.nodes.get_mut(request.node) else {
            return Completion::Discarded;
        };
        let current = node.in_flight.as_ref().map(|in_flight| in_flight.ticket);
        if current != Some(request.ticket) {
            return Completion::Discarded;
        }

        match result {
            Ok(package) => {
                node.in_flight = None;
                node.status = NodeStatus::Idle;
                node.fetched = Some(package);
                node.children = None;
                self.reveal_children(request.node);
                Completion::Applied
            }
            Err(error) if is_cancellation(&error) => {
                node.in_flight = None;
                node.status = NodeStatus::Idle;
                Completion::Discarded
            }
            Err(error) => {
                node.in_flight = None;
                let message = error.to_string();
                let headline = message.lines().next().unwrap_or_default().to_string();
                node.status = NodeStatus::Failed(headline);
                node.expanded = false;
                Completion::Applied
            }
        }
    }

    /// Cancels the in-flight fetch of a node, returning whether one was running
    pub fn cancel(&mut self, id: NodeId) -> Result<bool> {
        let node = self.node_mut(id)?;
        match node.in_flight.take() {
            Some(in_flight) => {
                in_flight.token.cancel();
                node.status = NodeStatus::Idle;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Depth-first projection of the visible nodes
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            rows.push(self.row(id));
            if node.expanded {
                stack.extend(node.children().iter().rev());
            }
        }
        rows
    }

    fn row(&self, id: NodeId) -> TreeRow {
        let node = &self.nodes[id];
        let marker = match &node.status {
            NodeStatus::Loading => RowMarker::Loading,
            NodeStatus::Failed(_) => RowMarker::Failed,
            NodeStatus::Idle if node.is_leaf() => RowMarker::Leaf,
            NodeStatus::Idle if node.expanded => RowMarker::Expanded,
            NodeStatus::Idle => RowMarker::Collapsed,
        };
        TreeRow {
            id,
            depth: node.depth,
            key: node.key.clone(),
            scope: node.scope.clone(),
            optional: node.optional,
            unresolved: node.artifact().is_unresolved(),
            marker,
            error: match &node.status {
                NodeStatus::Failed(message) => Some(message.clone()),
                _ => None,
            },
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TreeNode> {
        let len = self.nodes.len();
        self.nodes.get_mut(id).ok_or_else(|| {
            JarHellError::Validation {
                message: format!("no tree node {} (tree has {} nodes)", id, len),
            }
            .into()
        })
    }

    fn start_fetch(&mut self, id: NodeId) -> FetchRequest {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let token = self.token.child_token();
        let node = &mut self.nodes[id];
        node.status = NodeStatus::Loading;
        node.in_flight = Some(InFlight {
            ticket,
            token: token.clone(),
        });
        FetchRequest {
            tree_id: self.id,
            node: id,
            gav: node.artifact().gav().clone(),
            token,
            ticket,
        }
    }

    fn reveal_children(&mut self, id: NodeId) {
        if self.nodes[id].children.is_none() {
            let depth = self.nodes[id].depth + 1;
            let dependencies = self.nodes[id]
                .artifact()
                .as_resolved()
                .and_then(|pkg| pkg.dependencies.clone())
                .unwrap_or_default();
            let mut children = Vec::with_capacity(dependencies.len());
            for dependency in dependencies {
                children.push(self.nodes.len());
                self.nodes.push(TreeNode::new(
                    dependency.artifact,
                    Some(dependency.scope),
                    dependency.optional,
                    Some(id),
                    depth,
                ));
            }
            self.nodes[id].children = Some(children);
        }
        let node = &mut self.nodes[id];
        node.status = NodeStatus::Idle;
        node.expanded = true;
    }
}

impl Drop for DependencyTree {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn is_cancellation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<JarHellError>(),
        Some(JarHellError::Cancelled)
    )
}
