//! Global node identifiers.

/// Identifies a node of an instance with `n` customers.
///
/// Indices `0..=n` are real records (`0` is the canonical depot). Every index
/// beyond `n` is a replica of the depot anchoring an additional route; replica
/// `k` lives at global index `n + k`, so the route opened in slot `k` uses
/// replica `k`.
///
/// # Examples
///
/// ```
/// use u_toptw::models::NodeId;
///
/// assert_eq!(NodeId::from_index(3, 5), NodeId::Poi(3));
/// assert_eq!(NodeId::from_index(7, 5), NodeId::DepotReplica(2));
/// assert_eq!(NodeId::DepotReplica(2).attribute_index(), 0);
/// assert_eq!(NodeId::DepotReplica(2).index(5), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// A record stored in the instance (`0` is the depot).
    Poi(usize),
    /// Depot replica for the route opened in the given slot (`>= 1`).
    DepotReplica(usize),
}

impl NodeId {
    /// Classifies a global index for an instance with `customers` customers.
    pub fn from_index(index: usize, customers: usize) -> Self {
        if index > customers {
            NodeId::DepotReplica(index - customers)
        } else {
            NodeId::Poi(index)
        }
    }

    /// Global index of this node.
    pub fn index(&self, customers: usize) -> usize {
        match *self {
            NodeId::Poi(i) => i,
            NodeId::DepotReplica(k) => customers + k,
        }
    }

    /// Index of the record holding this node's attributes.
    ///
    /// Replicas resolve to the canonical depot.
    pub fn attribute_index(&self) -> usize {
        match *self {
            NodeId::Poi(i) => i,
            NodeId::DepotReplica(_) => 0,
        }
    }

    /// Returns `true` for the canonical depot and all of its replicas.
    pub fn is_depot(&self) -> bool {
        self.attribute_index() == 0
    }
}
