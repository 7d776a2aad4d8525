use petgraph::graph::{IndexType, NodeIndex};

/// A dense map from node indices to values, backed by a [Vec].
///
/// All automata in this crate use compact node indices from `0` to
/// `node_count - 1`, so a vector is both smaller and faster than hashing.
#[derive(Debug, Clone)]
pub struct IndexMap<V> {
    data: Vec<Option<V>>,
}

impl<V: Clone> IndexMap<V> {
    pub fn new(size: usize) -> Self {
        IndexMap {
            data: vec![None; size],
        }
    }
}

impl<V> IndexMap<V> {
    pub fn has_key<Ix: IndexType>(&self, key: NodeIndex<Ix>) -> bool {
        self.data.get(key.index()).is_some_and(Option::is_some)
    }

    pub fn get<Ix: IndexType>(&self, key: NodeIndex<Ix>) -> Option<&V> {
        self.data.get(key.index()).and_then(Option::as_ref)
    }

    pub fn insert<Ix: IndexType>(&mut self, key: NodeIndex<Ix>, value: V) -> Option<V> {
        self.data[key.index()].replace(value)
    }

    pub fn len(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Option::is_none)
    }
}

impl<V, Ix: IndexType> std::ops::Index<NodeIndex<Ix>> for IndexMap<V> {
    type Output = V;

    fn index(&self, key: NodeIndex<Ix>) -> &Self::Output {
        self.get(key).expect("Key should be present in the index map")
    }
}

/// A dense set of node indices.
#[derive(Debug, Clone)]
pub struct IndexSet {
    data: Vec<bool>,
}

impl IndexSet {
    pub fn new(size: usize) -> Self {
        IndexSet {
            data: vec![false; size],
        }
    }

    pub fn contains<Ix: IndexType>(&self, key: NodeIndex<Ix>) -> bool {
        self.data.get(key.index()).copied().unwrap_or(false)
    }

    /// Inserts `key`, returning true if it was not present before.
    pub fn insert<Ix: IndexType>(&mut self, key: NodeIndex<Ix>) -> bool {
        !std::mem::replace(&mut self.data[key.index()], true)
    }

    /// Returns the contained indices in ascending order.
    pub fn to_vec(&self) -> Vec<NodeIndex> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(i, _)| NodeIndex::new(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_set_insert() {
        let mut set = IndexSet::new(4);
        assert!(set.insert(NodeIndex::<u32>::new(2)));
        assert!(!set.insert(NodeIndex::<u32>::new(2)));
        assert!(set.insert(NodeIndex::<u32>::new(0)));
        assert_eq!(set.to_vec(), vec![NodeIndex::new(0), NodeIndex::new(2)]);
    }

    #[test]
    fn index_map_insert() {
        let mut map = IndexMap::new(3);
        assert!(!map.has_key(NodeIndex::<u32>::new(1)));
        map.insert(NodeIndex::<u32>::new(1), "b");
        assert_eq!(map[NodeIndex::<u32>::new(1)], "b");
        assert_eq!(map.len(), 1);
    }
}
