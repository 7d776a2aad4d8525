use crate::automaton::AutomatonNode;

/// A state of an automaton: the state identity and whether it is accepting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateNode<T: AutomatonNode> {
    pub accepting: bool,
    pub data: T,
}

impl<T: AutomatonNode> StateNode<T> {
    pub fn new(accepting: bool, data: T) -> Self {
        StateNode { accepting, data }
    }

    pub fn accepting(data: T) -> Self {
        StateNode::new(true, data)
    }

    pub fn non_accepting(data: T) -> Self {
        StateNode::new(false, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn invert(&self) -> Self {
        StateNode::new(!self.accepting, self.data.clone())
    }

    /// Maps the state identity, keeping the accepting flag.
    pub fn map<U: AutomatonNode>(&self, f: impl FnOnce(&T) -> U) -> StateNode<U> {
        StateNode::new(self.accepting, f(&self.data))
    }
}
