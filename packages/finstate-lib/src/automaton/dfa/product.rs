use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{Alphabet, AutomatonNode, Letter, canonical_alphabet, dfa::DFA, node::StateNode},
    config::{AlgebraConfig, AlphabetPolicy},
    error::{AutomatonError, AutomatonResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductKind {
    Intersection,
    Union,
}

impl ProductKind {
    fn accepts(&self, left: bool, right: bool) -> bool {
        match self {
            ProductKind::Intersection => left && right,
            ProductKind::Union => left || right,
        }
    }
}

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    /// Builds the intersection DFA with the default [AlgebraConfig].
    ///
    /// See [DFA::intersect_with].
    pub fn intersect<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        self.intersect_with(other, &AlgebraConfig::default())
    }

    /// Builds the product DFA accepting `L(Self) ∩ L(Other)`. A pair state
    /// accepts iff both components accept.
    ///
    /// Under [AlphabetPolicy::Strict] both alphabets must be equal. Under
    /// [AlphabetPolicy::Reconcile] the product runs over the common letters,
    /// which must not be empty unless both alphabets are.
    pub fn intersect_with<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
        config: &AlgebraConfig,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        self.product(other, ProductKind::Intersection, config)
    }

    /// Builds the union DFA with the default [AlgebraConfig].
    ///
    /// See [DFA::union_with].
    pub fn union<NO: AutomatonNode>(&self, other: &DFA<NO, L>) -> AutomatonResult<DFA<(N, NO), L>> {
        self.union_with(other, &AlgebraConfig::default())
    }

    /// Builds the product DFA accepting `L(Self) ∪ L(Other)` over the union of
    /// both alphabets. Each operand ignores the letters it does not know by
    /// looping on them, see [DFA::extend_alphabet].
    pub fn union_with<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
        config: &AlgebraConfig,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        self.product(other, ProductKind::Union, config)
    }

    /// Builds the difference DFA with the default [AlgebraConfig].
    ///
    /// See [DFA::difference_with].
    pub fn difference<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        self.difference_with(other, &AlgebraConfig::default())
    }

    /// Builds `L(Self) - L(Other)` as the intersection of self with the
    /// complement of other, under the same alphabet rules as
    /// [DFA::intersect_with].
    pub fn difference_with<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
        config: &AlgebraConfig,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        self.intersect_with(&other.complement(), config)
    }

    fn product_alphabet<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
        kind: ProductKind,
        policy: AlphabetPolicy,
    ) -> AutomatonResult<Vec<L>> {
        let left = self.alphabet();
        let right = other.alphabet();

        if left == right {
            return Ok(left.to_vec());
        }

        match (policy, kind) {
            (AlphabetPolicy::Strict, _) => Err(AutomatonError::alphabet_mismatch(&left, &right)),
            (AlphabetPolicy::Reconcile, ProductKind::Union) => {
                Ok(canonical_alphabet(left.iter().chain(right).cloned()))
            }
            (AlphabetPolicy::Reconcile, ProductKind::Intersection) => {
                let common = left
                    .iter()
                    .filter(|letter| other.contains_letter(letter))
                    .cloned()
                    .collect_vec();

                if common.is_empty() {
                    Err(AutomatonError::alphabet_mismatch(&left, &right))
                } else {
                    Ok(common)
                }
            }
        }
    }

    /// Enumerates all of `Q1 × Q2`. The pair `(i, j)` gets index
    /// `i * |Q2| + j`, so the result is ordered by the left component first.
    fn product<NO: AutomatonNode>(
        &self,
        other: &DFA<NO, L>,
        kind: ProductKind,
        config: &AlgebraConfig,
    ) -> AutomatonResult<DFA<(N, NO), L>> {
        let alphabet = self.product_alphabet(other, kind, *config.get_alphabet_policy())?;

        // position of every product letter in each operand, `None` loops
        let left_columns = alphabet.iter().map(|l| self.letter_index(l)).collect_vec();
        let right_columns = alphabet.iter().map(|l| other.letter_index(l)).collect_vec();

        let left_count = self.graph.node_count();
        let right_count = other.graph.node_count();
        let pair_index = |i: NodeIndex, j: NodeIndex| i.index() * right_count + j.index();

        let mut nodes = Vec::with_capacity(left_count * right_count);
        let mut delta = Vec::with_capacity(left_count * right_count * alphabet.len());

        for i in self.node_indices() {
            let left = self.node(i);
            for j in other.node_indices() {
                let right = other.node(j);
                nodes.push(StateNode::new(
                    kind.accepts(left.accepting, right.accepting),
                    (left.data.clone(), right.data.clone()),
                ));

                for (left_column, right_column) in left_columns.iter().zip(&right_columns) {
                    let left_target = left_column.map_or(i, |l| self.step(i, l));
                    let right_target = right_column.map_or(j, |l| other.step(j, l));
                    delta.push(pair_index(left_target, right_target));
                }
            }
        }

        tracing::debug!(
            "Built {:?} product with {} x {} = {} states over {} letters",
            kind,
            left_count,
            right_count,
            nodes.len(),
            alphabet.len()
        );

        let start = pair_index(self.start_index(), other.start_index());
        let product = DFA::from_table(alphabet, nodes, delta, start);

        if *config.get_prune() {
            Ok(product.strip())
        } else {
            Ok(product)
        }
    }
}
