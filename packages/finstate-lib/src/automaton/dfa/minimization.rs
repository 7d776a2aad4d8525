use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::graph::NodeIndex;
use tracing::Level;

use crate::{
    automaton::{AutomatonNode, Letter, dfa::DFA, node::StateNode, state_set::StateSet},
    config::{MinimizationAlgorithm, MinimizationConfig},
};

/// The lower triangle of the table used by the table-filling algorithm.
/// Entry `(i, j)` with `i < j` is marked once states `i` and `j` are known
/// to be distinguishable.
#[derive(Debug, Clone)]
struct DistinguishabilityTable {
    marked: Vec<bool>,
}

impl DistinguishabilityTable {
    fn new(state_count: usize) -> Self {
        DistinguishabilityTable {
            marked: vec![false; state_count * state_count.saturating_sub(1) / 2],
        }
    }

    fn slot(i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        j * (j - 1) / 2 + i
    }

    fn is_marked(&self, i: usize, j: usize) -> bool {
        i != j && self.marked[Self::slot(i, j)]
    }

    fn mark(&mut self, i: usize, j: usize) {
        self.marked[Self::slot(i, j)] = true;
    }
}

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    /// Minimizes the DFA with the default [MinimizationConfig].
    ///
    /// See [DFA::minimize_with].
    pub fn minimize(&self) -> DFA<StateSet<N>, L> {
        self.minimize_with(&MinimizationConfig::default())
    }

    /// Builds the minimal DFA for the same language. Unreachable states are
    /// dropped first, then the remaining states are merged into their
    /// Myhill-Nerode equivalence classes. Each state of the result is the set
    /// of original states it merges.
    ///
    /// Classes are ordered by their smallest member, so both algorithms
    /// produce identical results.
    pub fn minimize_with(&self, config: &MinimizationConfig) -> DFA<StateSet<N>, L> {
        let span = tracing::span!(Level::DEBUG, "minimize", states = self.graph.node_count());
        let _enter = span.enter();

        let pruned = self.strip();
        let classes = match config.get_algorithm() {
            MinimizationAlgorithm::TableFilling => pruned.table_filling_classes(),
            MinimizationAlgorithm::Hopcroft => pruned.hopcroft_classes(),
        };

        let minimized = pruned.quotient(&normalize_classes(&classes));
        tracing::debug!(
            "Minimized {} states to {} classes",
            self.graph.node_count(),
            minimized.graph.node_count()
        );

        minimized
    }

    /// Class id per state index, computed by marking distinguishable pairs
    /// until a fixpoint is reached.
    fn table_filling_classes(&self) -> Vec<usize> {
        let n = self.graph.node_count();
        let width = self.alphabet.len();
        let accepting = |i: usize| self.graph[NodeIndex::new(i)].accepting;

        let mut table = DistinguishabilityTable::new(n);
        for (i, j) in (0..n).tuple_combinations() {
            if accepting(i) != accepting(j) {
                table.mark(i, j);
            }
        }

        let mut rounds = 0;
        let mut changed = true;
        while changed {
            changed = false;
            rounds += 1;

            for (i, j) in (0..n).tuple_combinations() {
                if table.is_marked(i, j) {
                    continue;
                }

                let distinguishable = (0..width).any(|l| {
                    let i_target = self.step(NodeIndex::new(i), l).index();
                    let j_target = self.step(NodeIndex::new(j), l).index();
                    table.is_marked(i_target, j_target)
                });

                if distinguishable {
                    table.mark(i, j);
                    changed = true;
                }
            }
        }

        tracing::debug!("Table filling converged after {} rounds", rounds);

        // indistinguishability is an equivalence, so every state joins the
        // class of the first earlier state it is not distinguishable from
        let mut classes = vec![0; n];
        let mut class_count = 0;
        for j in 0..n {
            match (0..j).find(|i| !table.is_marked(*i, j)) {
                Some(i) => classes[j] = classes[i],
                None => {
                    classes[j] = class_count;
                    class_count += 1;
                }
            }
        }

        classes
    }

    /// Class id per state index, computed by Hopcroft's partition refinement.
    fn hopcroft_classes(&self) -> Vec<usize> {
        let n = self.graph.node_count();
        let width = self.alphabet.len();

        // predecessors[letter][target] lists every source stepping into target
        let mut predecessors = vec![vec![vec![]; n]; width];
        for source in 0..n {
            for (l, letter_predecessors) in predecessors.iter_mut().enumerate() {
                let target = self.step(NodeIndex::new(source), l).index();
                letter_predecessors[target].push(source);
            }
        }

        let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
            (0..n).partition(|i| self.graph[NodeIndex::new(*i)].accepting);

        let mut blocks: Vec<Vec<usize>> = vec![];
        let mut block_of = vec![0; n];
        for block in [accepting, rejecting] {
            if !block.is_empty() {
                for state in &block {
                    block_of[*state] = blocks.len();
                }
                blocks.push(block);
            }
        }

        let mut queued = vec![vec![false; width]; blocks.len()];
        let mut worklist = VecDeque::new();
        if blocks.len() == 2 {
            let smaller = if blocks[0].len() <= blocks[1].len() { 0 } else { 1 };
            for l in 0..width {
                queued[smaller][l] = true;
                worklist.push_back((smaller, l));
            }
        }

        let mut splits = 0;
        while let Some((splitter, l)) = worklist.pop_front() {
            queued[splitter][l] = false;

            let mut marked = vec![false; n];
            for state in &blocks[splitter] {
                for source in &predecessors[l][*state] {
                    marked[*source] = true;
                }
            }

            let touched = (0..n)
                .filter(|state| marked[*state])
                .map(|state| block_of[state])
                .sorted()
                .dedup()
                .collect_vec();

            for y in touched {
                let (inside, outside): (Vec<usize>, Vec<usize>) =
                    blocks[y].iter().copied().partition(|state| marked[*state]);
                if outside.is_empty() {
                    continue;
                }

                let z = blocks.len();
                for state in &outside {
                    block_of[*state] = z;
                }
                blocks[y] = inside;
                blocks.push(outside);
                queued.push(vec![false; width]);
                splits += 1;

                for c in 0..width {
                    let target = if queued[y][c] || blocks[z].len() < blocks[y].len() {
                        z
                    } else {
                        y
                    };
                    if !queued[target][c] {
                        queued[target][c] = true;
                        worklist.push_back((target, c));
                    }
                }
            }
        }

        tracing::debug!("Hopcroft refinement performed {} splits", splits);

        block_of
    }

    /// Merges every class into a single state. `classes` must be normalized
    /// and must respect the transition function.
    fn quotient(&self, classes: &[usize]) -> DFA<StateSet<N>, L> {
        let class_count = classes.iter().max().map_or(0, |max| max + 1);
        let width = self.alphabet.len();

        let mut members: Vec<Vec<NodeIndex>> = vec![vec![]; class_count];
        for state in self.node_indices() {
            members[classes[state.index()]].push(state);
        }

        let nodes = members
            .iter()
            .map(|class| {
                StateNode::new(
                    self.graph[class[0]].accepting,
                    class
                        .iter()
                        .map(|state| self.graph[*state].data.clone())
                        .collect::<StateSet<N>>(),
                )
            })
            .collect_vec();

        let mut delta = Vec::with_capacity(class_count * width);
        for class in &members {
            for l in 0..width {
                let target = classes[self.step(class[0], l).index()];
                for state in &class[1..] {
                    assert_eq!(
                        classes[self.step(*state, l).index()],
                        target,
                        "All members of a class must step into the same class. Class: {:?}",
                        class
                    );
                }
                delta.push(target);
            }
        }

        DFA::from_table(
            self.alphabet.clone(),
            nodes,
            delta,
            classes[self.start_index().index()],
        )
    }
}

/// Renumbers class ids in order of their smallest member.
fn normalize_classes(classes: &[usize]) -> Vec<usize> {
    let mut renamed = hashbrown::HashMap::new();
    classes
        .iter()
        .map(|class| {
            let next = renamed.len();
            *renamed.entry(*class).or_insert(next)
        })
        .collect()
}
