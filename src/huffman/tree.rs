//! Huffman tree construction
//!
//! Leaves enter a min-priority queue in order of each byte's first
//! appearance. The two lowest nodes are merged until one root remains.
//! Equal frequencies are broken by arrival order in the queue, which
//! makes the tree reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A bit code, most significant bit first
pub type Code = Vec<bool>;

/// Node of a Huffman tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A single input byte and its frequency
    Leaf {
        /// Byte value
        symbol: u8,
        /// Number of occurrences
        frequency: u64,
    },
    /// Two merged subtrees
    Internal {
        /// Sum of both children's frequencies
        frequency: u64,
        /// Subtree reached with a `0` bit
        left: Box<HuffmanNode>,
        /// Subtree reached with a `1` bit
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Frequency of this node or subtree
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                *frequency
            }
        }
    }
}

/// Byte frequencies plus the order in which bytes first appeared
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
    order: Vec<u8>,
}

impl FrequencyTable {
    /// Count every byte of `data`
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        let mut order = Vec::new();
        for &byte in data {
            if counts[byte as usize] == 0 {
                order.push(byte);
            }
            counts[byte as usize] += 1;
        }
        Self { counts, order }
    }

    /// Occurrences of `byte`
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Distinct bytes in first-appearance order
    pub fn symbols(&self) -> &[u8] {
        &self.order
    }

    /// Number of distinct bytes
    pub fn used(&self) -> usize {
        self.order.len()
    }
}

/// Queue entry ordered by (frequency, arrival)
#[derive(Debug)]
struct QueueEntry {
    frequency: u64,
    arrival: usize,
    node: HuffmanNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then_with(|| self.arrival.cmp(&other.arrival))
    }
}

/// A complete Huffman tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build a tree for `data`, or `None` if it is empty
    pub fn from_data(data: &[u8]) -> Option<Self> {
        Self::from_frequencies(&FrequencyTable::count(data))
    }

    /// Build a tree from counted frequencies
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut queue = BinaryHeap::with_capacity(frequencies.used());
        let mut arrival = 0;
        for &symbol in frequencies.symbols() {
            let frequency = frequencies.get(symbol);
            queue.push(Reverse(QueueEntry {
                frequency,
                arrival,
                node: HuffmanNode::Leaf { symbol, frequency },
            }));
            arrival += 1;
        }

        while queue.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (queue.pop(), queue.pop()) else {
                unreachable!("queue holds at least two nodes");
            };
            let frequency = left.frequency + right.frequency;
            queue.push(Reverse(QueueEntry {
                frequency,
                arrival,
                node: HuffmanNode::Internal {
                    frequency,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            }));
            arrival += 1;
        }

        queue.pop().map(|Reverse(entry)| Self { root: entry.node })
    }

    /// Root node
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Leaf codes as root-to-leaf paths, depth first with left before right
    ///
    /// A tree whose root is a leaf yields a single empty code.
    pub fn codes(&self) -> Vec<(u8, Code)> {
        let mut codes = Vec::new();
        let mut stack: Vec<(&HuffmanNode, Code)> = vec![(&self.root, Vec::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => codes.push((*symbol, path)),
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    // Pushed last so the left subtree is visited first
                    stack.push((&**right, right_path));
                    stack.push((&**left, left_path));
                }
            }
        }

        codes
    }
}
