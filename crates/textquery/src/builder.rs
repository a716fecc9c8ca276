//! Tree construction.
//!
//! Consumes scanned parts with a stack automaton instead of recursive descent:
//!
//! - `(` inserts a placeholder at the front of the current node's children and descends.
//! - An operand keys the current placeholder as a leaf and returns to the continuation.
//! - An operator keys the current node, appends a placeholder at the back, and descends.
//! - `)` returns to the continuation.
//!
//! Because a repeated keyword re-keys the same node, `a AND b AND c` inside one group becomes
//! one AND node with three children. Placeholders live in an arena of slots whose keys start
//! empty and are set once; slots are turned into [`Node`]s only after all parts are consumed.

use std::collections::VecDeque;

use log::trace;

use crate::{
    config::ParserConfig,
    error::ParseError,
    node::Node,
    part::{Part, PartKind},
};

/// What created a placeholder slot.
#[derive(Debug, Clone)]
enum Origin {
    /// The synthetic root.
    Root,
    /// An open parenthesis.
    Group,
    /// An operator expecting its next operand.
    Operand(String),
}

/// A tree vertex under construction.
#[derive(Debug)]
struct Slot {
    /// Key, assigned once by an operand or operator part.
    key: Option<Part>,
    /// Child slot indices in source order.
    children: VecDeque<usize>,
    /// What created the slot.
    origin: Origin,
    /// Position of the part that created the slot.
    position: usize,
}

impl Slot {
    /// Creates an empty placeholder.
    fn new(origin: Origin, position: usize) -> Self {
        Self {
            key: None,
            children: VecDeque::new(),
            origin,
            position,
        }
    }

    /// True if nothing has been attached to the slot yet.
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.children.is_empty()
    }

    /// Error for a slot that was never filled.
    fn unfilled(&self) -> ParseError {
        match &self.origin {
            Origin::Root => ParseError::EmptyQuery,
            Origin::Group => ParseError::EmptyGroup {
                position: self.position,
            },
            Origin::Operand(operator) => ParseError::MissingOperand {
                operator: operator.clone(),
                position: self.position,
            },
        }
    }
}

/// Stack automaton that turns a part sequence into a tree.
pub struct TreeBuilder<'a> {
    /// Active configuration, used to verify operator keywords.
    config: &'a ParserConfig,
    /// Arena of slots; index 0 is the root. Children always follow their parent.
    slots: Vec<Slot>,
    /// Continuation slots to return to when the current sub-expression ends.
    stack: Vec<usize>,
    /// Slot currently being filled.
    current: usize,
    /// Number of open groups.
    depth: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder positioned at a fresh root placeholder.
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            slots: vec![Slot::new(Origin::Root, 0)],
            stack: vec![0],
            current: 0,
            depth: 0,
        }
    }

    /// Applies one part to the automaton.
    pub fn push(&mut self, part: Part) -> Result<(), ParseError> {
        if !self.recognizes(&part) {
            return Err(ParseError::Internal {
                part: part.value,
                position: part.position,
            });
        }
        trace!(
            "{:?} {:?} at slot {} (stack depth {})",
            part.kind,
            part.value,
            self.current,
            self.stack.len()
        );

        match part.kind {
            PartKind::OpenParen => self.open(&part),
            PartKind::Operand => self.operand(part),
            PartKind::Operator => self.operator(part),
            PartKind::CloseParen => self.close(&part),
        }
    }

    /// Checks that a part's text matches its kind under the active configuration.
    fn recognizes(&self, part: &Part) -> bool {
        match part.kind {
            PartKind::OpenParen => is_char(&part.value, self.config.open_parenthesis()),
            PartKind::CloseParen => is_char(&part.value, self.config.close_parenthesis()),
            PartKind::Operator => self.config.is_operator(&part.value),
            PartKind::Operand => true,
        }
    }

    /// Descends into a new group.
    fn open(&mut self, part: &Part) -> Result<(), ParseError> {
        self.expect_empty(part)?;
        let group = self.alloc(Origin::Group, part.position);
        self.slots[self.current].children.push_front(group);
        self.stack.push(self.current);
        self.current = group;
        self.depth += 1;
        Ok(())
    }

    /// Finalizes the current placeholder as a leaf and returns to the continuation.
    fn operand(&mut self, part: Part) -> Result<(), ParseError> {
        self.expect_empty(&part)?;
        let position = part.position;
        self.slots[self.current].key = Some(part);
        self.current = self.pop(position)?;
        Ok(())
    }

    /// Keys the current node with an operator and descends into its next operand.
    fn operator(&mut self, part: Part) -> Result<(), ParseError> {
        let position = part.position;
        let slot = &self.slots[self.current];

        match &slot.key {
            None if slot.children.is_empty() => {
                return Err(ParseError::MissingOperand {
                    operator: part.value,
                    position,
                });
            }
            None => {}
            Some(existing) if existing.is_operator() && existing.value == part.value => {}
            Some(existing) if existing.is_operator() => {
                return Err(ParseError::MixedOperators {
                    expected: existing.value.clone(),
                    found: part.value,
                    position,
                });
            }
            // Only reachable when the parts were not wrapped in a group.
            Some(_) => {
                return Err(ParseError::Internal {
                    part: part.value,
                    position,
                });
            }
        }

        let operand = self.alloc(Origin::Operand(part.value.clone()), position);
        let slot = &mut self.slots[self.current];
        if slot.key.is_none() {
            slot.key = Some(part);
        }
        slot.children.push_back(operand);
        self.stack.push(self.current);
        self.current = operand;
        Ok(())
    }

    /// Ends the current group.
    fn close(&mut self, part: &Part) -> Result<(), ParseError> {
        if self.depth == 0 {
            return Err(ParseError::UnbalancedParentheses {
                position: part.position,
            });
        }
        let slot = &self.slots[self.current];
        if slot.is_empty() {
            return Err(slot.unfilled());
        }
        self.depth -= 1;
        self.current = self.pop(part.position)?;
        Ok(())
    }

    /// Fails unless the current placeholder is still untouched.
    fn expect_empty(&self, part: &Part) -> Result<(), ParseError> {
        if self.slots[self.current].is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingOperator {
                part: part.value.clone(),
                position: part.position,
            })
        }
    }

    /// Pops the continuation stack.
    fn pop(&mut self, position: usize) -> Result<usize, ParseError> {
        self.stack
            .pop()
            .ok_or(ParseError::UnbalancedParentheses { position })
    }

    /// Adds an empty slot to the arena and returns its index.
    fn alloc(&mut self, origin: Origin, position: usize) -> usize {
        self.slots.push(Slot::new(origin, position));
        self.slots.len() - 1
    }

    /// Converts the arena into a tree.
    ///
    /// Unkeyed slots with a single child (redundant groups, and the synthetic root of a
    /// single-operand query) are replaced by that child. Slots are visited from last to first
    /// so every child is converted before its parent.
    pub fn finish(self, end: usize) -> Result<Node, ParseError> {
        if self.depth > 0 {
            return Err(ParseError::UnbalancedParentheses { position: end });
        }

        let mut nodes: Vec<Option<Node>> = Vec::with_capacity(self.slots.len());
        nodes.resize_with(self.slots.len(), || None);

        for (index, slot) in self.slots.into_iter().enumerate().rev() {
            let mut children: Vec<Node> = slot
                .children
                .iter()
                .filter_map(|&child| nodes[child].take())
                .collect();

            let node = match slot.key {
                Some(key) => Node::new(key, children),
                None if children.len() == 1 => children.remove(0),
                None if children.is_empty() => return Err(slot.unfilled()),
                None => {
                    return Err(ParseError::Internal {
                        part: String::new(),
                        position: slot.position,
                    });
                }
            };
            nodes[index] = Some(node);
        }

        nodes
            .into_iter()
            .next()
            .flatten()
            .ok_or(ParseError::EmptyQuery)
    }
}

/// True if `value` is exactly the single character `ch`.
fn is_char(value: &str, ch: char) -> bool {
    let mut chars = value.chars();
    chars.next() == Some(ch) && chars.next().is_none()
}

/// Builds a tree from a scanned part sequence.
///
/// The sequence is expected to start inside a group, as produced by the scanner.
pub fn build(parts: Vec<Part>, config: &ParserConfig) -> Result<Node, ParseError> {
    if !parts.iter().any(Part::is_operand) {
        return Err(ParseError::EmptyQuery);
    }

    let end = parts.last().map_or(0, |part| part.position);
    let mut builder = TreeBuilder::new(config);
    for part in parts {
        builder.push(part)?;
    }
    builder.finish(end)
}
