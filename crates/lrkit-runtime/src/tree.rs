//! Stack-based incremental syntax tree construction (§4.H).

use lrkit_tables::TreeAction;

use crate::token::Token;

/// A node of the syntax tree being assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// A token shifted from the input.
    Leaf(Token),
    /// A synthetic symbol injected during a reduction; has no source text.
    Virtual(u32),
    /// A reduced variable with its attached children.
    Node { variable: u32, children: Vec<Tree> },
}

/// A host callback run mid-reduction, with read access to the reduction
/// body assembled so far (§4.G: `SemAction(i)` → `reductionSemantic`).
pub type SemanticAction = dyn Fn(&[Tree]);

/// Incrementally builds a [`Tree`] in step with the parser's state stack.
///
/// `stack` mirrors the parser's logical stack depth at every quiescent
/// point between shift/reduce steps (§3 invariant).
pub struct TreeBuilder {
    stack: Vec<Tree>,
    body: std::collections::VecDeque<Tree>,
    pending: Vec<Tree>,
    promoted: Option<Tree>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            body: std::collections::VecDeque::new(),
            pending: Vec::new(),
            promoted: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `stackPush(token)` on shift.
    pub fn stack_push(&mut self, token: Token) {
        self.stack.push(Tree::Leaf(token));
    }

    /// Marks the top `n` symbols as the pending reduction body.
    pub fn reduction_prepare(&mut self, n: usize) {
        let at = self.stack.len() - n;
        self.body = self.stack.split_off(at).into();
        self.pending.clear();
        self.promoted = None;
    }

    fn apply_action(&mut self, tree: Tree, action: TreeAction) {
        match action {
            TreeAction::Drop => {}
            TreeAction::None => self.pending.push(tree),
            TreeAction::Promote => self.promoted = Some(tree),
            TreeAction::ReplaceByChildren => match tree {
                Tree::Node { children, .. } => self.pending.extend(children),
                other => self.pending.push(other),
            },
        }
    }

    /// Moves the next body symbol into the pending reduction per `action`.
    pub fn reduction_pop(&mut self, action: TreeAction) {
        let tree = self.body.pop_front().expect("PopStack beyond prepared body");
        self.apply_action(tree, action);
    }

    /// Inserts a synthetic symbol into the pending reduction per `action`.
    pub fn reduction_virtual(&mut self, virtual_index: u32, action: TreeAction) {
        self.apply_action(Tree::Virtual(virtual_index), action);
    }

    /// Runs a host callback against the body assembled so far.
    pub fn reduction_semantic(&mut self, action: &SemanticAction) {
        action(&self.pending);
    }

    /// Pops the body, pushes the new head.
    ///
    /// Exactly one tree is always pushed here, matching the parser stack's
    /// net change of `1 - production.length` for this reduction: a
    /// `head_action` that would otherwise yield zero or more than one
    /// contribution collapses to a single synthetic wrapper.
    pub fn reduce(&mut self, head: u32, head_action: TreeAction) {
        let node = self
            .promoted
            .take()
            .unwrap_or_else(|| Tree::Node { variable: head, children: std::mem::take(&mut self.pending) });

        let mut out = Vec::with_capacity(1);
        match head_action {
            TreeAction::None | TreeAction::Promote => out.push(node),
            TreeAction::Drop => {}
            TreeAction::ReplaceByChildren => match node {
                Tree::Node { children, .. } => out.extend(children),
                other => out.push(other),
            },
        }

        match out.len() {
            1 => self.stack.push(out.pop().unwrap()),
            0 => self.stack.push(Tree::Virtual(head)),
            _ => self.stack.push(Tree::Node { variable: head, children: out }),
        }
    }

    /// The root subtree, once the parser has accepted.
    pub fn get_tree(&self) -> &Tree {
        self.stack.last().expect("get_tree called before accept")
    }

    pub fn into_tree(mut self) -> Tree {
        self.stack.pop().expect("into_tree called before accept")
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
