use super::*;
use lrkit_core::Position;
use lrkit_tables::TreeAction;

fn leaf(symbol_id: u32, value: &str) -> Token {
    Token::new(symbol_id, value, value, Position::new(1, 1))
}

#[test]
fn none_action_collects_children_into_a_node() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.stack_push(leaf(1, "b"));
    builder.reduction_prepare(2);
    builder.reduction_pop(TreeAction::None);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(10, TreeAction::None);

    assert_eq!(builder.depth(), 1);
    match builder.into_tree() {
        Tree::Node { variable, children } => {
            assert_eq!(variable, 10);
            assert_eq!(children, vec![Tree::Leaf(leaf(0, "a")), Tree::Leaf(leaf(1, "b"))]);
        }
        other => panic!("expected Node, got {other:?}"),
    }
}

#[test]
fn drop_action_discards_the_popped_symbol() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.stack_push(leaf(1, "b"));
    builder.reduction_prepare(2);
    builder.reduction_pop(TreeAction::Drop);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(10, TreeAction::None);

    match builder.into_tree() {
        Tree::Node { children, .. } => assert_eq!(children, vec![Tree::Leaf(leaf(1, "b"))]),
        other => panic!("expected Node, got {other:?}"),
    }
}

#[test]
fn promote_action_replaces_the_head_with_the_popped_symbol() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.reduction_prepare(1);
    builder.reduction_pop(TreeAction::Promote);
    builder.reduce(10, TreeAction::None);

    assert_eq!(builder.into_tree(), Tree::Leaf(leaf(0, "a")));
}

#[test]
fn replace_by_children_splices_a_nested_node_into_the_pending_body() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.stack_push(leaf(1, "b"));
    builder.reduction_prepare(2);
    builder.reduction_pop(TreeAction::None);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(1, TreeAction::None); // inner node: variable 1, [a, b]

    builder.stack_push(leaf(2, "c"));
    builder.reduction_prepare(2); // inner node + c
    builder.reduction_pop(TreeAction::ReplaceByChildren);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(20, TreeAction::None);

    match builder.into_tree() {
        Tree::Node { variable, children } => {
            assert_eq!(variable, 20);
            assert_eq!(
                children,
                vec![Tree::Leaf(leaf(0, "a")), Tree::Leaf(leaf(1, "b")), Tree::Leaf(leaf(2, "c"))]
            );
        }
        other => panic!("expected Node, got {other:?}"),
    }
}

/// A `head_action` of `Drop` would otherwise contribute zero trees to the
/// stack, breaking the parser/builder depth invariant; `reduce` collapses
/// that case to a synthetic virtual wrapper instead.
#[test]
fn dropped_head_still_pushes_exactly_one_tree() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    let depth_before_reduction = builder.depth();
    builder.reduction_prepare(1);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(7, TreeAction::Drop);

    // Net change for this reduction is `1 - reduction_length` (1 - 1 = 0),
    // matching the parser stack's net change for the same production.
    assert_eq!(builder.depth(), depth_before_reduction);
    assert_eq!(builder.into_tree(), Tree::Virtual(7));
}

/// A `head_action` of `ReplaceByChildren` on a multi-child node would
/// otherwise contribute more than one tree to the stack; `reduce` wraps
/// them back into a single node under the original head.
#[test]
fn replace_by_children_head_action_rewraps_multiple_children() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.stack_push(leaf(1, "b"));
    builder.reduction_prepare(2);
    builder.reduction_pop(TreeAction::None);
    builder.reduction_pop(TreeAction::None);
    let depth_before_reduce = builder.depth();
    builder.reduce(5, TreeAction::ReplaceByChildren);

    assert_eq!(builder.depth(), depth_before_reduce + 1);
    match builder.into_tree() {
        Tree::Node { variable, children } => {
            assert_eq!(variable, 5);
            assert_eq!(children.len(), 2);
        }
        other => panic!("expected a rewrapped Node, got {other:?}"),
    }
}

#[test]
fn virtual_symbols_participate_in_reductions_without_source_text() {
    let mut builder = TreeBuilder::new();
    builder.stack_push(leaf(0, "a"));
    builder.reduction_prepare(1);
    builder.reduction_virtual(3, TreeAction::None);
    builder.reduction_pop(TreeAction::None);
    builder.reduce(10, TreeAction::None);

    match builder.into_tree() {
        Tree::Node { children, .. } => {
            assert_eq!(children[0], Tree::Virtual(3));
            assert_eq!(children[1], Tree::Leaf(leaf(0, "a")));
        }
        other => panic!("expected Node, got {other:?}"),
    }
}
