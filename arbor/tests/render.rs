use arbor::prelude::*;

fn sample() -> TreeView<i32> {
    TreeView::with_root(NodeDecl::new("root").expanded(true).children([
        NodeDecl::new("A").value(1),
        NodeDecl::new("B").value(2).child(NodeDecl::new("C").value(3)),
    ]))
}

fn flat_labels(visual: &VisualNode) -> Vec<String> {
    visual.flatten().iter().map(|row| row.label.clone()).collect()
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_root_renders_under_constant_key() {
    let tree = sample();
    let visual = tree.render();
    assert_eq!(visual.key, NodeId::ROOT);
    assert_eq!(visual.depth, 0);
}

#[test]
fn test_collapsed_children_are_omitted() {
    let tree = sample();
    let visual = tree.render();
    // B is collapsed: C is not rendered but the affordance is.
    assert_eq!(flat_labels(&visual), ["root", "A", "B"]);
    let rows = visual.flatten();
    assert!(rows[2].has_children);
    assert!(!rows[2].expanded);

    tree.find_item(&2).unwrap().unwrap().set_expanded(true).unwrap();
    assert_eq!(flat_labels(&tree.render()), ["root", "A", "B", "C"]);
}

#[test]
fn test_depth_follows_nesting() {
    let tree = sample();
    tree.render();
    tree.expand_all().unwrap();
    let visual = tree.render();
    let depths: Vec<u16> = visual.flatten().iter().map(|row| row.depth).collect();
    assert_eq!(depths, [0, 1, 1, 2]);
}

#[test]
fn test_keys_are_stable_across_renders() {
    let tree = sample();
    let first = tree.render();
    let b = tree.find_item(&2).unwrap().unwrap();
    b.set_expanded(true).unwrap();
    let second = tree.render();
    assert_eq!(first.flatten()[2].key, b.key());
    assert_eq!(second.flatten()[2].key, b.key());
}

// ============================================================================
// State flags
// ============================================================================

#[test]
fn test_selection_highlight_tracks_select_item() {
    let tree = sample();
    tree.render();
    let a = tree.find_item(&1).unwrap().unwrap();
    tree.select_item(Some(&a)).unwrap();
    let visual = tree.render();
    let selected: Vec<bool> = visual.flatten().iter().map(|row| row.selected).collect();
    assert_eq!(selected, [false, true, false]);

    tree.select_item(None).unwrap();
    let visual = tree.render();
    assert!(visual.flatten().iter().all(|row| !row.selected));
}

#[test]
fn test_checkbox_state_is_rendered() {
    let tree = sample();
    tree.render();
    let a = tree.find_item(&1).unwrap().unwrap();
    a.set_checked(true).unwrap();
    let visual = tree.render();
    let checked: Vec<bool> = visual.flatten().iter().map(|row| row.checked).collect();
    assert_eq!(checked, [false, true, false]);
}

// ============================================================================
// Style inheritance
// ============================================================================

#[test]
fn test_style_resolution_at_render_time() {
    let tree: TreeView<i32> = TreeView::new(
        TreeViewProps::new().item_style(ItemStyle::Accent).root(
            NodeDecl::new("root").expanded(true).children([
                NodeDecl::new("plain-default"),
                NodeDecl::new("override")
                    .item_style(ItemStyle::Muted)
                    .expanded(true)
                    .child(NodeDecl::new("inherits")),
            ]),
        ),
    );
    let visual = tree.render();
    let styles: Vec<ItemStyle> = visual.flatten().iter().map(|row| row.style).collect();
    // Container default, default, own override, inherited override.
    assert_eq!(
        styles,
        [ItemStyle::Accent, ItemStyle::Accent, ItemStyle::Muted, ItemStyle::Muted]
    );
}

#[test]
fn test_effective_style_matches_render() {
    let tree: TreeView<i32> = TreeView::new(
        TreeViewProps::new().item_style(ItemStyle::Accent).root(
            NodeDecl::new("root")
                .item_style(ItemStyle::Muted)
                .expanded(true)
                .child(NodeDecl::new("child").value(1)),
        ),
    );
    tree.render();
    let child = tree.find_item(&1).unwrap().unwrap();
    assert_eq!(child.item_style().unwrap(), None);
    assert_eq!(child.effective_style().unwrap(), ItemStyle::Muted);
}

// ============================================================================
// Dirty tracking
// ============================================================================

#[test]
fn test_mutations_raise_the_dirty_flag() {
    let tree = sample();
    tree.render();
    tree.clear_dirty();
    assert!(!tree.is_dirty());

    let a = tree.find_item(&1).unwrap().unwrap();
    a.set_checked(true).unwrap();
    assert!(tree.is_dirty());

    tree.clear_dirty();
    tree.select_item(Some(&a)).unwrap();
    assert!(tree.is_dirty());

    tree.clear_dirty();
    a.set_props(NodeProps::new().label("renamed")).unwrap();
    assert!(tree.is_dirty());
}

// ============================================================================
// Label fitting
// ============================================================================

#[test]
fn test_fit_label_truncates_with_ellipsis() {
    let tree = TreeView::<i32>::with_root(NodeDecl::new("configuration"));
    let visual = tree.render();
    assert_eq!(visual.fit_label(20), "configuration");
    assert_eq!(visual.fit_label(8), "configu…");
    assert_eq!(visual.fit_label(0), "");
}
