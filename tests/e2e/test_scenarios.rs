//! End-to-end scenarios over the public API: notation in, laid-out trees
//! and SVG out, plus the layout properties the crate guarantees.

use annotree::config::LayoutConfig;
use annotree::document::graphview::GraphView;
use annotree::document::{ArrowDirection, Document, NodeRef};
use annotree::hierarchy::HierId;
use annotree::layout::{IncomingRef, LayoutEngine, MonospaceMeasure, PlacedNode};
use annotree::{render_scene, standoff};

fn engine() -> LayoutEngine<MonospaceMeasure> {
    LayoutEngine::new(LayoutConfig::default(), MonospaceMeasure::new(10.0))
}

fn engine_with_depth(max_depth: usize) -> LayoutEngine<MonospaceMeasure> {
    let config = LayoutConfig {
        max_depth,
        ..LayoutConfig::default()
    };
    LayoutEngine::new(config, MonospaceMeasure::new(10.0))
}

fn assert_no_overlap(nodes: &[PlacedNode], layer_count: usize, min_sep: f64) {
    for depth in 0..layer_count {
        let mut layer: Vec<&PlacedNode> = nodes.iter().filter(|n| n.depth == depth).collect();
        layer.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        for pair in layer.windows(2) {
            let gap = pair[1].offset - pair[0].offset;
            assert!(
                gap >= pair[0].width / 2.0 + pair[1].width / 2.0 + min_sep - 1e-9,
                "layer {depth}: '{}' at {} overlaps '{}' at {}",
                pair[0].label,
                pair[0].offset,
                pair[1].label,
                pair[1].offset
            );
        }
    }
}

/// A word with one incoming link (arrow pointing at it) and one ordinary
/// forward link: the incoming link starts out as an affordance and is
/// promoted to its own subtree by a graft.
#[test]
fn test_promote_incoming_link_scenario() {
    let mut doc = Document::new();
    let w = doc.add_word("market");
    let a = doc.add_word("rally");
    let b = doc.add_word("crash");
    let l1 = doc.add_link(
        "caused-by",
        None,
        None,
        false,
        vec![
            (NodeRef::Word(w), ArrowDirection::Incoming),
            (NodeRef::Word(b), ArrowDirection::Outgoing),
        ],
    );
    let l2 = doc.add_link(
        "led-to",
        None,
        None,
        false,
        vec![
            (NodeRef::Word(w), ArrowDirection::Outgoing),
            (NodeRef::Word(a), ArrowDirection::Outgoing),
        ],
    );

    let mut e = engine();
    e.rebuild(&doc, NodeRef::Word(w)).unwrap();

    // l1 is an affordance, l2 a child
    let primary = &e.groups()[0].tree;
    let root = &primary[primary.root];
    assert_eq!(root.incoming, vec![l1]);
    let child_entities: Vec<NodeRef> = root.children.iter().map(|&c| primary[c].node).collect();
    assert_eq!(child_entities, vec![NodeRef::Link(l2)]);

    // promote the affordance
    let at = IncomingRef {
        node: l1,
        group: 0,
        anchor: e.groups()[0].tree.root,
    };
    e.graft(&doc, at).unwrap();

    let groups = e.groups();
    assert_eq!(groups.len(), 2);
    assert!(groups[0].tree[at.anchor].incoming.is_empty());
    let grafted = &groups[1];
    assert_eq!(grafted.tree[grafted.tree.root].node, NodeRef::Link(l1));
    // the anchor entity is not rendered a second time in the grafted group
    let rendered = grafted.tree.descendants(grafted.tree.root);
    assert!(rendered.iter().all(|&id| grafted.tree[id].node != NodeRef::Word(w)));
}

#[test]
fn test_no_overlap_across_sentence() {
    let src = "\
word w1 the
word w2 chancellor
word w3 announced
word w4 sweeping
word w5 reforms
word w6 yesterday
link e1 top trigger=w3 w2 w5 w6
link e2 top trigger=w4 w5
link c1 top type=Coref w2 w6
";
    let parsed = standoff::parse(src).unwrap();
    let e = engine();
    let result = e.layout(&parsed.doc, parsed.ids["w3"]).unwrap();
    assert!(result.nodes.len() >= 6);
    assert_no_overlap(&result.nodes, result.layer_count, 20.0);
}

#[test]
fn test_layout_deterministic_across_parses() {
    let src = "\
word w1 one
word w2 two
word w3 three
link e1 top trigger=w1 w2 w3
link e2 top trigger=w2 w3
";
    let first = {
        let parsed = standoff::parse(src).unwrap();
        engine().layout(&parsed.doc, parsed.ids["w1"]).unwrap()
    };
    let second = {
        let parsed = standoff::parse(src).unwrap();
        engine().layout(&parsed.doc, parsed.ids["w1"]).unwrap()
    };
    assert_eq!(first.nodes.len(), second.nodes.len());
    for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
        assert_eq!(a.label, b.label);
        assert_eq!(a.depth, b.depth);
        assert_eq!(a.offset, b.offset);
    }
    assert_eq!(first.max_width, second.max_width);
}

#[test]
fn test_cycle_safety_bounded_by_max_depth() {
    // a -> ab -> b -> ba -> a through the two links' arrow directions
    let mut doc = Document::new();
    let a = doc.add_word("a");
    let b = doc.add_word("b");
    doc.add_link(
        "ab",
        None,
        None,
        false,
        vec![
            (NodeRef::Word(a), ArrowDirection::Incoming),
            (NodeRef::Word(b), ArrowDirection::Outgoing),
        ],
    );
    doc.add_link(
        "ba",
        None,
        None,
        false,
        vec![
            (NodeRef::Word(b), ArrowDirection::Incoming),
            (NodeRef::Word(a), ArrowDirection::Outgoing),
        ],
    );
    // the underlying entity graph really is cyclic
    assert!(GraphView::from_document(&doc).is_cyclic());

    let mut e = engine_with_depth(8);
    e.rebuild(&doc, NodeRef::Word(a)).unwrap();
    let tree = &e.groups()[0].tree;
    assert!(tree.nodes.iter().all(|n| n.depth <= 8));
    // bounded, but the cycle was explored up to the bound
    assert!(tree.nodes.iter().any(|n| n.depth == 8));
}

#[test]
fn test_graft_continuity_via_notation() {
    let src = "\
word w1 summit
word w2 agreement
word w3 collapse
link fwd w1 w2
link back w1:in w3
";
    let parsed = standoff::parse(src).unwrap();
    let NodeRef::Link(back) = parsed.ids["back"] else {
        panic!("back must be a link");
    };

    let mut e = engine();
    e.rebuild(&parsed.doc, parsed.ids["w1"]).unwrap();

    let anchor: HierId = e.groups()[0].tree.root;
    let (ax, ay) = {
        let n = &e.groups()[0].tree[anchor];
        (n.offset, n.y)
    };

    e.graft(
        &parsed.doc,
        IncomingRef {
            node: back,
            group: 0,
            anchor,
        },
    )
    .unwrap();

    // anchor did not move
    let n = &e.groups()[0].tree[anchor];
    assert_eq!((n.offset, n.y), (ax, ay));

    // the grafted occurrence of w1 coincides with the anchor exactly
    let grafted = &e.groups()[1];
    let occurrence = grafted
        .tree
        .nodes
        .iter()
        .find(|n| n.node == parsed.ids["w1"])
        .expect("w1 occurrence inside the grafted tree");
    assert_eq!((occurrence.offset, occurrence.y), (ax, ay));

    // every node of the primary group kept its coordinates
    let primary = &e.groups()[0].tree;
    for id in primary.descendants(primary.root) {
        assert!(primary[id].offset.is_finite());
    }
}

#[test]
fn test_render_scene_with_graft_affordance() {
    let src = "\
word w1 price
word w2 supply
link back w1:in w2
";
    let svg = render_scene(src, "w1", None).unwrap();
    assert!(svg.contains("price"));
    // the excluded link shows up as a dashed affordance, not a subtree
    assert!(svg.contains(r#"class="incoming""#));
    assert!(!svg.contains("supply"));
}

#[test]
fn test_max_depth_truncates_scene() {
    let src = "\
word w1 a
word w2 b
word w3 c
link l1 w1 w2
link l2 w2 w3
";
    let parsed = standoff::parse(src).unwrap();

    let mut deep = engine();
    deep.rebuild(&parsed.doc, parsed.ids["w1"]).unwrap();
    let deep_count = deep.groups()[0].tree.len();

    let mut shallow = engine_with_depth(1);
    shallow.rebuild(&parsed.doc, parsed.ids["w1"]).unwrap();
    let shallow_tree = &shallow.groups()[0].tree;
    assert!(shallow_tree.len() < deep_count);
    assert!(shallow_tree.nodes.iter().all(|n| n.depth <= 1));
}

#[test]
fn test_sibling_edges_render_wider_apart() {
    let src = "\
word w1 he
word w2 himself
link c1 top type=Coref w1 w2
";
    let parsed = standoff::parse(src).unwrap();
    let e = engine();
    let result = e.layout(&parsed.doc, parsed.ids["w1"]).unwrap();
    let he = result.nodes.iter().find(|n| n.label == "he").unwrap();
    let himself = result.nodes.iter().find(|n| n.label == "himself").unwrap();
    assert_eq!(he.depth, himself.depth);
    let gap = (himself.offset - he.offset).abs();
    assert!(gap >= he.width / 2.0 + himself.width / 2.0 + 50.0 - 1e-9);
}
