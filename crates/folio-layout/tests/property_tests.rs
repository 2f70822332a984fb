//! Property tests for main-axis resolution and pagination.

use folio_common::RecordingSink;
use folio_layout::{
    AvailableArea, Bounds, FlexItem, LayoutOutcome, StaticContent, StaticRenderer, layout,
    resolve_main_sizes,
};
use folio_tree::{ElementTree, Length, NodeId, Style};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn item(index: usize, base: u8, grow: u8, shrink: u8) -> FlexItem {
    FlexItem {
        node: NodeId(index),
        base: f32::from(base),
        bounds: Bounds::UNBOUNDED,
        grow: f32::from(grow),
        shrink: f32::from(shrink),
        outer: f32::from(base % 7),
    }
}

fn total(items: &[FlexItem], sizes: &[f32]) -> f32 {
    items.iter().zip(sizes).map(|(i, s)| s + i.outer).sum()
}

#[quickcheck]
fn prop_inflexible_items_keep_base(bases: Vec<u8>, available: u16) -> bool {
    let items: Vec<FlexItem> = bases
        .iter()
        .enumerate()
        .map(|(i, &base)| item(i, base, 0, 0))
        .collect();
    let resolution = resolve_main_sizes(&items, Some(f32::from(available)));
    resolution
        .sizes
        .iter()
        .zip(&items)
        .all(|(size, item)| *size == item.base)
}

#[quickcheck]
fn prop_grow_fills_available(bases: Vec<u8>, extra: u16) -> TestResult {
    if bases.is_empty() {
        return TestResult::discard();
    }
    let items: Vec<FlexItem> = bases
        .iter()
        .enumerate()
        .map(|(i, &base)| item(i, base, base % 3 + 1, 1))
        .collect();
    let used = total(&items, &items.iter().map(|i| i.base).collect::<Vec<_>>());
    let available = used + f32::from(extra);
    let resolution = resolve_main_sizes(&items, Some(available));
    let line = total(&items, &resolution.sizes);
    TestResult::from_bool((line - available).abs() <= 0.01 * available.max(1.0))
}

#[quickcheck]
fn prop_shrink_meets_available(bases: Vec<u8>, fraction: u8) -> TestResult {
    let items: Vec<FlexItem> = bases
        .iter()
        .enumerate()
        .filter(|&(_, &base)| base > 0)
        .map(|(i, &base)| item(i, base, 0, base % 4 + 1))
        .collect();
    if items.is_empty() {
        return TestResult::discard();
    }
    let outer: f32 = items.iter().map(|i| i.outer).sum();
    let content: f32 = items.iter().map(|i| i.base).sum();
    // Stay above the point where any item would be clamped at zero.
    let smallest = items
        .iter()
        .map(|i| i.base / (i.shrink * i.base))
        .fold(f32::INFINITY, f32::min);
    let weight: f32 = items.iter().map(FlexItem::scaled_shrink).sum();
    let max_deficit = smallest * weight;
    let deficit = max_deficit.min(content) * f32::from(fraction) / 255.0;
    let available = outer + content - deficit;
    let resolution = resolve_main_sizes(&items, Some(available));
    let line = total(&items, &resolution.sizes);
    TestResult::from_bool((line - available).abs() <= 0.01 * available.max(1.0))
}

#[quickcheck]
fn prop_clamp_is_idempotent(a: u16, b: u16, value: i32) -> bool {
    let bounds = Bounds {
        min: f32::from(a.min(b)),
        max: f32::from(a.max(b)),
    };
    #[allow(clippy::cast_precision_loss)]
    let once = bounds.clamp(value as f32);
    bounds.clamp(once) == once
}

/// A row of rigid items with the given heights, the first one optionally rotated.
fn row(heights: &[u8], rotation: f32) -> (ElementTree<StaticContent>, NodeId, Vec<NodeId>) {
    let mut tree = ElementTree::new();
    let root = tree.container(Style::default());
    let items = heights
        .iter()
        .enumerate()
        .map(|(index, &height)| {
            let mut style = Style::default().with_basis(Length::px(20.0));
            if index == 0 {
                style = style.with_rotation(rotation);
            }
            let leaf = tree.leaf(style, StaticContent::rigid(20.0, f32::from(height)));
            tree.append_child(root, leaf).unwrap();
            leaf
        })
        .collect();
    (tree, root, items)
}

fn run(
    tree: &ElementTree<StaticContent>,
    root: NodeId,
    height: u8,
) -> LayoutOutcome<StaticContent> {
    let mut sink = RecordingSink::default();
    let area = AvailableArea::definite(0.0, 0.0, 10_000.0, f32::from(height));
    layout(tree, root, area, &StaticRenderer, &mut sink).unwrap()
}

#[quickcheck]
fn prop_layout_is_deterministic(heights: Vec<u8>, page: u8) -> bool {
    let (tree, root, _) = row(&heights, 0.0);
    run(&tree, root, page) == run(&tree, root, page)
}

#[quickcheck]
fn prop_partial_keeps_every_item_once(heights: Vec<u8>, page: u8) -> TestResult {
    let (tree, root, items) = row(&heights, 0.0);
    match run(&tree, root, page) {
        LayoutOutcome::Partial { placed, remainder } => {
            // Rigid items never split, so each is either placed or deferred.
            let mut seen = placed.child_nodes();
            seen.extend(remainder.item_sources());
            TestResult::from_bool(seen == items)
        }
        _ => TestResult::discard(),
    }
}

#[quickcheck]
fn prop_rotation_keeps_item_sizes(heights: Vec<u8>, turn: u8) -> TestResult {
    if heights.is_empty() {
        return TestResult::discard();
    }
    let _ = env_logger::builder().is_test(true).try_init();
    let (plain, plain_root, _) = row(&heights, 0.0);
    let (turned, turned_root, _) = row(&heights, f32::from(turn) / 40.0);

    let mut sink = RecordingSink::default();
    let area = AvailableArea::new(0.0, 0.0, Some(10_000.0), None);
    let before = layout(&plain, plain_root, area, &StaticRenderer, &mut sink).unwrap();
    let after = layout(&turned, turned_root, area, &StaticRenderer, &mut sink).unwrap();
    let (Some(before), Some(after)) = (before.fragment(), after.fragment()) else {
        return TestResult::failed();
    };
    // Only the occupied box of the rotated item may differ.
    TestResult::from_bool(
        before.boxes == after.boxes
            && before
                .children
                .iter()
                .zip(&after.children)
                .all(|(a, b)| a.boxes.margin_box == b.boxes.margin_box),
    )
}
