// Width-allocation layout for drawing the decision tree

use super::DecisionNode;

/// Assign positions to every node under `root`.
///
/// Each leaf gets one unit of horizontal space; a parent is centred over the
/// span its children occupy, and `y` is the node depth. Sibling subtrees
/// occupy disjoint x intervals. Returns the total width in leaf units.
pub fn assign_positions(root: &mut DecisionNode) -> f64 {
    place(root, 0.0)
}

fn place(node: &mut DecisionNode, left: f64) -> f64 {
    node.position.y = node.depth as f64;

    if node.children.is_empty() {
        node.position.x = left + 0.5;
        return 1.0;
    }

    let mut cursor = left;
    for child in &mut node.children {
        cursor += place(child, cursor);
    }

    node.position.x = (left + cursor) / 2.0;
    cursor - left
}

/// Horizontal extent `(min_x, max_x)` of a subtree
pub fn subtree_extent(node: &DecisionNode) -> (f64, f64) {
    node.children
        .iter()
        .map(subtree_extent)
        .fold((node.position.x, node.position.x), |(lo, hi), (clo, chi)| {
            (lo.min(clo), hi.max(chi))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scenario::Scenario;
    use crate::tree::{explore, ExploreOptions};

    fn check_siblings(node: &DecisionNode) {
        for pair in node.children.windows(2) {
            let (_, left_hi) = subtree_extent(&pair[0]);
            let (right_lo, _) = subtree_extent(&pair[1]);
            assert!(left_hi < right_lo, "sibling subtrees overlap");
        }
        node.children.iter().for_each(check_siblings);
    }

    #[test]
    fn test_siblings_never_overlap() {
        let s = Scenario::classic();
        let tree = explore(
            &s.allocation_matrix(),
            &s.max_matrix(),
            &s.available,
            ExploreOptions::default(),
        );
        check_siblings(tree.root());
    }

    #[test]
    fn test_parent_centred_and_depth_as_y() {
        let allocation = vec![vec![0]; 2];
        let max = vec![vec![0]; 2];
        let tree = explore(&allocation, &max, &[0], ExploreOptions::default());

        let root = tree.root();
        assert_eq!(root.position, crate::tree::Position { x: 1.0, y: 0.0 });
        assert_eq!(root.children[0].position.x, 0.5);
        assert_eq!(root.children[1].position.x, 1.5);
        assert_eq!(root.children[1].children[0].position.y, 2.0);
    }
}
