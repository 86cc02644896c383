//! Union-find (disjoint set union) used by the spanning forest selector.
//!
//! Components are identified by their representative: two nodes share a
//! component exactly when `find` returns the same root. Roots are linked by
//! size, with the lower index winning ties so merges are reproducible.

#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    pub(crate) const fn components(&self) -> usize {
        self.components
    }

    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the components holding `left` and `right`.
    ///
    /// Returns `false` when both already share a component.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let (parent, child) = choose_parent_child(
            left_root,
            right_root,
            self.size[left_root],
            self.size[right_root],
        );
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        self.components -= 1;
        true
    }

    #[cfg(test)]
    pub(crate) fn component_size(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.size[root]
    }
}

fn choose_parent_child(
    left_root: usize,
    right_root: usize,
    left_size: usize,
    right_size: usize,
) -> (usize, usize) {
    if left_size > right_size {
        return (left_root, right_root);
    }
    if right_size > left_size {
        return (right_root, left_root);
    }

    if left_root <= right_root {
        (left_root, right_root)
    } else {
        (right_root, left_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn starts_with_singletons() {
        let mut sets = DisjointSet::new(4);
        assert_eq!(sets.components(), 4);
        assert!((0..4).all(|node| sets.find(node) == node));
    }

    #[rstest]
    fn union_reports_whether_components_merged() {
        let mut sets = DisjointSet::new(3);
        assert!(sets.union(0, 1));
        assert!(!sets.union(1, 0));
        assert_eq!(sets.components(), 2);
        assert_eq!(sets.find(0), sets.find(1));
        assert_ne!(sets.find(0), sets.find(2));
    }

    #[rstest]
    fn larger_component_absorbs_smaller() {
        let mut sets = DisjointSet::new(5);
        sets.union(3, 4);
        sets.union(3, 2);
        let big_root = sets.find(4);
        sets.union(0, 2);
        assert_eq!(sets.find(0), big_root);
        assert_eq!(sets.component_size(0), 4);
        assert_eq!(sets.component_size(1), 1);
    }

    #[rstest]
    fn merged_chain_points_at_one_root() {
        let mut sets = DisjointSet::new(6);
        for node in 1..6 {
            sets.union(node - 1, node);
        }
        let root = sets.find(5);
        assert!((0..6).all(|node| sets.parent[node] == root));
        assert_eq!(sets.components(), 1);
    }
}
