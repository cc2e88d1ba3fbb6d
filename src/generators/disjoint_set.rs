/// Union-find forest over cell indices `0..len`, stored as an arena of parent links.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    trees: usize,
}

impl DisjointSet {
    /// `len` singleton trees, each node its own root.
    pub fn new(len: usize) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
            rank: vec![0; len],
            trees: len,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct trees in the forest.
    pub fn tree_count(&self) -> usize {
        self.trees
    }

    /// Root of the tree containing `node`, following the parent chain all the
    /// way up and pointing every node on the way directly at the root.
    pub fn find_root(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find_root(a) == self.find_root(b)
    }

    /// Merges the trees containing `a` and `b`. Returns `false` if they were
    /// already the same tree.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find_root(a);
        let root_b = self.find_root(b);

        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.trees -= 1;
        true
    }
}
