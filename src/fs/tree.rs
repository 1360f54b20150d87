//! The filtered directory tree: a read-only logical view over the file
//! system, rooted at a chosen directory, with lazily loaded children and a
//! live name filter over file entries.
//!
//! Visibility is recomputed wholesale by [`FolderTree::refresh`] whenever the
//! root, the filter, or the expansion state changes. There is no incremental
//! bookkeeping and no background work, so no stale rows can survive a change.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::fs::filter::NameFilter;

/// Kind of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// Raster formats the host image viewer is expected to load.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "svg", "ico",
];

/// Whether a display name carries a known image extension.
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Directory visibility policy under an active filter.
///
/// Files are always matched by name; the policy only decides what happens to
/// directories that contain no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Directories are never hidden by the text filter. O(1) per row.
    #[default]
    Shallow,
    /// A directory is shown only when its loaded subtree contains a
    /// matching file (the display root is always shown).
    Prune,
}

impl FilterPolicy {
    /// Parse a policy from a config string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "prune" => FilterPolicy::Prune,
            _ => FilterPolicy::Shallow,
        }
    }

    /// Display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            FilterPolicy::Shallow => "shallow",
            FilterPolicy::Prune => "prune",
        }
    }

    /// The other policy.
    pub fn toggled(&self) -> Self {
        match self {
            FilterPolicy::Shallow => FilterPolicy::Prune,
            FilterPolicy::Prune => FilterPolicy::Shallow,
        }
    }
}

/// A node in the directory tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Immediate children, loaded on first expansion. Sorted on load:
    /// directories before files, both case-insensitively by name.
    pub children: Option<Vec<Node>>,
    pub is_expanded: bool,
    pub depth: usize,
    pub is_hidden: bool,
}

impl Node {
    /// Create a node from a filesystem path.
    ///
    /// Entry kind follows symlinks, so a link to a directory browses like a
    /// directory; broken links fall back to their own metadata and list as
    /// files.
    pub fn new(path: &Path, depth: usize) -> Result<Self> {
        let metadata = fs::metadata(path).or_else(|_| fs::symlink_metadata(path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let kind = if metadata.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        let is_hidden = name.starts_with('.');

        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind,
            children: None,
            is_expanded: false,
            depth,
            is_hidden,
        })
    }

    /// Pure kind predicate.
    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// The node's absolute filesystem path.
    pub fn resolve_path(&self) -> &Path {
        &self.path
    }

    /// Read this directory's entries into `children`, sorted.
    ///
    /// An I/O error while listing is surfaced immediately; there is no
    /// partial result.
    pub fn load_children(&mut self) -> Result<()> {
        if self.kind != NodeKind::Directory {
            return Ok(());
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            children.push(Node::new(&entry.path(), self.depth + 1)?);
        }

        children.sort_by(|a, b| {
            (b.kind == NodeKind::Directory)
                .cmp(&(a.kind == NodeKind::Directory))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        self.children = Some(children);
        Ok(())
    }
}

/// One entry of the computed visible set, ready for rendering.
#[derive(Debug, Clone)]
pub struct VisibleRow {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
    pub is_hidden: bool,
}

impl VisibleRow {
    fn from_node(node: &Node, is_last: bool) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            depth: node.depth,
            is_expanded: node.is_expanded,
            is_last_sibling: is_last,
            is_hidden: node.is_hidden,
        }
    }
}

/// State of the folder browser tree.
///
/// Owns the node hierarchy and the flattened visible set derived from it.
pub struct FolderTree {
    pub root: Node,
    /// Visible set in display order; row 0 is always the display root.
    pub rows: Vec<VisibleRow>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub show_hidden: bool,
    /// Restrict visible files to known image extensions.
    pub images_only: bool,
    /// Indices into `rows` of multi-selected entries.
    pub multi_selected: HashSet<usize>,
    pub policy: FilterPolicy,
    filter: NameFilter,
}

impl FolderTree {
    /// Create a tree rooted at the given directory.
    pub fn new(path: &Path) -> Result<Self> {
        let root = Self::build_root(path)?;
        let mut tree = Self {
            root,
            rows: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            show_hidden: false,
            images_only: false,
            multi_selected: HashSet::new(),
            policy: FilterPolicy::default(),
            filter: NameFilter::default(),
        };
        tree.refresh();
        Ok(tree)
    }

    /// Validate and fully load a new root before any state is replaced, so a
    /// failed `set_root` leaves the tree at its previous root.
    fn build_root(path: &Path) -> Result<Node> {
        if !path.is_dir() {
            return Err(AppError::InvalidRoot(path.to_path_buf()));
        }
        let mut root = Node::new(path, 0)?;
        root.load_children()?;
        root.is_expanded = true;
        Ok(root)
    }

    /// The current display root.
    pub fn display_root(&self) -> &Node {
        &self.root
    }

    /// The active name filter.
    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }

    /// Whether a non-trivial narrowing is in effect.
    pub fn is_filtering(&self) -> bool {
        !self.filter.is_match_all() || self.images_only
    }

    /// Re-root the visible hierarchy at `path`. The filter is kept.
    pub fn set_root(&mut self, path: &Path) -> Result<()> {
        let root = Self::build_root(path)?;
        self.root = root;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh();
        Ok(())
    }

    /// Replace the filter pattern and recompute visibility. Never fails:
    /// any string is a valid pattern.
    pub fn set_filter(&mut self, pattern: &str) {
        self.filter = NameFilter::new(pattern);
        self.refresh();
    }

    /// Make `path` the new display root. Requires a directory; the filter
    /// is kept.
    pub fn navigate_into(&mut self, path: &Path) -> Result<()> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(AppError::NotADirectory(path.to_path_buf()));
        }
        self.set_root(path)
    }

    /// Re-root at the parent of the current root. Returns `false` at the
    /// filesystem root.
    pub fn navigate_up(&mut self) -> Result<bool> {
        let parent = match self.root.path.parent() {
            Some(p) => p.to_path_buf(),
            None => return Ok(false),
        };
        self.set_root(&parent)?;
        Ok(true)
    }

    /// Recompute the visible set from the node hierarchy.
    ///
    /// Multi-selection is cleared since row indices change.
    pub fn refresh(&mut self) {
        let mut rows = Vec::new();
        self.flatten_into(&self.root, &mut rows, true);
        self.rows = rows;
        self.multi_selected.clear();
        if !self.rows.is_empty() && self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len() - 1;
        }
    }

    fn flatten_into(&self, node: &Node, rows: &mut Vec<VisibleRow>, is_last: bool) {
        rows.push(VisibleRow::from_node(node, is_last));

        if node.is_directory() && node.is_expanded {
            if let Some(children) = &node.children {
                let emitting: Vec<&Node> =
                    children.iter().filter(|c| self.node_emits(c)).collect();
                let count = emitting.len();
                for (i, child) in emitting.into_iter().enumerate() {
                    self.flatten_into(child, rows, i + 1 == count);
                }
            }
        }
    }

    /// The visibility predicate applied to every non-root entry.
    fn node_emits(&self, node: &Node) -> bool {
        if node.is_hidden && !self.show_hidden {
            return false;
        }
        match node.kind {
            NodeKind::File => self.file_accepted(node),
            NodeKind::Directory => match self.policy {
                FilterPolicy::Shallow => true,
                FilterPolicy::Prune => !self.is_filtering() || self.subtree_matches(node),
            },
        }
    }

    fn file_accepted(&self, node: &Node) -> bool {
        if self.images_only && !is_image_name(&node.name) {
            return false;
        }
        self.filter.matches(&node.name)
    }

    /// Containment check for the prune policy, over loaded children only.
    fn subtree_matches(&self, node: &Node) -> bool {
        if !node.is_directory() {
            return self.file_accepted(node);
        }
        node.children
            .iter()
            .flatten()
            .filter(|c| self.show_hidden || !c.is_hidden)
            .any(|c| self.subtree_matches(c))
    }

    /// Ordered immediate children of `node` that pass current visibility
    /// rules. Empty when children have not been loaded yet.
    #[allow(dead_code)]
    pub fn visible_children<'a>(&'a self, node: &'a Node) -> Vec<&'a Node> {
        match &node.children {
            Some(children) => children.iter().filter(|c| self.node_emits(c)).collect(),
            None => Vec::new(),
        }
    }

    /// From a set of row indices, the paths whose kind is `File`.
    /// Directories are silently dropped, not an error.
    pub fn open_targets(&self, indices: &[usize]) -> Vec<PathBuf> {
        indices
            .iter()
            .filter_map(|&idx| self.rows.get(idx))
            .filter(|row| row.kind == NodeKind::File)
            .map(|row| row.path.clone())
            .collect()
    }

    /// Open targets for the current multi-selection, in display order.
    pub fn selection_open_targets(&self) -> Vec<PathBuf> {
        let mut indices: Vec<usize> = self.multi_selected.iter().copied().collect();
        indices.sort_unstable();
        self.open_targets(&indices)
    }

    /// Expand the directory at `path`, loading children on first use.
    pub fn expand(&mut self, path: &Path) -> Result<()> {
        if let Some(node) = Self::find_node_mut(&mut self.root, path) {
            if node.kind == NodeKind::Directory && !node.is_expanded {
                if node.children.is_none() {
                    node.load_children()?;
                }
                node.is_expanded = true;
                self.refresh();
            }
        }
        Ok(())
    }

    /// Expand the currently selected directory row.
    pub fn expand_selected(&mut self) -> Result<()> {
        let Some(row) = self.rows.get(self.selected_index) else {
            return Ok(());
        };
        if row.kind != NodeKind::Directory {
            return Ok(());
        }
        let path = row.path.clone();
        self.expand(&path)
    }

    /// Collapse the selected directory, or jump to its parent row when it is
    /// a file or already collapsed.
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected_index) else {
            return;
        };
        let path = row.path.clone();

        if row.kind == NodeKind::Directory && row.is_expanded && row.depth > 0 {
            if let Some(node) = Self::find_node_mut(&mut self.root, &path) {
                node.is_expanded = false;
                self.refresh();
            }
            return;
        }

        if let Some(parent) = path.parent() {
            if let Some(idx) = self.find_index_by_path(parent) {
                self.selected_index = idx;
            }
        }
    }

    /// Re-read the root directory's entries. Expansion state below the root
    /// is discarded.
    pub fn reload(&mut self) -> Result<()> {
        self.root.load_children()?;
        self.refresh();
        Ok(())
    }

    /// Toggle visibility of hidden entries and recompute.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }

    /// Switch between the shallow and prune directory policies.
    pub fn toggle_policy(&mut self) {
        self.policy = self.policy.toggled();
        self.refresh();
    }

    /// Toggle multi-selection of the currently focused row.
    pub fn toggle_multi_select(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let idx = self.selected_index;
        if !self.multi_selected.remove(&idx) {
            self.multi_selected.insert(idx);
        }
    }

    /// Clear all multi-selections.
    pub fn clear_multi_select(&mut self) {
        self.multi_selected.clear();
    }

    /// Find the row index of an entry by its path.
    pub fn find_index_by_path(&self, path: &Path) -> Option<usize> {
        self.rows.iter().position(|row| row.path == path)
    }

    /// Find a mutable reference to a node by path.
    fn find_node_mut<'a>(node: &'a mut Node, target: &Path) -> Option<&'a mut Node> {
        if node.path == target {
            return Some(node);
        }
        if let Some(children) = &mut node.children {
            for child in children.iter_mut() {
                if let Some(found) = Self::find_node_mut(child, target) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Update the scroll offset to keep the selected row visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("c.png")).unwrap();
        dir
    }

    fn row_names(tree: &FolderTree) -> Vec<&str> {
        tree.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn listing_reflects_filesystem_ground_truth() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.show_hidden = true;
        tree.refresh();

        let names: Vec<&str> = tree
            .visible_children(&tree.root)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["sub", ".hidden", "a.png", "b.txt"]);
    }

    #[test]
    fn hidden_entries_are_excluded_by_default() {
        let dir = setup_test_dir();
        let tree = FolderTree::new(dir.path()).unwrap();
        // rows[0] is the display root itself.
        assert_eq!(row_names(&tree)[1..], ["sub", "a.png", "b.txt"]);
    }

    #[test]
    fn directories_sort_before_files_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Zeta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        File::create(dir.path().join("B.txt")).unwrap();
        File::create(dir.path().join("a.txt")).unwrap();

        let tree = FolderTree::new(dir.path()).unwrap();
        let names: Vec<&str> = tree.rows[1..].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Zeta", "a.txt", "B.txt"]);
    }

    #[test]
    fn filter_scenario_shallow_policy() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.set_filter("png");

        // Directory always shown; matching file shown; b.txt hidden.
        let names: Vec<&str> = tree
            .visible_children(&tree.root)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["sub", "a.png"]);

        tree.expand(&dir.path().join("sub")).unwrap();
        let sub = tree
            .root
            .children
            .as_ref()
            .unwrap()
            .iter()
            .find(|n| n.name == "sub")
            .unwrap();
        let sub_names: Vec<&str> = tree
            .visible_children(sub)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(sub_names, vec!["c.png"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.set_filter("PNG");
        assert!(row_names(&tree).contains(&"a.png"));
        assert!(!row_names(&tree).contains(&"b.txt"));
    }

    #[test]
    fn empty_filter_equals_no_filter() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        let unfiltered = row_names(&tree)
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        tree.set_filter("png");
        assert_ne!(row_names(&tree).len(), unfiltered.len());

        tree.set_filter("");
        assert!(!tree.is_filtering());
        let restored: Vec<String> = row_names(&tree).iter().map(|s| s.to_string()).collect();
        assert_eq!(restored, unfiltered);
    }

    #[test]
    fn prune_policy_hides_matchless_directories() {
        let dir = setup_test_dir();
        fs::create_dir(dir.path().join("docs")).unwrap();
        File::create(dir.path().join("docs").join("readme.md")).unwrap();

        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.policy = FilterPolicy::Prune;
        // Load both subtrees so containment has something to inspect.
        tree.expand(&dir.path().join("sub")).unwrap();
        tree.expand(&dir.path().join("docs")).unwrap();
        tree.set_filter("png");

        let names = row_names(&tree);
        assert!(names.contains(&"sub"), "directory with a match survives");
        assert!(names.contains(&"c.png"));
        assert!(!names.contains(&"docs"), "matchless directory is pruned");
    }

    #[test]
    fn prune_policy_without_filter_shows_all_directories() {
        let dir = setup_test_dir();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.policy = FilterPolicy::Prune;
        tree.refresh();
        assert!(row_names(&tree).contains(&"empty"));
    }

    #[test]
    fn set_root_rejects_missing_path_without_mutation() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        let before = row_names(&tree)
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        let err = tree.set_root(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRoot(_)));

        assert_eq!(tree.root.path, dir.path());
        let after: Vec<String> = row_names(&tree).iter().map(|s| s.to_string()).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn set_root_rejects_file_path() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        let err = tree.set_root(&dir.path().join("a.png")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRoot(_)));
    }

    #[test]
    fn navigate_into_keeps_filter() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.set_filter("png");
        tree.navigate_into(&dir.path().join("sub")).unwrap();

        assert_eq!(tree.filter().pattern(), "png");
        assert_eq!(row_names(&tree), vec!["sub", "c.png"]);
    }

    #[test]
    fn navigate_into_rejects_files() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        let err = tree.navigate_into(&dir.path().join("a.png")).unwrap_err();
        assert!(matches!(err, AppError::NotADirectory(_)));
        assert_eq!(tree.root.path, dir.path());
    }

    #[test]
    fn navigate_up_reroots_at_parent() {
        let dir = setup_test_dir();
        let sub = dir.path().join("sub");
        let mut tree = FolderTree::new(&sub).unwrap();
        assert!(tree.navigate_up().unwrap());
        assert_eq!(tree.root.path, dir.path());
    }

    #[test]
    fn child_paths_are_prefixed_by_root_path() {
        let dir = setup_test_dir();
        let sub = dir.path().join("sub");
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.navigate_into(&sub).unwrap();

        for child in tree.visible_children(&tree.root) {
            assert!(child.resolve_path().starts_with(tree.root.resolve_path()));
        }
    }

    #[test]
    fn open_targets_drops_directories() {
        let dir = setup_test_dir();
        let tree = FolderTree::new(dir.path()).unwrap();
        // rows: [root, sub, a.png, b.txt]
        let targets = tree.open_targets(&[1, 2]);
        assert_eq!(targets, vec![dir.path().join("a.png")]);
    }

    #[test]
    fn open_targets_of_empty_selection_is_empty() {
        let dir = setup_test_dir();
        let tree = FolderTree::new(dir.path()).unwrap();
        assert!(tree.selection_open_targets().is_empty());
    }

    #[test]
    fn selection_open_targets_follow_display_order() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        // Select b.txt (3) before a.png (2); output is in display order.
        tree.selected_index = 3;
        tree.toggle_multi_select();
        tree.selected_index = 2;
        tree.toggle_multi_select();

        let targets = tree.selection_open_targets();
        assert_eq!(
            targets,
            vec![dir.path().join("a.png"), dir.path().join("b.txt")]
        );
    }

    #[test]
    fn toggle_multi_select_roundtrip() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.selected_index = 2;
        tree.toggle_multi_select();
        assert!(tree.multi_selected.contains(&2));
        tree.toggle_multi_select();
        assert!(!tree.multi_selected.contains(&2));
    }

    #[test]
    fn refresh_clears_multi_selection() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.selected_index = 1;
        tree.toggle_multi_select();
        tree.refresh();
        assert!(tree.multi_selected.is_empty());
    }

    #[test]
    fn toggle_hidden_shows_dotfiles() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        assert!(!row_names(&tree).contains(&".hidden"));
        tree.toggle_hidden();
        assert!(row_names(&tree).contains(&".hidden"));
        tree.toggle_hidden();
        assert!(!row_names(&tree).contains(&".hidden"));
    }

    #[test]
    fn images_only_restricts_files() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.images_only = true;
        tree.refresh();

        let names = row_names(&tree);
        assert!(names.contains(&"a.png"));
        assert!(!names.contains(&"b.txt"));
        assert!(names.contains(&"sub"));
        assert!(tree.is_filtering());
    }

    #[test]
    fn expand_loads_children_lazily() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        let sub = tree
            .root
            .children
            .as_ref()
            .unwrap()
            .iter()
            .find(|n| n.name == "sub")
            .unwrap();
        assert!(sub.children.is_none());

        tree.expand(&dir.path().join("sub")).unwrap();
        assert!(row_names(&tree).contains(&"c.png"));
    }

    #[test]
    fn collapse_selected_jumps_to_parent_for_files() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.selected_index = 2; // a.png
        tree.collapse_selected();
        assert_eq!(tree.selected_index, 0);
    }

    #[test]
    fn update_scroll_keeps_selection_visible() {
        let dir = setup_test_dir();
        let mut tree = FolderTree::new(dir.path()).unwrap();
        tree.selected_index = 3;
        tree.update_scroll(2);
        assert_eq!(tree.scroll_offset, 2);
        tree.selected_index = 0;
        tree.update_scroll(2);
        assert_eq!(tree.scroll_offset, 0);
    }

    #[test]
    fn is_image_name_by_extension() {
        assert!(is_image_name("a.png"));
        assert!(is_image_name("SHOT.JPG"));
        assert!(is_image_name("scan.tiff"));
        assert!(!is_image_name("notes.txt"));
        assert!(!is_image_name("png"));
    }
}
