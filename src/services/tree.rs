//! Directory listing service.
//!
//! `list_children` is the side-effect-free listing primitive, safe from any
//! thread. `TreeCache` is a UI-context memo over it; correctness never
//! depends on the memo, it only saves re-reads between navigations.

use crate::models::{should_ignore, FileTreeNode};
use crate::services::ports::{FileError, FileResult};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};

/// List the immediate children of `dir`, ordered for display.
///
/// Directories sort before files; within a category names compare
/// case-insensitively with digit runs compared by value ("File2" before
/// "File10"). Hidden entries are excluded. Returned directory nodes have
/// `children = None`; descendants are fetched only when the caller expands
/// them.
pub fn list_children(dir: &Path) -> FileResult<Vec<FileTreeNode>> {
    let meta = fs::metadata(dir).map_err(|e| FileError::classify(dir, e))?;
    if !meta.is_dir() {
        return Err(FileError::NotADirectory(dir.to_path_buf()));
    }

    let mut nodes = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FileError::classify(dir, e))? {
        let entry = entry.map_err(|e| FileError::classify(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if should_ignore(&name) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        nodes.push(FileTreeNode::new(entry.path(), is_dir));
    }

    nodes.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => natural_cmp(&a.name, &b.name),
    });

    Ok(nodes)
}

/// Case-insensitive comparison with digit runs compared numerically.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().flat_map(char::to_lowercase).peekable();
    let mut bi = b.chars().flat_map(char::to_lowercase).peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let na = take_digit_run(&mut ai);
                    let nb = take_digit_run(&mut bi);
                    match na.cmp(&nb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            ai.next();
                            bi.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn take_digit_run<I: Iterator<Item = char>>(it: &mut Peekable<I>) -> u64 {
    let mut n: u64 = 0;
    while let Some(d) = it.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as u64);
        it.next();
    }
    n
}

/// Memo of recent listings, owned by the UI context.
pub struct TreeCache {
    listings: FxHashMap<PathBuf, Vec<FileTreeNode>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self {
            listings: FxHashMap::default(),
        }
    }

    /// Cached listing if present, otherwise a fresh read (memoized).
    pub fn list(&mut self, dir: &Path) -> FileResult<&[FileTreeNode]> {
        if !self.listings.contains_key(dir) {
            let nodes = list_children(dir)?;
            self.listings.insert(dir.to_path_buf(), nodes);
        }
        Ok(self
            .listings
            .get(dir)
            .map(|v| v.as_slice())
            .unwrap_or(&[]))
    }

    /// Install a listing produced elsewhere (e.g. a background load).
    pub fn store(&mut self, dir: PathBuf, nodes: Vec<FileTreeNode>) {
        self.listings.insert(dir, nodes);
    }

    pub fn cached(&self, dir: &Path) -> Option<&[FileTreeNode]> {
        self.listings.get(dir).map(|v| v.as_slice())
    }

    /// Drop the memo for `dir`; the next `list` re-reads the file system.
    pub fn invalidate(&mut self, dir: &Path) {
        self.listings.remove(dir);
    }

    pub fn clear(&mut self) {
        self.listings.clear();
    }
}

impl Default for TreeCache {
    fn default() -> Self {
        Self::new()
    }
}
