use std::path::{Path, PathBuf};

use tracing::trace;

use crate::entry::TreeEntry;
use crate::error::WalkError;
use crate::source::{EntrySource, SourceEntry};

/// Depth-first iterator over the entries of a tree.
///
/// Directories are yielded before their contents; siblings are visited in
/// lexicographic name order.
pub struct Walker<'a, S: EntrySource> {
    source: &'a mut S,
    stack: Vec<DirectoryState>,
    finished: bool,
}

impl<'a, S: EntrySource> Walker<'a, S> {
    /// Starts a traversal by listing the source's root directory.
    pub fn new(source: &'a mut S) -> Result<Self, WalkError> {
        let root = DirectoryState::for_root(source)?;
        Ok(Self {
            source,
            stack: vec![root],
            finished: false,
        })
    }

    fn descend(&mut self, relative_path: PathBuf, depth: usize) -> Result<(), WalkError> {
        trace!(path = %relative_path.display(), "entering directory");
        let state = DirectoryState::for_directory(self.source, relative_path, depth)?;
        self.stack.push(state);
        Ok(())
    }
}

impl<S: EntrySource> Iterator for Walker<'_, S> {
    type Item = Result<TreeEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let (relative_path, kind, depth) = {
                let state = self.stack.last_mut()?;

                if let Some(SourceEntry { name, kind }) = state.next_entry() {
                    let relative_path = if state.relative_prefix.as_os_str().is_empty() {
                        PathBuf::from(&name)
                    } else {
                        let mut rel = state.relative_prefix.clone();
                        rel.push(&name);
                        rel
                    };
                    (relative_path, kind, state.depth + 1)
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            if kind.is_dir() {
                if let Err(error) = self.descend(relative_path.clone(), depth) {
                    self.finished = true;
                    return Some(Err(error));
                }
            }

            trace!(path = %relative_path.display(), ?kind, "yielding entry");
            return Some(Ok(TreeEntry {
                relative_path,
                kind,
                depth,
            }));
        }
    }
}

struct DirectoryState {
    relative_prefix: PathBuf,
    entries: Vec<SourceEntry>,
    index: usize,
    depth: usize,
}

impl DirectoryState {
    fn for_root<S: EntrySource>(source: &mut S) -> Result<Self, WalkError> {
        let entries = source
            .list_dir(Path::new(""))
            .map_err(WalkError::root_listing)?;
        Ok(Self::with_entries(PathBuf::new(), entries, 0))
    }

    fn for_directory<S: EntrySource>(
        source: &mut S,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<Self, WalkError> {
        let entries = source
            .list_dir(&relative_path)
            .map_err(|error| WalkError::directory_listing(relative_path.clone(), error))?;
        Ok(Self::with_entries(relative_path, entries, depth))
    }

    fn with_entries(relative_prefix: PathBuf, mut entries: Vec<SourceEntry>, depth: usize) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            relative_prefix,
            entries,
            index: 0,
            depth,
        }
    }

    fn next_entry(&mut self) -> Option<SourceEntry> {
        if let Some(entry) = self.entries.get(self.index) {
            self.index += 1;
            Some(entry.clone())
        } else {
            None
        }
    }
}
