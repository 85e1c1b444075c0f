#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic tree traversal used when mirroring a
//! directory hierarchy between hosts. The walker enumerates regular files and
//! directories as relative paths and keeps ordering stable across platforms by
//! sorting sibling names lexicographically before yielding them, so two
//! traversals of equivalent trees always produce the same sequence.
//!
//! Traversal is expressed against the [`EntrySource`] capability rather than
//! the local filesystem directly. The same walker therefore drives both the
//! local staging directory (via [`LocalSource`]) and a remote directory
//! listing supplied by a transport layer.
//!
//! # Design
//!
//! - [`Walker`] implements [`Iterator`] and yields [`TreeEntry`] values in
//!   depth-first order. A directory entry is always yielded before any of its
//!   children, so consumers can create a destination directory before placing
//!   files into it.
//! - [`EntrySource`] is the single capability a backing store must provide:
//!   list the immediate children of a directory identified by its relative
//!   path.
//! - [`WalkError`] reports listing failures together with the offending
//!   relative path so higher layers can surface actionable diagnostics.
//!
//! # Invariants
//!
//! - Emitted relative paths never contain `..` segments; they are built purely
//!   from names returned by the source.
//! - Directory contents are requested at most once per directory.
//! - Traversal never panics; failures surface as [`WalkError`] and terminate
//!   the iterator.
//!
//! Cycle detection is intentionally absent: the walker assumes the listed
//! graph is acyclic, matching the contract of the transports it serves.
//!
//! # Examples
//!
//! ```
//! use walk::{LocalSource, Walker};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir(temp.path().join("nested"))?;
//! std::fs::write(temp.path().join("nested/file.txt"), b"data")?;
//!
//! let mut source = LocalSource::new(temp.path());
//! let entries: Vec<_> = Walker::new(&mut source)?
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(entries.len(), 2);
//! assert!(entries[0].kind().is_dir());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod entry;
mod error;
mod source;
mod walker;


pub use entry::{EntryKind, TreeEntry};
pub use error::{WalkError, WalkErrorKind};
pub use source::{EntrySource, LocalSource, SourceEntry};
pub use walker::Walker;
