#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` computes the SHA-256 digest used to verify a staged payload
//! before it is pushed to the destination host. A payload is either a single
//! file (the compressed archive) or a directory tree (the uncompressed
//! mirror); both are reduced to one lowercase hexadecimal digest string.
//!
//! # Directory digests
//!
//! A directory has no single byte stream to hash, so the digest is defined
//! over a canonical serialisation: every regular file is visited in the
//! deterministic sorted order produced by [`walk::Walker`], and for each file
//! the hasher absorbs the UTF-8 bytes of its slash-normalised relative path,
//! a single `NUL` separator, and then the file contents. Directories
//! contribute nothing of their own. Renaming a file or editing its contents
//! both change the digest; the platform's path separator does not.

mod error;
mod payload;

pub use error::DigestError;
pub use payload::{checksum_matches, directory_digest, file_digest, payload_digest};
