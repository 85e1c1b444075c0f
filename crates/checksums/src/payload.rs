use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};

use digest::Digest;
use sha2::Sha256;
use tracing::debug;

use walk::{LocalSource, Walker};

use crate::error::DigestError;

/// Read buffer for streaming file contents into the hasher.
const READ_BUF_LEN: usize = 64 * 1024;

/// Computes the digest of a payload path, dispatching on its kind.
///
/// Single files hash their raw bytes; directories use the canonical
/// serialisation described in the crate documentation.
pub fn payload_digest(path: &Path) -> Result<String, DigestError> {
    let metadata = std::fs::metadata(path).map_err(|error| DigestError::io(path, error))?;
    if metadata.is_dir() {
        directory_digest(path)
    } else {
        file_digest(path)
    }
}

/// Computes the lowercase hex SHA-256 digest of a single file's bytes.
pub fn file_digest(path: &Path) -> Result<String, DigestError> {
    let mut hasher = Sha256::new();
    absorb_file(&mut hasher, path)?;
    let digest = to_hex(hasher.finalize().as_slice());
    debug!(path = %path.display(), %digest, "hashed file payload");
    Ok(digest)
}

/// Computes the canonical lowercase hex SHA-256 digest of a directory tree.
///
/// Files are absorbed in the sorted relative-path order produced by
/// [`walk::Walker`]; each contributes its slash-normalised relative path, a
/// `NUL` separator, and its contents.
pub fn directory_digest(root: &Path) -> Result<String, DigestError> {
    let mut hasher = Sha256::new();
    let mut source = LocalSource::new(root);
    let mut files = 0usize;

    // Collecting the (small) entry list up front releases the borrow on the
    // source before the per-file reads begin.
    let entries: Vec<_> = Walker::new(&mut source)?.collect::<Result<_, _>>()?;
    for entry in entries {
        if entry.kind().is_dir() {
            continue;
        }
        hasher.update(normalised_path_bytes(entry.relative_path()));
        hasher.update([0u8]);
        absorb_file(&mut hasher, &root.join(entry.relative_path()))?;
        files += 1;
    }

    let digest = to_hex(hasher.finalize().as_slice());
    debug!(root = %root.display(), files, %digest, "hashed directory payload");
    Ok(digest)
}

/// Compares an expected checksum against a computed one.
///
/// Hex digests are compared ASCII case-insensitively so operators may paste
/// uppercase output from other tools.
#[must_use]
pub fn checksum_matches(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}

fn absorb_file(hasher: &mut Sha256, path: &Path) -> Result<(), DigestError> {
    let mut file = File::open(path).map_err(|error| DigestError::io(path, error))?;
    let mut buffer = [0u8; READ_BUF_LEN];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|error| DigestError::io(path, error))?;
        if read == 0 {
            return Ok(());
        }
        hasher.update(&buffer[..read]);
    }
}

fn normalised_path_bytes(path: &Path) -> Vec<u8> {
    let mut bytes = Vec::new();
    for component in path.components() {
        if let Component::Normal(name) = component {
            if !bytes.is_empty() {
                bytes.push(b'/');
            }
            bytes.extend_from_slice(name.to_string_lossy().as_bytes());
        }
    }
    bytes
}

fn to_hex(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    // FIPS 180-2 test vectors for SHA-256.
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn file_digest_matches_known_vectors() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let empty = temp.path().join("empty.bin");
        let abc = temp.path().join("abc.bin");
        fs::write(&empty, b"").expect("write empty");
        fs::write(&abc, b"abc").expect("write abc");

        assert_eq!(file_digest(&empty).expect("hash empty"), EMPTY_SHA256);
        assert_eq!(file_digest(&abc).expect("hash abc"), ABC_SHA256);
    }

    #[test]
    fn payload_digest_dispatches_on_kind() {
        let temp = tempfile::tempdir().expect("create tempdir");
        let file = temp.path().join("abc.bin");
        fs::write(&file, b"abc").expect("write abc");

        assert_eq!(payload_digest(&file).expect("hash file"), ABC_SHA256);
        assert_eq!(
            payload_digest(temp.path()).expect("hash dir"),
            directory_digest(temp.path()).expect("hash dir")
        );
    }

    #[test]
    fn directory_digest_is_stable_across_creation_order() {
        let build = |names: &[&str]| {
            let temp = tempfile::tempdir().expect("create tempdir");
            for name in names {
                let path = temp.path().join(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).expect("create parent");
                }
                fs::write(&path, name.as_bytes()).expect("write file");
            }
            directory_digest(temp.path()).expect("hash dir")
        };

        let forward = build(&["a.txt", "sub/b.txt", "z.txt"]);
        let reversed = build(&["z.txt", "sub/b.txt", "a.txt"]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn directory_digest_changes_when_a_file_is_renamed() {
        let temp = tempfile::tempdir().expect("create tempdir");
        fs::write(temp.path().join("a.txt"), b"same contents").expect("write a");
        let before = directory_digest(temp.path()).expect("hash dir");

        fs::rename(temp.path().join("a.txt"), temp.path().join("b.txt")).expect("rename");
        let after = directory_digest(temp.path()).expect("hash dir");
        assert_ne!(before, after);
    }

    #[test]
    fn directory_digest_changes_when_contents_change() {
        let temp = tempfile::tempdir().expect("create tempdir");
        fs::write(temp.path().join("a.txt"), b"one").expect("write");
        let before = directory_digest(temp.path()).expect("hash dir");

        fs::write(temp.path().join("a.txt"), b"two").expect("rewrite");
        let after = directory_digest(temp.path()).expect("hash dir");
        assert_ne!(before, after);
    }

    #[test]
    fn empty_directory_digest_equals_empty_stream_digest() {
        let temp = tempfile::tempdir().expect("create tempdir");
        assert_eq!(
            directory_digest(temp.path()).expect("hash dir"),
            EMPTY_SHA256
        );
    }

    #[test]
    fn checksum_comparison_ignores_case_and_whitespace() {
        assert!(checksum_matches(ABC_SHA256, &ABC_SHA256.to_uppercase()));
        assert!(checksum_matches(&format!(" {ABC_SHA256} "), ABC_SHA256));
        assert!(!checksum_matches(ABC_SHA256, EMPTY_SHA256));
    }

    #[test]
    fn missing_payload_reports_io_error_with_path() {
        let error = payload_digest(Path::new("./missing_payload")).expect_err("missing path");
        match error {
            DigestError::Io { path, .. } => {
                assert!(path.ends_with("missing_payload"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
