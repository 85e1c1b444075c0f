//! Fetch stage: mirror the source tree over SFTP into the staging path.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::Path;

use ssh2::{Session, Sftp};
use tracing::{debug, info};

use walk::{EntryKind, EntrySource, SourceEntry, Walker};

use crate::endpoint::SourceEndpoint;
use crate::error::FetchError;
use crate::progress::ProgressSink;
use crate::{COPY_BUF_LEN, TransferTotals};

/// Mirrors the remote tree rooted at `source.root` into `staging`.
///
/// One SSH session is opened for the whole stage and closed when the
/// function returns, on success and failure alike. The staging directory is
/// created if absent; every remote directory is recreated locally before any
/// file inside it is written. Partially written local state is left in place
/// on failure for inspection.
pub fn fetch_tree(
    source: &SourceEndpoint,
    staging: &Path,
    sink: &dyn ProgressSink,
) -> Result<TransferTotals, FetchError> {
    info!(
        source = %source.host,
        root = %source.root.display(),
        staging = %staging.display(),
        "fetching source tree"
    );

    fs::create_dir_all(staging).map_err(|error| FetchError::LocalIo {
        path: staging.to_path_buf(),
        source: error,
    })?;

    let session = connect(source)?;
    let sftp = session
        .sftp()
        .map_err(|source| FetchError::Subsystem { source })?;

    let mut totals = TransferTotals::default();
    let mut lister = SftpLister {
        sftp: &sftp,
        root: &source.root,
    };
    let entries = Walker::new(&mut lister)?;
    for entry in entries {
        let entry = entry?;
        let relative = entry.relative_path();
        match entry.kind() {
            EntryKind::Directory => {
                let local_dir = staging.join(relative);
                fs::create_dir_all(&local_dir).map_err(|error| FetchError::LocalIo {
                    path: local_dir.clone(),
                    source: error,
                })?;
                debug!(path = %relative.display(), "created staging directory");
            }
            EntryKind::File { size } => {
                let bytes = download_file(&sftp, source, staging, relative, size, sink)?;
                totals.files += 1;
                totals.bytes += bytes;
            }
        }
    }

    info!(
        files = totals.files,
        bytes = totals.bytes,
        "fetch stage complete"
    );
    Ok(totals)
}

fn connect(source: &SourceEndpoint) -> Result<Session, FetchError> {
    let tcp = TcpStream::connect(source.addr()).map_err(|error| FetchError::Connect {
        host: source.host.clone(),
        port: source.port,
        source: error,
    })?;

    let mut session = Session::new().map_err(|source| FetchError::Session { source })?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|source| FetchError::Session { source })?;
    session
        .userauth_password(&source.username, &source.password)
        .map_err(|error| FetchError::Auth {
            username: source.username.clone(),
            source: error,
        })?;
    debug!(host = %source.host, username = %source.username, "SFTP session established");
    Ok(session)
}

fn download_file(
    sftp: &Sftp,
    source: &SourceEndpoint,
    staging: &Path,
    relative: &Path,
    size: u64,
    sink: &dyn ProgressSink,
) -> Result<u64, FetchError> {
    let remote_path = source.root.join(relative);
    let local_path = staging.join(relative);

    let mut remote = sftp.open(&remote_path).map_err(|error| FetchError::Remote {
        path: relative.to_path_buf(),
        source: io::Error::other(error),
    })?;
    let mut local = File::create(&local_path).map_err(|error| FetchError::LocalIo {
        path: local_path.clone(),
        source: error,
    })?;

    sink.file_started(relative, size);
    let mut buffer = vec![0u8; COPY_BUF_LEN];
    let mut done = 0u64;
    loop {
        let read = remote.read(&mut buffer).map_err(|error| FetchError::Remote {
            path: relative.to_path_buf(),
            source: error,
        })?;
        if read == 0 {
            break;
        }
        local
            .write_all(&buffer[..read])
            .map_err(|error| FetchError::LocalIo {
                path: local_path.clone(),
                source: error,
            })?;
        done += read as u64;
        sink.file_progress(done, size);
    }
    sink.file_finished(relative);

    debug!(path = %relative.display(), bytes = done, "downloaded file");
    Ok(done)
}

/// [`EntrySource`] over a live SFTP channel.
struct SftpLister<'a> {
    sftp: &'a Sftp,
    root: &'a Path,
}

impl EntrySource for SftpLister<'_> {
    fn list_dir(&mut self, relative_dir: &Path) -> io::Result<Vec<SourceEntry>> {
        let dir = self.root.join(relative_dir);
        let listing = self.sftp.readdir(&dir).map_err(io::Error::other)?;

        let mut entries = Vec::with_capacity(listing.len());
        for (path, stat) in listing {
            let Some(name) = path.file_name() else {
                continue;
            };
            let kind = if stat.is_dir() {
                EntryKind::Directory
            } else if stat.is_file() {
                EntryKind::File {
                    size: stat.size.unwrap_or(0),
                }
            } else {
                // Symlinks and special files have no mirror-side
                // representation; skip them like the local source does.
                debug!(path = %path.display(), "skipping special remote entry");
                continue;
            };
            entries.push(SourceEntry {
                name: name.to_os_string(),
                kind,
            });
        }
        Ok(entries)
    }
}
