//! Push stage: upload the payload tree over FTP to the destination root.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path};

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, info};

use walk::{EntryKind, LocalSource, Walker};

use crate::endpoint::DestEndpoint;
use crate::error::PushError;
use crate::progress::ProgressSink;
use crate::{COPY_BUF_LEN, TransferTotals};

/// Uploads the payload at `payload` into `dest.root` on the destination
/// host.
///
/// The destination root must already exist; subdirectories mirroring the
/// payload tree are created as needed. A directory payload is walked in
/// deterministic order; a single-file payload (the compressed archive) is
/// treated as a degenerate one-entry tree and uploaded under its file name.
/// One control connection is used for the whole stage and closed on return.
pub fn push_tree(
    dest: &DestEndpoint,
    payload: &Path,
    sink: &dyn ProgressSink,
) -> Result<TransferTotals, PushError> {
    let metadata = fs::metadata(payload).map_err(|error| PushError::LocalIo {
        path: payload.to_path_buf(),
        source: error,
    })?;

    info!(
        destination = %dest.host,
        root = %dest.root,
        payload = %payload.display(),
        "pushing payload"
    );

    let mut ftp = FtpStream::connect(dest.addr()).map_err(|error| PushError::Connect {
        host: dest.host.clone(),
        port: dest.port,
        source: error,
    })?;

    let (username, password) = dest.login_credentials();
    ftp.login(username, password).map_err(|error| PushError::Login {
        username: username.to_owned(),
        source: error,
    })?;
    debug!(host = %dest.host, username, "FTP session established");

    ftp.transfer_type(FileType::Binary)
        .map_err(|source| PushError::Protocol { source })?;
    ftp.cwd(&dest.root).map_err(|error| PushError::MissingRoot {
        path: dest.root.clone(),
        source: error,
    })?;

    let mut totals = TransferTotals::default();
    if metadata.is_dir() {
        let mut source = LocalSource::new(payload);
        for entry in Walker::new(&mut source)? {
            let entry = entry?;
            match entry.kind() {
                EntryKind::Directory => ensure_remote_dir(&mut ftp, entry.relative_path())?,
                EntryKind::File { size } => {
                    let local = payload.join(entry.relative_path());
                    let bytes =
                        upload_file(&mut ftp, &local, entry.relative_path(), size, sink)?;
                    totals.files += 1;
                    totals.bytes += bytes;
                }
            }
        }
    } else {
        let name = payload.file_name().ok_or_else(|| PushError::LocalIo {
            path: payload.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "payload has no file name"),
        })?;
        let bytes = upload_file(&mut ftp, payload, Path::new(name), metadata.len(), sink)?;
        totals.files += 1;
        totals.bytes += bytes;
    }

    // Session teardown failures after a fully uploaded payload do not fail
    // the run; the server already has the bytes.
    if let Err(error) = ftp.quit() {
        debug!(%error, "FTP QUIT failed");
    }

    info!(
        files = totals.files,
        bytes = totals.bytes,
        "push stage complete"
    );
    Ok(totals)
}

/// Creates a remote directory, tolerating only pre-existence.
///
/// A failed `MKD` is followed by a `CWD` probe; when the directory can be
/// entered it already existed and the failure is ignored, otherwise the
/// original error is fatal.
fn ensure_remote_dir(ftp: &mut FtpStream, relative: &Path) -> Result<(), PushError> {
    let path = ftp_path(relative);
    match ftp.mkdir(&path) {
        Ok(()) => {
            debug!(%path, "created remote directory");
            Ok(())
        }
        Err(_) if directory_exists(ftp, relative) => {
            debug!(%path, "remote directory already exists");
            Ok(())
        }
        Err(error) => Err(PushError::CreateDir {
            path,
            source: error,
        }),
    }
}

fn directory_exists(ftp: &mut FtpStream, relative: &Path) -> bool {
    let path = ftp_path(relative);
    if ftp.cwd(&path).is_err() {
        return false;
    }
    for _ in 0..remote_depth(relative) {
        let _ = ftp.cdup();
    }
    true
}

fn upload_file(
    ftp: &mut FtpStream,
    local: &Path,
    relative: &Path,
    size: u64,
    sink: &dyn ProgressSink,
) -> Result<u64, PushError> {
    let remote = ftp_path(relative);
    let mut file = File::open(local).map_err(|error| PushError::LocalIo {
        path: local.to_path_buf(),
        source: error,
    })?;

    sink.file_started(relative, size);
    let mut stream = ftp
        .put_with_stream(&remote)
        .map_err(|error| PushError::Upload {
            path: remote.clone(),
            source: error,
        })?;

    let mut buffer = vec![0u8; COPY_BUF_LEN];
    let mut done = 0u64;
    loop {
        let read = file.read(&mut buffer).map_err(|error| PushError::LocalIo {
            path: local.to_path_buf(),
            source: error,
        })?;
        if read == 0 {
            break;
        }
        stream
            .write_all(&buffer[..read])
            .map_err(|error| PushError::Upload {
                path: remote.clone(),
                source: FtpError::ConnectionError(error),
            })?;
        done += read as u64;
        sink.file_progress(done, size);
    }

    ftp.finalize_put_stream(stream)
        .map_err(|error| PushError::Upload {
            path: remote.clone(),
            source: error,
        })?;
    sink.file_finished(relative);

    debug!(path = %remote, bytes = done, "uploaded file");
    Ok(done)
}

/// Renders a relative path with forward slashes for the FTP control channel.
fn ftp_path(relative: &Path) -> String {
    let mut out = String::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&name.to_string_lossy());
        }
    }
    out
}

fn remote_depth(relative: &Path) -> usize {
    relative
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .count()
}
