//! Command-line argument surface.

use std::path::PathBuf;

use clap::Parser;

use shuttle_core::{DestEndpoint, SourceEndpoint, TransferJob};

/// Mirror a directory tree from an SFTP host to an FTP host.
///
/// The source tree is pulled into a local staging directory, optionally
/// packed into a tar.gz archive and checked against an expected SHA-256
/// digest, then uploaded to the destination directory.
#[derive(Debug, Parser)]
#[command(name = "oc-shuttle", version, about)]
pub struct Cli {
    /// Source SFTP host name or address.
    #[arg(long, value_name = "HOST")]
    pub source_host: String,

    /// Source SSH port.
    #[arg(long, value_name = "PORT", default_value_t = 22)]
    pub source_port: u16,

    /// Source login user name.
    #[arg(long, value_name = "USER")]
    pub source_username: String,

    /// Source login password.
    #[arg(long, value_name = "PASSWORD")]
    pub source_password: String,

    /// Remote directory to mirror.
    #[arg(long, value_name = "PATH")]
    pub source_directory: PathBuf,

    /// Local staging directory the tree is mirrored into.
    #[arg(long, value_name = "PATH")]
    pub local_directory: PathBuf,

    /// Destination FTP host name or address.
    #[arg(long, value_name = "HOST")]
    pub destination_host: String,

    /// Destination FTP control port.
    #[arg(long, value_name = "PORT", default_value_t = 21)]
    pub destination_port: u16,

    /// Destination login user name; anonymous login when omitted.
    #[arg(long, value_name = "USER")]
    pub destination_username: Option<String>,

    /// Destination login password.
    #[arg(long, value_name = "PASSWORD", requires = "destination_username")]
    pub destination_password: Option<String>,

    /// Destination directory; must already exist on the server.
    #[arg(long, value_name = "PATH")]
    pub destination_directory: String,

    /// Pack the mirrored tree into a tar.gz archive before pushing.
    #[arg(long)]
    pub compress: bool,

    /// Expected SHA-256 of the payload; the run aborts before pushing on a
    /// mismatch.
    #[arg(long, value_name = "SHA256")]
    pub verify: Option<String>,

    /// Suppress progress bars.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// Converts the parsed arguments into the immutable job configuration.
    #[must_use]
    pub fn into_job(self) -> TransferJob {
        TransferJob {
            source: SourceEndpoint {
                host: self.source_host,
                port: self.source_port,
                username: self.source_username,
                password: self.source_password,
                root: self.source_directory,
            },
            destination: DestEndpoint {
                host: self.destination_host,
                port: self.destination_port,
                username: self.destination_username,
                password: self.destination_password,
                root: self.destination_directory,
            },
            staging: self.local_directory,
            compress: self.compress,
            expected_checksum: self.verify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[&str] = &[
        "oc-shuttle",
        "--source-host",
        "sftp.example",
        "--source-username",
        "reader",
        "--source-password",
        "hunter2",
        "--source-directory",
        "/srv/export",
        "--local-directory",
        "./mirror",
        "--destination-host",
        "ftp.example",
        "--destination-directory",
        "/incoming",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv: Vec<&str> = REQUIRED.to_vec();
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn required_flags_parse_with_defaults() {
        let cli = parse(&[]).expect("required flags parse");
        assert_eq!(cli.source_port, 22);
        assert_eq!(cli.destination_port, 21);
        assert!(!cli.compress);
        assert!(!cli.quiet);
        assert_eq!(cli.verify, None);
        assert_eq!(cli.destination_username, None);
    }

    #[test]
    fn missing_required_flag_is_rejected() {
        let argv: Vec<&str> = REQUIRED[..REQUIRED.len() - 2].to_vec();
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn optional_flags_are_recognised() {
        let cli = parse(&[
            "--destination-username",
            "uploader",
            "--destination-password",
            "secret",
            "--compress",
            "--verify",
            "abc123",
            "--quiet",
            "--source-port",
            "2222",
        ])
        .expect("optional flags parse");
        assert_eq!(cli.destination_username.as_deref(), Some("uploader"));
        assert_eq!(cli.destination_password.as_deref(), Some("secret"));
        assert!(cli.compress);
        assert!(cli.quiet);
        assert_eq!(cli.verify.as_deref(), Some("abc123"));
        assert_eq!(cli.source_port, 2222);
    }

    #[test]
    fn destination_password_requires_a_username() {
        let result = parse(&["--destination-password", "secret"]);
        assert!(result.is_err());
    }

    #[test]
    fn jobs_inherit_the_parsed_surface() {
        let cli = parse(&["--compress"]).expect("flags parse");
        let job = cli.into_job();
        assert_eq!(job.source.host, "sftp.example");
        assert_eq!(job.source.root, PathBuf::from("/srv/export"));
        assert_eq!(job.destination.root, "/incoming");
        assert!(job.compress);
        assert!(!job.verifies());
        assert_eq!(
            job.destination.login_credentials(),
            ("anonymous", ""),
            "omitted username falls back to anonymous login"
        );
    }
}
