use std::fmt;
use std::path::PathBuf;

/// Login name used when no destination username is configured.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Connection details for the SFTP source host.
///
/// `Debug` output redacts the password so endpoints can be logged freely.
#[derive(Clone)]
pub struct SourceEndpoint {
    /// Host name or address of the source server.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Remote directory to mirror.
    pub root: PathBuf,
}

impl SourceEndpoint {
    /// Returns the `host:port` pair used for the TCP connection.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for SourceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("root", &self.root)
            .finish()
    }
}

/// Connection details for the FTP destination host.
///
/// When no username is configured the stage falls back to an anonymous
/// login with an empty password. `Debug` output redacts the password.
#[derive(Clone)]
pub struct DestEndpoint {
    /// Host name or address of the destination server.
    pub host: String,
    /// FTP control port.
    pub port: u16,
    /// Optional login user name; `None` selects anonymous login.
    pub username: Option<String>,
    /// Optional login password; ignored when `username` is `None`.
    pub password: Option<String>,
    /// Remote directory the payload is uploaded into. Must already exist.
    pub root: String,
}

impl DestEndpoint {
    /// Returns the `host:port` pair used for the control connection.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the credentials to present at login.
    ///
    /// A configured username is used together with the configured password
    /// (empty when absent); without a username the pair degrades to
    /// `anonymous` with an empty password.
    #[must_use]
    pub fn login_credentials(&self) -> (&str, &str) {
        match self.username.as_deref() {
            Some(username) => (username, self.password.as_deref().unwrap_or("")),
            None => (ANONYMOUS_USER, ""),
        }
    }
}

impl fmt::Debug for DestEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination(username: Option<&str>, password: Option<&str>) -> DestEndpoint {
        DestEndpoint {
            host: "ftp.example".to_owned(),
            port: 21,
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
            root: "/incoming".to_owned(),
        }
    }

    #[test]
    fn configured_credentials_are_used_verbatim() {
        let endpoint = destination(Some("uploader"), Some("secret"));
        assert_eq!(endpoint.login_credentials(), ("uploader", "secret"));
    }

    #[test]
    fn missing_password_defaults_to_empty() {
        let endpoint = destination(Some("uploader"), None);
        assert_eq!(endpoint.login_credentials(), ("uploader", ""));
    }

    #[test]
    fn missing_username_falls_back_to_anonymous() {
        let endpoint = destination(None, Some("ignored"));
        assert_eq!(endpoint.login_credentials(), (ANONYMOUS_USER, ""));
    }

    #[test]
    fn debug_output_never_contains_passwords() {
        let source = SourceEndpoint {
            host: "sftp.example".to_owned(),
            port: 22,
            username: "reader".to_owned(),
            password: "hunter2".to_owned(),
            root: PathBuf::from("/srv/export"),
        };
        let rendered = format!("{source:?}");
        assert!(!rendered.contains("hunter2"));

        let dest = destination(Some("uploader"), Some("hunter2"));
        let rendered = format!("{dest:?}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn addr_joins_host_and_port() {
        let endpoint = destination(None, None);
        assert_eq!(endpoint.addr(), "ftp.example:21");
    }
}
