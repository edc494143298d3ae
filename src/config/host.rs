// ABOUTME: Host configuration for the SSH connection.
// ABOUTME: Parses formats like "host", "user@host", "host:port", "user@host:port".

use crate::ssh::SessionConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    /// Private key to authenticate with instead of the agent or default keys.
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    #[serde(default)]
    pub known_hosts: Option<PathBuf>,
    #[serde(default = "default_trust_first_connection")]
    pub trust_first_connection: bool,
}

fn default_port() -> u16 {
    22
}

fn default_trust_first_connection() -> bool {
    true
}

fn parse_port(port: &str) -> Result<u16, String> {
    port.parse::<u16>()
        .map_err(|_| format!("invalid port: {}", port))
}

impl HostConfig {
    /// Parse `[user@]host[:port]`; IPv6 addresses may be bare or bracketed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("host cannot be empty".to_string());
        }

        // Parse format: [user@]host[:port]
        let (user, rest) = match s.split_once('@') {
            Some(("", _)) => return Err("user cannot be empty".to_string()),
            Some((user, rest)) => (Some(user), rest),
            None => (None, s),
        };

        // IPv6 literals need brackets to carry a port: [::1]:2222
        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| format!("missing ']' in host: {}", rest))?;
            let port = match after {
                "" => default_port(),
                _ => parse_port(
                    after
                        .strip_prefix(':')
                        .ok_or_else(|| format!("unexpected text after ']': {}", after))?,
                )?,
            };
            (host, port)
        } else if rest.matches(':').count() > 1 {
            (rest, default_port())
        } else {
            match rest.rsplit_once(':') {
                Some((host, port)) => (host, parse_port(port)?),
                None => (rest, default_port()),
            }
        };

        if host.is_empty() {
            return Err("hostname cannot be empty".to_string());
        }

        Ok(HostConfig {
            host: host.to_string(),
            port,
            user: user.map(str::to_string),
            key_path: None,
            known_hosts: None,
            trust_first_connection: default_trust_first_connection(),
        })
    }

    /// The login user, falling back to `$USER` and then `root`.
    pub fn user_or_default(&self) -> String {
        self.user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "root".to_string())
    }

    /// SSH session settings for this host.
    pub fn session_config(&self, command_timeout: Duration) -> SessionConfig {
        let mut config = SessionConfig::new(&self.host, self.user_or_default())
            .port(self.port)
            .trust_on_first_use(self.trust_first_connection)
            .command_timeout(command_timeout);
        if let Some(key) = &self.key_path {
            config = config.key_path(key);
        }
        if let Some(known_hosts) = &self.known_hosts {
            config = config.known_hosts_path(known_hosts);
        }
        config
    }
}

impl std::fmt::Display for HostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        if self.port == default_port() {
            write!(f, "{}", self.host)
        } else if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostEntry {
    Simple(String),
    Detailed(HostConfig),
}

pub(super) fn deserialize_host_option<'de, D>(
    deserializer: D,
) -> Result<Option<HostConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<HostEntry>::deserialize(deserializer)? {
        None => Ok(None),
        Some(HostEntry::Simple(s)) => HostConfig::parse(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(HostEntry::Detailed(c)) => Ok(Some(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_host() {
        let host = HostConfig::parse("bourne").unwrap();
        assert_eq!(host.host, "bourne");
        assert_eq!(host.port, 22);
        assert_eq!(host.user, None);
    }

    #[test]
    fn parses_user_host_port() {
        let host = HostConfig::parse("deploy@example.com:2222").unwrap();
        assert_eq!(host.host, "example.com");
        assert_eq!(host.port, 2222);
        assert_eq!(host.user.as_deref(), Some("deploy"));
    }

    #[test]
    fn rejects_bad_port_and_empty_parts() {
        assert!(HostConfig::parse("example.com:ssh").is_err());
        assert!(HostConfig::parse("").is_err());
        assert!(HostConfig::parse("@example.com").is_err());
        assert!(HostConfig::parse("deploy@:22").is_err());
    }

    #[test]
    fn parses_ipv6_hosts() {
        let host = HostConfig::parse("deploy@[::1]:2222").unwrap();
        assert_eq!(host.host, "::1");
        assert_eq!(host.port, 2222);

        let host = HostConfig::parse("[fe80::1]").unwrap();
        assert_eq!(host.host, "fe80::1");
        assert_eq!(host.port, 22);

        let host = HostConfig::parse("2001:db8::7").unwrap();
        assert_eq!(host.host, "2001:db8::7");
        assert_eq!(host.port, 22);
    }

    #[test]
    fn rejects_malformed_brackets() {
        assert!(HostConfig::parse("[::1").is_err());
        assert!(HostConfig::parse("[::1]22").is_err());
        assert!(HostConfig::parse("[]:22").is_err());
    }

    #[test]
    fn ipv6_display_round_trips() {
        let host = HostConfig::parse("deploy@[::1]:2222").unwrap();
        assert_eq!(host.to_string(), "deploy@[::1]:2222");
        assert_eq!(HostConfig::parse(&host.to_string()).unwrap(), host);
    }

    #[test]
    fn display_round_trips_non_default_parts() {
        let host = HostConfig::parse("deploy@example.com:2222").unwrap();
        assert_eq!(host.to_string(), "deploy@example.com:2222");
        assert_eq!(HostConfig::parse("example.com").unwrap().to_string(), "example.com");
    }

    #[test]
    fn session_config_carries_host_settings() {
        let mut host = HostConfig::parse("deploy@example.com:2200").unwrap();
        host.key_path = Some(PathBuf::from("/keys/deploy"));
        host.trust_first_connection = false;

        let session = host.session_config(Duration::from_secs(60));
        assert_eq!(session.host, "example.com");
        assert_eq!(session.port, 2200);
        assert_eq!(session.user, "deploy");
        assert_eq!(session.key_path, Some(PathBuf::from("/keys/deploy")));
        assert!(!session.trust_on_first_use);
        assert_eq!(session.command_timeout, Duration::from_secs(60));
    }
}
