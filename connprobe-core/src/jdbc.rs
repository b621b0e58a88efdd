//! Reading JDBC connection strings back into endpoints.
//!
//! The probe needs host, port, database and driver properties out of whatever
//! string it was handed, supplied or synthesized. Supported shapes:
//!
//! ```text
//! jdbc:postgresql://host[:port]/database[?k=v&...]
//! jdbc:mysql://host[:port]/database[?user=u&password=p&...]
//! jdbc:snowflake://account.snowflakecomputing.com[:port]/?db=database[&...]
//! jdbc:sqlserver://host[\instance][:port][;k=v;...]
//! jdbc:oracle:thin:@//host[:port]/service
//! jdbc:oracle:thin:@host:port:SID
//! ```

use tracing::debug;
use url::Url;

use crate::dialect::Dialect;
use crate::error::{ConnectionError, ConnectionResult};

/// A parsed JDBC URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdbcUrl {
    dialect: Dialect,
    host: String,
    port: Option<u16>,
    database: Option<String>,
    properties: Vec<(String, String)>,
}

#[derive(Default)]
struct Parts {
    host: String,
    port: Option<u16>,
    database: Option<String>,
    properties: Vec<(String, String)>,
}

impl JdbcUrl {
    /// Parse a JDBC URL of one of the supported dialects.
    ///
    /// ```rust
    /// use connprobe_core::{Dialect, JdbcUrl};
    ///
    /// let url = JdbcUrl::parse("jdbc:sqlserver://db:1433;databaseName=sales").unwrap();
    /// assert_eq!(url.dialect(), Dialect::SqlServer);
    /// assert_eq!(url.host(), "db");
    /// assert_eq!(url.database(), Some("sales"));
    /// ```
    pub fn parse(url: &str) -> ConnectionResult<Self> {
        let dialect = Dialect::from_url(url).ok_or_else(|| {
            ConnectionError::invalid_url(format!(
                "unrecognized JDBC prefix in '{}'",
                mask_password(url)
            ))
        })?;
        let rest = &url[dialect.jdbc_prefix().len()..];

        let parts = match dialect {
            Dialect::PostgreSql | Dialect::MySql | Dialect::Snowflake => {
                parse_hierarchical(dialect, rest)?
            }
            Dialect::SqlServer => parse_sqlserver(rest)?,
            Dialect::Oracle => parse_oracle(rest)?,
        };

        if parts.host.is_empty() {
            return Err(ConnectionError::invalid_url("missing host"));
        }

        let parsed = Self {
            dialect,
            host: parts.host,
            port: parts.port,
            database: parts.database.filter(|d| !d.is_empty()),
            properties: parts.properties,
        };

        debug!(
            dialect = %parsed.dialect,
            host = %parsed.host,
            port = ?parsed.port,
            database = ?parsed.database,
            "JDBC URL parsed"
        );

        Ok(parsed)
    }

    /// The dialect named by the prefix.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Host name or address, without IPv6 brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Explicit port, or the dialect's conventional one.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or_else(|| self.dialect.default_port())
    }

    /// Database, service or SID.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Look up a property by name, ignoring case.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All properties in the order they appeared.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Username carried by the URL.
    pub fn user(&self) -> Option<&str> {
        self.property("user").filter(|u| !u.is_empty())
    }

    /// Password carried by the URL.
    pub fn password(&self) -> Option<&str> {
        self.property("password").filter(|p| !p.is_empty())
    }
}

fn parse_hierarchical(dialect: Dialect, rest: &str) -> ConnectionResult<Parts> {
    if !rest.starts_with("//") {
        return Err(ConnectionError::invalid_url(format!(
            "expected '//' after '{}'",
            dialect.jdbc_prefix()
        )));
    }

    let parsed = Url::parse(&format!("{}:{}", dialect.name(), rest))
        .map_err(|e| ConnectionError::invalid_url(e.to_string()))?;

    let host = parsed
        .host_str()
        .unwrap_or_default()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();

    let mut properties: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if !parsed.username().is_empty() {
        properties.push(("user".to_string(), parsed.username().to_string()));
    }
    if let Some(password) = parsed.password() {
        properties.push(("password".to_string(), password.to_string()));
    }

    let database = match dialect {
        Dialect::Snowflake => properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("db"))
            .map(|(_, v)| v.clone()),
        _ => Some(parsed.path().trim_start_matches('/').to_string()),
    };

    Ok(Parts {
        host,
        port: parsed.port(),
        database,
        properties,
    })
}

fn parse_sqlserver(rest: &str) -> ConnectionResult<Parts> {
    let rest = rest
        .strip_prefix("//")
        .ok_or_else(|| ConnectionError::invalid_url("expected '//' after 'jdbc:sqlserver:'"))?;

    let mut segments = rest.split(';');
    let server = segments.next().unwrap_or_default();

    let mut properties = Vec::new();
    for segment in segments.map(str::trim).filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').ok_or_else(|| {
            ConnectionError::invalid_url(format!("invalid connection property '{}'", segment))
        })?;
        properties.push((key.trim().to_string(), value.trim().to_string()));
    }

    let (server, instance) = match server.split_once('\\') {
        Some((host, instance)) => (host.to_string(), Some(instance)),
        None => (server.to_string(), None),
    };
    let (mut host, mut port) = (String::new(), None);
    if let Some(instance) = instance {
        let (name, instance_port) = split_host_port(instance)?;
        properties.push(("instanceName".to_string(), name));
        host = server;
        port = instance_port;
    } else if !server.is_empty() {
        (host, port) = split_host_port(&server)?;
    }

    let lookup = |names: &[&str]| {
        properties
            .iter()
            .find(|(k, _)| names.iter().any(|n| k.eq_ignore_ascii_case(n)))
            .map(|(_, v)| v.clone())
    };

    if host.is_empty() {
        host = lookup(&["serverName"]).unwrap_or_default();
    }
    if port.is_none() {
        port = lookup(&["portNumber", "port"])
            .map(|p| parse_port(&p))
            .transpose()?;
    }
    let database = lookup(&["databaseName", "database"]);

    Ok(Parts {
        host,
        port,
        database,
        properties,
    })
}

fn parse_oracle(rest: &str) -> ConnectionResult<Parts> {
    let target = rest
        .strip_prefix('@')
        .ok_or_else(|| ConnectionError::invalid_url("expected '@' after 'jdbc:oracle:thin:'"))?;

    if target.starts_with('(') {
        return Err(ConnectionError::invalid_url(
            "TNS connect descriptors are not supported",
        ));
    }

    let target = target.strip_prefix("//").unwrap_or(target);
    let (target, query) = match target.split_once('?') {
        Some((target, query)) => (target, Some(query)),
        None => (target, None),
    };

    let properties = query
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let (host, port, database) = if let Some((host_port, service)) = target.split_once('/') {
        let (host, port) = split_host_port(host_port)?;
        (host, port, Some(service.to_string()))
    } else if !target.starts_with('[') && target.matches(':').count() == 2 {
        // host:port:SID
        let mut it = target.splitn(3, ':');
        let host = it.next().unwrap_or_default().to_string();
        let port = parse_port(it.next().unwrap_or_default())?;
        let sid = it.next().map(String::from);
        (host, Some(port), sid)
    } else {
        let (host, port) = split_host_port(target)?;
        (host, port, None)
    };

    Ok(Parts {
        host,
        port,
        database,
        properties,
    })
}

fn split_host_port(s: &str) -> ConnectionResult<(String, Option<u16>)> {
    if let Some(rest) = s.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| ConnectionError::invalid_url("invalid IPv6 address"))?;
        let port = match after.strip_prefix(':') {
            Some(port) => Some(parse_port(port)?),
            None if after.is_empty() => None,
            None => return Err(ConnectionError::invalid_url("invalid IPv6 address")),
        };
        return Ok((host.to_string(), port));
    }

    match s.rsplit_once(':') {
        Some((host, port)) => Ok((host.to_string(), Some(parse_port(port)?))),
        None => Ok((s.to_string(), None)),
    }
}

fn parse_port(s: &str) -> ConnectionResult<u16> {
    s.trim()
        .parse()
        .map_err(|_| ConnectionError::invalid_url(format!("invalid port number '{}'", s)))
}

/// Replace passwords in a connection string with `***`.
///
/// Masks `password=` and `pwd=` properties in both `?a=b&c=d` and `;a=b`
/// syntaxes, and the password part of URL userinfo. A masked value runs up to
/// the next `key=` segment, so a password containing a delimiter is hidden
/// whole. Everything else stays visible for troubleshooting.
///
/// ```rust
/// use connprobe_core::mask_password;
///
/// assert_eq!(
///     mask_password("jdbc:mysql://h:3306/d?user=u&password=secret"),
///     "jdbc:mysql://h:3306/d?user=u&password=***"
/// );
/// ```
pub fn mask_password(url: &str) -> String {
    let url = mask_userinfo(url);
    let mut out = String::with_capacity(url.len());
    // Delimiter held back while a password value may still continue.
    let mut pending: Option<&str> = None;

    for piece in url.split_inclusive(['?', '&', ';']) {
        let (body, delimiter) = match piece.char_indices().last() {
            Some((i, c)) if matches!(c, '?' | '&' | ';') => piece.split_at(i),
            _ => (piece, ""),
        };
        let key = body
            .split_once('=')
            .map(|(key, _)| key)
            .filter(|key| is_property_key(key));

        if pending.is_some() {
            if key.is_none() {
                // Still inside the password value.
                pending = Some(delimiter);
                continue;
            }
            out.push_str(pending.take().unwrap_or_default());
        }

        match key {
            Some(key) if matches!(key.trim().to_ascii_lowercase().as_str(), "password" | "pwd") => {
                out.push_str(key);
                out.push_str("=***");
                pending = Some(delimiter);
            }
            _ => {
                out.push_str(body);
                out.push_str(delimiter);
            }
        }
    }

    out
}

fn is_property_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn mask_userinfo(url: &str) -> String {
    let Some(scheme_end) = url.find("//") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 2;
    let authority_len = url[authority_start..]
        .find(['/', '?', ';'])
        .unwrap_or(url.len() - authority_start);
    let authority = &url[authority_start..authority_start + authority_len];

    let Some(at) = authority.rfind('@') else {
        return url.to_string();
    };
    let Some(colon) = authority[..at].find(':') else {
        return url.to_string();
    };

    format!(
        "{}{}***{}",
        &url[..authority_start],
        &authority[..=colon],
        &url[authority_start + at..]
    )
}
