//! Supported database dialects.

use std::fmt;
use std::str::FromStr;

use crate::descriptor::ConnectionDescriptor;
use crate::error::ConnectionError;

/// A database engine family with its own connection string grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Oracle (thin driver)
    Oracle,
    /// MySQL
    MySql,
    /// PostgreSQL
    PostgreSql,
    /// Microsoft SQL Server
    SqlServer,
    /// Snowflake
    Snowflake,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Dialect; 5] = [
        Self::Oracle,
        Self::MySql,
        Self::PostgreSql,
        Self::SqlServer,
        Self::Snowflake,
    ];

    /// Canonical name, as accepted in `databaseType`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oracle => "oracle",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::SqlServer => "sqlserver",
            Self::Snowflake => "snowflake",
        }
    }

    /// JDBC URL prefix identifying this dialect.
    pub fn jdbc_prefix(&self) -> &'static str {
        match self {
            Self::Oracle => "jdbc:oracle:thin:",
            Self::MySql => "jdbc:mysql:",
            Self::PostgreSql => "jdbc:postgresql:",
            Self::SqlServer => "jdbc:sqlserver:",
            Self::Snowflake => "jdbc:snowflake:",
        }
    }

    /// Conventional port of the engine.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Oracle => 1521,
            Self::MySql => 3306,
            Self::PostgreSql => 5432,
            Self::SqlServer => 1433,
            Self::Snowflake => 443,
        }
    }

    /// Whether the synthesized string carries the credentials.
    pub fn embeds_credentials(&self) -> bool {
        matches!(self, Self::MySql)
    }

    /// Detect the dialect from a connection string prefix (case-insensitive).
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| {
            let prefix = d.jdbc_prefix();
            url.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }

    /// Render the connection string for a descriptor.
    ///
    /// Fields are substituted verbatim; callers check for missing fields first.
    pub fn render(&self, d: &ConnectionDescriptor) -> String {
        match self {
            Self::Oracle => format!(
                "jdbc:oracle:thin:@//{}:{}/{}",
                d.host(),
                d.port(),
                d.database_name()
            ),
            Self::MySql => format!(
                "jdbc:mysql://{}:{}/{}?user={}&password={}",
                d.host(),
                d.port(),
                d.database_name(),
                d.username(),
                d.password()
            ),
            Self::PostgreSql => format!(
                "jdbc:postgresql://{}:{}/{}",
                d.host(),
                d.port(),
                d.database_name()
            ),
            Self::SqlServer => format!(
                "jdbc:sqlserver://{}:{};databaseName={}",
                d.host(),
                d.port(),
                d.database_name()
            ),
            Self::Snowflake => format!(
                "jdbc:snowflake://{}.snowflakecomputing.com/?db={}",
                d.host(),
                d.database_name()
            ),
        }
    }
}

impl FromStr for Dialect {
    type Err = ConnectionError;

    /// Parse a `databaseType` value, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "oracle" => Ok(Self::Oracle),
            "mysql" => Ok(Self::MySql),
            "postgresql" => Ok(Self::PostgreSql),
            "sqlserver" => Ok(Self::SqlServer),
            "snowflake" => Ok(Self::Snowflake),
            _ => Err(ConnectionError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
