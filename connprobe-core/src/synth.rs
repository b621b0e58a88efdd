//! Connection string synthesis.

use tracing::debug;

use crate::descriptor::ConnectionDescriptor;
use crate::dialect::Dialect;
use crate::error::{ConnectionError, ConnectionResult};
use crate::jdbc::mask_password;

/// Return the connection string to probe for a descriptor.
///
/// A supplied connection string is returned unchanged without any further
/// checks. Otherwise host, port and database name must all be present and the
/// database type must name a supported [`Dialect`].
///
/// ```rust
/// use connprobe_core::{ConnectionDescriptor, synthesize};
///
/// let d = ConnectionDescriptor::builder()
///     .host("db1")
///     .port("5432")
///     .database_name("sales")
///     .database_type("postgresql")
///     .build();
/// assert_eq!(synthesize(&d).unwrap(), "jdbc:postgresql://db1:5432/sales");
/// ```
pub fn synthesize(descriptor: &ConnectionDescriptor) -> ConnectionResult<String> {
    if descriptor.has_connection_string() {
        debug!(
            url = %mask_password(descriptor.connection_string()),
            "Using supplied connection string"
        );
        return Ok(descriptor.connection_string().to_string());
    }

    if !descriptor.has_endpoint() {
        debug!("Descriptor lacks host, port or database name");
        return Err(ConnectionError::InsufficientDetails);
    }

    let dialect: Dialect = descriptor.database_type().parse()?;
    let url = dialect.render(descriptor);

    debug!(dialect = %dialect, url = %mask_password(&url), "Built JDBC string");
    Ok(url)
}
