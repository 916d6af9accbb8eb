use quarry_core::{driver::Driver, Error, Result};

use url::Url;

/// Resolves the driver for a connection URL by its scheme.
pub fn connect(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url).map_err(|err| {
        Error::bad_configuration(format!("invalid connection URL; url={url}; {err}"))
    })?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::bad_configuration(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(quarry_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::bad_configuration("`sqlite` feature not enabled"))
}
