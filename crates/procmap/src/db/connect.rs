use crate::{Driver, Result};

use procmap_core::err;
use std::sync::Arc;
use url::Url;

pub(super) async fn driver_for_url(url: &str) -> Result<Arc<dyn Driver>> {
    let url = Url::parse(url).map_err(anyhow::Error::from)?;

    match url.scheme() {
        "mssql" | "sqlserver" => connect_mssql(&url).await,
        "mysql" => connect_mysql(&url).await,
        "postgresql" | "postgres" => connect_postgresql(&url).await,
        scheme => Err(err!("unsupported database; scheme={scheme}; url={url}")),
    }
}

#[cfg(feature = "mssql")]
async fn connect_mssql(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = procmap_driver_mssql::MsSql::new(url.as_str())?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "mssql"))]
async fn connect_mssql(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(err!("`mssql` feature not enabled"))
}

#[cfg(feature = "mysql")]
async fn connect_mysql(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = procmap_driver_mysql::MySQL::new(url.as_str())?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(err!("`mysql` feature not enabled"))
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &Url) -> Result<Arc<dyn Driver>> {
    let driver = procmap_driver_postgresql::PostgreSQL::new(url.as_str())?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(err!("`postgresql` feature not enabled"))
}
