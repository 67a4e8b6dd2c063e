mod value;
pub(crate) use value::Value;

use postgres_types::ToSql;
use procmap_core::{
    async_trait,
    driver::{is_identifier, Driver, ProcedureCall, Response},
    Error, Parameter, Result, ReturnShape, Row,
};
use std::sync::Arc;
use tokio_postgres::{Client, Config, NoTls};
use url::Url;

#[derive(Debug)]
pub struct PostgreSQL {
    config: Config,
}

impl PostgreSQL {
    /// Creates a driver from a `postgresql://` connection URL.
    ///
    /// No connection is opened until the first procedure call.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(anyhow::Error::from)?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(anyhow::anyhow!(
                "connection URL does not have a `postgresql` scheme; url={}",
                url
            )
            .into());
        }

        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("missing host in connection URL; url={}", url))?;

        if url.path().is_empty() || url.path() == "/" {
            return Err(anyhow::anyhow!(
                "no database specified - missing path in connection URL; url={}",
                url
            )
            .into());
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(url.path().trim_start_matches('/'));

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl From<Config> for PostgreSQL {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    async fn connect(&self) -> Result<Box<dyn procmap_core::driver::Connection>> {
        let (client, connection) = self.config.connect(NoTls).await.map_err(Error::driver)?;

        tokio::spawn(async move {
            if let Err(error) = connection.await {
                tracing::error!(%error, "postgresql connection error");
            }
        });

        Ok(Box::new(Connection::new(client)))
    }
}

#[derive(Debug)]
pub struct Connection {
    client: Client,
}

impl Connection {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl From<Client> for Connection {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl procmap_core::driver::Connection for Connection {
    async fn call(&mut self, call: ProcedureCall) -> Result<Response> {
        let sql = call_statement(&call)?;
        let params = call
            .params
            .unwrap_or_default()
            .into_iter()
            .map(|param| Value::from(param.value))
            .collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        tracing::trace!(sql = %sql, shape = %call.shape, "postgresql call");

        let rows = self.client.query(&sql, &args).await.map_err(Error::driver)?;

        if call.shape == ReturnShape::NoResult {
            // `CALL` carries no row count. Procedures with OUT or INOUT
            // parameters answer one row, whose first column is the status.
            let status = match rows.first() {
                Some(row) if !row.is_empty() => Value::from_sql(0, row)?.into_inner(),
                _ => procmap_core::Value::Null,
            };
            return Ok(Response::Count(status_code(status)?));
        }

        if call.shape == ReturnShape::Scalar {
            let value = match rows.first() {
                Some(row) if !row.is_empty() => Value::from_sql(0, row)?.into_inner(),
                _ => procmap_core::Value::Null,
            };
            return Ok(Response::Scalar(value));
        }

        let Some(first) = rows.first() else {
            return Ok(Response::Rows(vec![]));
        };

        let columns: Arc<[String]> = first
            .columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect();

        let rows = rows
            .iter()
            .map(|row| {
                let values = (0..row.len())
                    .map(|i| Value::from_sql(i, row).map(Value::into_inner))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Row::new(columns.clone(), values))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::Rows(rows))
    }
}

/// Builds the statement for a call.
///
/// Row and scalar shapes select from the function; `NoResult` uses `CALL`.
/// Arguments are passed in named notation so their order does not matter.
fn call_statement(call: &ProcedureCall) -> Result<String> {
    let procedure = call.checked_procedure()?;
    let args = call
        .params()
        .iter()
        .enumerate()
        .map(|(i, param)| Ok(format!("{} => ${}", argument_name(param)?, i + 1)))
        .collect::<Result<Vec<_>>>()?
        .join(", ");

    Ok(match call.shape {
        ReturnShape::NoResult => format!("CALL {procedure}({args})"),
        _ => format!("SELECT * FROM {procedure}({args})"),
    })
}

/// Wire name of an argument, without a leading `@`.
fn argument_name(param: &Parameter) -> Result<&str> {
    let name = param.name.strip_prefix('@').unwrap_or(&param.name);

    if is_identifier(name) {
        Ok(name)
    } else {
        Err(Error::invalid_mapping(format!(
            "parameter name `{}` is not a valid identifier",
            param.name
        )))
    }
}

/// Status of a `CALL`; 0 when the procedure reports none.
fn status_code(status: procmap_core::Value) -> Result<i64> {
    if status.is_null() {
        return Ok(0);
    }

    i64::try_from(status).map_err(|err| err.context("reading procedure status"))
}
