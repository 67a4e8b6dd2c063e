mod value;
pub(crate) use value::Value;

use procmap_core::{
    async_trait,
    driver::{is_identifier, Driver, ProcedureCall, Response},
    Error, Parameter, Result, ReturnShape, Row,
};
use std::sync::Arc;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, ToSql};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use url::Url;

/// Local variable receiving the procedure's `RETURN` value.
const STATUS: &str = "@procmap_status";

#[derive(Debug)]
pub struct MsSql {
    config: Config,
}

impl MsSql {
    /// Creates a driver from a `mssql://` or `sqlserver://` connection URL.
    ///
    /// `encrypt=false` disables TLS and `trustServerCertificate=true` skips
    /// certificate validation. No connection is opened until the first call.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(anyhow::Error::from)?;

        if !matches!(url.scheme(), "mssql" | "sqlserver") {
            return Err(anyhow::anyhow!(
                "connection URL does not have a `mssql` scheme; url={}",
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
        config.port(url.port().unwrap_or(1433));
        config.database(url.path().trim_start_matches('/'));
        config.authentication(AuthMethod::sql_server(
            url.username(),
            url.password().unwrap_or_default(),
        ));

        for (key, value) in url.query_pairs() {
            match (&*key, &*value) {
                ("encrypt", "false") => config.encryption(EncryptionLevel::NotSupported),
                ("encrypt", "true") => config.encryption(EncryptionLevel::Required),
                ("trustServerCertificate", "true") => config.trust_cert(),
                _ => {}
            }
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl From<Config> for MsSql {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Driver for MsSql {
    async fn connect(&self) -> Result<Box<dyn procmap_core::driver::Connection>> {
        let tcp = TcpStream::connect(self.config.get_addr())
            .await
            .map_err(Error::driver)?;
        tcp.set_nodelay(true).map_err(Error::driver)?;

        let client = Client::connect(self.config.clone(), tcp.compat_write())
            .await
            .map_err(Error::driver)?;

        Ok(Box::new(Connection::new(client)))
    }
}

pub struct Connection {
    client: Client<Compat<TcpStream>>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    pub fn new(client: Client<Compat<TcpStream>>) -> Self {
        Self { client }
    }
}

impl From<Client<Compat<TcpStream>>> for Connection {
    fn from(client: Client<Compat<TcpStream>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl procmap_core::driver::Connection for Connection {
    async fn call(&mut self, call: ProcedureCall) -> Result<Response> {
        let sql = call_statement(&call)?;
        let values = call
            .params()
            .iter()
            .map(|param| Value::from(param.value.clone()))
            .collect::<Vec<_>>();
        let args = values
            .iter()
            .map(|value| value as &dyn ToSql)
            .collect::<Vec<_>>();

        tracing::trace!(sql = %sql, shape = %call.shape, "mssql call");

        let mut results = self
            .client
            .query(sql.as_str(), &args)
            .await
            .map_err(Error::driver)?
            .into_results()
            .await
            .map_err(Error::driver)?;

        match call.shape {
            ReturnShape::Collection | ReturnShape::SingleRow => {
                let rows = results.into_iter().next().unwrap_or_default();
                Ok(Response::Rows(load_rows(rows)?))
            }
            ReturnShape::Scalar => {
                let value = match results.into_iter().next().and_then(first_row) {
                    Some(row) => first_value(row)?,
                    None => procmap_core::Value::Null,
                };

                Ok(Response::Scalar(value))
            }
            ReturnShape::NoResult => {
                // The status select is always the last result set
                let status = match results.pop().and_then(first_row) {
                    Some(row) => first_value(row)?,
                    None => procmap_core::Value::Null,
                };

                Ok(Response::Count(status_code(status)?))
            }
        }
    }
}

fn first_row(rows: Vec<tiberius::Row>) -> Option<tiberius::Row> {
    rows.into_iter().next()
}

fn load_rows(rows: Vec<tiberius::Row>) -> Result<Vec<Row>> {
    let Some(first) = rows.first() else {
        return Ok(vec![]);
    };

    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    rows.into_iter()
        .map(|row| {
            let values = row
                .into_iter()
                .map(|data| Value::from_sql(data).map(Value::into_inner))
                .collect::<Result<Vec<_>>>()?;
            Ok(Row::new(columns.clone(), values))
        })
        .collect()
}

fn first_value(row: tiberius::Row) -> Result<procmap_core::Value> {
    match row.into_iter().next() {
        Some(data) => Ok(Value::from_sql(data)?.into_inner()),
        None => Ok(procmap_core::Value::Null),
    }
}

/// Builds the `EXEC` batch for a call.
///
/// Arguments are bound by name. `NoResult` captures the procedure's `RETURN`
/// value and selects it as a final result set.
fn call_statement(call: &ProcedureCall) -> Result<String> {
    let procedure = call.checked_procedure()?;
    let args = call
        .params()
        .iter()
        .enumerate()
        .map(|(i, param)| Ok(format!("@{} = @P{}", argument_name(param)?, i + 1)))
        .collect::<Result<Vec<_>>>()?
        .join(", ");
    let target = if args.is_empty() {
        procedure.to_string()
    } else {
        format!("{procedure} {args}")
    };

    Ok(match call.shape {
        ReturnShape::NoResult => {
            format!("DECLARE {STATUS} int; EXEC {STATUS} = {target}; SELECT {STATUS};")
        }
        _ => format!("EXEC {target}"),
    })
}

/// Wire name of an argument, without its leading `@`.
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

/// The procedure's `RETURN` value; 0 when it returns none.
fn status_code(status: procmap_core::Value) -> Result<i64> {
    if status.is_null() {
        return Ok(0);
    }

    i64::try_from(status).map_err(|err| err.context("reading procedure status"))
}
