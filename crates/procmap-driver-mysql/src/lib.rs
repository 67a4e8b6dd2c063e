mod value;
pub(crate) use value::Value;

use mysql_async::{
    prelude::{Queryable, ToValue},
    Conn, Params, Pool,
};
use procmap_core::{
    async_trait,
    driver::{Driver, ProcedureCall, Response},
    Error, Parameter, Result, ReturnShape, Row,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// Declared parameter names of each procedure, in declaration order. Shared
/// by every connection a driver opens.
type Signatures = Arc<Mutex<HashMap<String, Arc<[String]>>>>;

const SIGNATURE_QUERY: &str = "SELECT PARAMETER_NAME FROM information_schema.PARAMETERS \
    WHERE SPECIFIC_SCHEMA = COALESCE(?, DATABASE()) AND SPECIFIC_NAME = ? \
    AND ROUTINE_TYPE = 'PROCEDURE' AND ORDINAL_POSITION > 0 \
    ORDER BY ORDINAL_POSITION";

#[derive(Debug)]
pub struct MySQL {
    pool: Pool,
    signatures: Signatures,
}

impl MySQL {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(anyhow::Error::from)?;

        if url.scheme() != "mysql" {
            return Err(anyhow::anyhow!(
                "connection url does not have a `mysql` scheme; url={}",
                url
            )
            .into());
        }

        url.host_str()
            .ok_or_else(|| anyhow::anyhow!("missing host in connection URL; url={}", url))?;

        if url.path().is_empty() || url.path() == "/" {
            return Err(anyhow::anyhow!(
                "no database specified - missing path in connection URL; url={}",
                url
            )
            .into());
        }

        let opts = mysql_async::Opts::from_url(url.as_ref()).map_err(Error::driver)?;
        let opts = mysql_async::OptsBuilder::from_opts(opts).client_found_rows(true);

        Ok(Self::from(Pool::new(opts)))
    }
}

impl From<Pool> for MySQL {
    fn from(pool: Pool) -> Self {
        Self {
            pool,
            signatures: Signatures::default(),
        }
    }
}

#[async_trait]
impl Driver for MySQL {
    async fn connect(&self) -> Result<Box<dyn procmap_core::driver::Connection>> {
        let conn = self.pool.get_conn().await.map_err(Error::driver)?;
        Ok(Box::new(Connection {
            conn,
            signatures: self.signatures.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct Connection {
    conn: Conn,
    signatures: Signatures,
}

impl Connection {
    pub fn new(conn: Conn) -> Self {
        Self {
            conn,
            signatures: Signatures::default(),
        }
    }

    /// Declared parameter names of `procedure`, loaded from
    /// `information_schema` on first use.
    async fn signature(&mut self, procedure: &str) -> Result<Arc<[String]>> {
        let cached = self
            .signatures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(procedure)
            .cloned();

        if let Some(signature) = cached {
            return Ok(signature);
        }

        let (schema, name) = match procedure.split_once('.') {
            Some((schema, name)) => (Some(schema), name),
            None => (None, procedure),
        };

        let names: Vec<String> = self
            .conn
            .exec(SIGNATURE_QUERY, (schema, name))
            .await
            .map_err(Error::driver)?;

        tracing::trace!(procedure, parameters = names.len(), "loaded procedure signature");

        let signature: Arc<[String]> = names.into();
        self.signatures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(procedure.to_string(), signature.clone());

        Ok(signature)
    }
}

impl From<Conn> for Connection {
    fn from(conn: Conn) -> Self {
        Self::new(conn)
    }
}

#[async_trait]
impl procmap_core::driver::Connection for Connection {
    async fn call(&mut self, call: ProcedureCall) -> Result<Response> {
        let procedure = call.checked_procedure()?;
        let signature = self.signature(procedure).await?;
        let args = bind_arguments(procedure, &signature, call.params.clone().unwrap_or_default())?;
        let sql = call_statement(&call, args.len())?;
        let params = Params::from(args);

        tracing::trace!(sql = %sql, shape = %call.shape, "mysql call");

        match call.shape {
            ReturnShape::Collection | ReturnShape::SingleRow => {
                let rows: Vec<mysql_async::Row> =
                    self.conn.exec(&sql, params).await.map_err(Error::driver)?;

                Ok(Response::Rows(load_rows(rows)?))
            }
            ReturnShape::Scalar => {
                let row: Option<mysql_async::Row> = self
                    .conn
                    .exec_first(&sql, params)
                    .await
                    .map_err(Error::driver)?;

                let value = match row {
                    Some(row) => load_row(row, None)?.into_first(),
                    None => procmap_core::Value::Null,
                };

                Ok(Response::Scalar(value))
            }
            ReturnShape::NoResult => {
                self.conn
                    .exec_drop(&sql, params)
                    .await
                    .map_err(Error::driver)?;

                Ok(Response::Count(self.conn.affected_rows() as i64))
            }
        }
    }
}

/// `CALL name(?, ?, ...)` with `arity` positional placeholders.
fn call_statement(call: &ProcedureCall, arity: usize) -> Result<String> {
    let procedure = call.checked_procedure()?;
    let placeholders = vec!["?"; arity].join(", ");
    Ok(format!("CALL {procedure}({placeholders})"))
}

/// Places each argument at the position its name is declared in `signature`.
///
/// Names match case-insensitively and may carry a leading `@`. Declared
/// parameters without an argument are bound as NULL.
fn bind_arguments(
    procedure: &str,
    signature: &[String],
    params: Vec<Parameter>,
) -> Result<Vec<mysql_async::Value>> {
    let mut args = vec![mysql_async::Value::NULL; signature.len()];

    for param in params {
        let name = param.name.trim_start_matches('@');
        let Some(position) = signature
            .iter()
            .position(|declared| declared.eq_ignore_ascii_case(name))
        else {
            return Err(Error::invalid_mapping(format!(
                "procedure `{procedure}` has no parameter `{}`",
                param.name
            )));
        };

        args[position] = Value::from(param.value).to_value();
    }

    Ok(args)
}

fn load_rows(rows: Vec<mysql_async::Row>) -> Result<Vec<Row>> {
    let mut columns: Option<Arc<[String]>> = None;

    rows.into_iter()
        .map(|row| {
            let names = columns
                .get_or_insert_with(|| {
                    row.columns_ref()
                        .iter()
                        .map(|column| column.name_str().into_owned())
                        .collect()
                })
                .clone();

            load_row(row, Some(names))
        })
        .collect()
}

fn load_row(mut row: mysql_async::Row, names: Option<Arc<[String]>>) -> Result<Row> {
    let columns = row.columns();
    let names = names.unwrap_or_else(|| {
        columns
            .iter()
            .map(|column| column.name_str().into_owned())
            .collect()
    });

    let mut values = Vec::with_capacity(columns.len());
    for i in 0..columns.len() {
        let raw = row.take::<mysql_async::Value, usize>(i).unwrap_or(mysql_async::Value::NULL);
        values.push(Value::from_sql(raw, &columns[i])?.into_inner());
    }

    Ok(Row::new(names, values))
}
