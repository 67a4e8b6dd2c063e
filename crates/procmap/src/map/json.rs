use super::{
    entry::{Entries, OperationEntry},
    MapSource,
};
use crate::{Error, MappingTable, Result, Translation};

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Mapping table described by a JSON array of operations.
///
/// ```json
/// [
///   {
///     "name": "GetUser",
///     "spName": "usp_GetUser",
///     "returnDataType": "SingleRow",
///     "parameters": [{ "parameterName": "Id", "spParameterName": "UserId" }]
///   }
/// ]
/// ```
///
/// `parameters` may also be an object from logical to wire name, or `null`
/// for an operation without parameters.
#[derive(Debug)]
pub struct JsonMap {
    entries: Entries,
}

#[derive(Debug, Deserialize)]
struct JsonOperation {
    #[serde(alias = "Name")]
    name: String,

    #[serde(
        rename = "spName",
        alias = "SpName",
        alias = "procedureName",
        alias = "procedure"
    )]
    sp_name: String,

    #[serde(
        rename = "returnDataType",
        alias = "ReturnDataType",
        alias = "returnShape"
    )]
    return_data_type: String,

    #[serde(default, alias = "Parameters")]
    parameters: Option<Parameters>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Parameters {
    List(Vec<ParameterEntry>),
    Map(IndexMap<String, String>),
}

#[derive(Debug, Deserialize)]
struct ParameterEntry {
    #[serde(rename = "parameterName", alias = "ParameterName")]
    parameter_name: String,

    #[serde(rename = "spParameterName", alias = "SpParameterName")]
    sp_parameter_name: String,
}

impl JsonMap {
    /// Parses a JSON mapping description.
    pub fn from_json(json: &str) -> Result<Self> {
        let operations: Vec<JsonOperation> = serde_json::from_str(json)
            .map_err(|err| Error::invalid_mapping(format!("malformed JSON mapping; {err}")))?;

        Ok(Self {
            entries: Entries::new(operations.into_iter().map(JsonOperation::into_entry).collect()),
        })
    }

    /// Reads and parses a JSON mapping file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err).context(format!("reading mapping file {}", path.display()))
        })?;

        Self::from_json(&json)
    }
}

impl JsonOperation {
    fn into_entry(self) -> OperationEntry {
        let parameters = self.parameters.map(|parameters| match parameters {
            Parameters::List(entries) => entries
                .into_iter()
                .map(|entry| (entry.parameter_name, entry.sp_parameter_name))
                .collect::<Translation>(),
            Parameters::Map(map) => map,
        });

        OperationEntry {
            name: self.name,
            procedure: self.sp_name,
            shape: self.return_data_type,
            parameters,
        }
    }
}

impl MapSource for JsonMap {
    fn build(&mut self) -> Result<MappingTable> {
        self.entries.build()
    }
}
