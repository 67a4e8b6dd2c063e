use crate::Error;

use std::str::FromStr;

/// The kind of result a stored procedure produces, which selects the
/// execution path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    /// Zero or more rows, each materialized into a record.
    Collection,

    /// At most one row. Extra rows are ignored.
    SingleRow,

    /// The first column of the first row.
    Scalar,

    /// No result set; the backend reports an affected-row or status count.
    #[default]
    NoResult,
}

impl ReturnShape {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::SingleRow => "SingleRow",
            Self::Scalar => "Scalar",
            Self::NoResult => "NoResult",
        }
    }

    /// Returns `true` if the procedure's rows are materialized into records.
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Collection | Self::SingleRow)
    }
}

impl core::fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReturnShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Collection" | "Enumerable" => Ok(Self::Collection),
            "SingleRow" | "Entity" => Ok(Self::SingleRow),
            "Scalar" => Ok(Self::Scalar),
            "NoResult" | "NoReturnValue" => Ok(Self::NoResult),
            _ => Err(Error::invalid_mapping(format!(
                "unrecognized return shape `{s}`"
            ))),
        }
    }
}
