//! Ingestion requests.

use crate::data_type::DataType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option key that carries the document type in untyped option maps.
pub const DATA_TYPE_OPTION: &str = "data_type";

/// Arguments for [`crate::RagEngine::add`].
///
/// `args` are positional values; the first one names the source. `options`
/// holds any extra named options and is forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,

    #[serde(default)]
    pub options: Map<String, Value>,
}

impl AddRequest {
    /// Request to ingest a single source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            args: vec![source.into()],
            ..Default::default()
        }
    }

    /// Request with no positional arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Request from a list of positional arguments.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The source named by the first positional argument, if any.
    pub fn source(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}
