//!
//! The JSON-RPC 2.0 envelope.
//!

use serde::Deserialize;
use serde::Serialize;

///
/// The JSON-RPC request.
///
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    /// The protocol version.
    pub jsonrpc: &'static str,
    /// The request ID.
    pub id: u64,
    /// The method name.
    pub method: &'a str,
    /// The positional parameters.
    pub params: serde_json::Value,
}

impl<'a> Request<'a> {
    /// The protocol version.
    pub const VERSION: &'static str = "2.0";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: Self::VERSION,
            id,
            method,
            params,
        }
    }
}

///
/// The JSON-RPC response.
///
#[derive(Debug, Deserialize)]
pub struct Response {
    /// The result, absent on error.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// The error, absent on success.
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

///
/// The JSON-RPC error object.
///
#[derive(Debug, Deserialize)]
pub struct ErrorObject {
    /// The error code.
    pub code: i64,
    /// The error message.
    pub message: String,
    /// The optional details, such as revert data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        if let Some(data) = self.data.as_ref() {
            write!(f, ": {data}")?;
        }
        Ok(())
    }
}
