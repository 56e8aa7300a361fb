//!
//! The harness error.
//!

use std::path::PathBuf;

///
/// The harness result.
///
pub type Result<T> = std::result::Result<T, Error>;

///
/// The harness error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The contract type identifier is not in the artifact table.
    #[error("Artifact for contract type `{name}` not found")]
    ArtifactNotFound {
        /// The unrecognized identifier.
        name: String,
    },
    /// The artifact file exists, but its contents cannot be parsed.
    #[error("Malformed artifact {path:?}: {reason}")]
    MalformedArtifact {
        /// The path to the artifact file.
        path: PathBuf,
        /// The parsing error description.
        reason: String,
    },
    /// The artifact file cannot be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The ledger declined to estimate gas, usually because the transaction would revert.
    #[error("Gas estimation rejected: {reason}")]
    EstimationRejected {
        /// The ledger message.
        reason: String,
    },
    /// The ledger refused the signed transaction, or its receipt could not be obtained.
    #[error("Transaction submission failed: {reason}")]
    SubmissionFailed {
        /// The ledger message.
        reason: String,
    },
    /// The transaction was included, but its execution reverted.
    #[error("Transaction {hash:?} reverted")]
    Reverted {
        /// The transaction hash.
        hash: web3::types::H256,
    },
    /// The contract deployment did not yield a contract address.
    #[error("Deployment failed: {source}")]
    DeploymentFailed {
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
    /// A log entry does not match the expected event shape.
    #[error("Log of event `{event}` does not match its ABI: {reason}")]
    DecodeMismatch {
        /// The event name.
        event: String,
        /// The decoding error description.
        reason: String,
    },
    /// A function or constructor call cannot be encoded or decoded.
    #[error("Binding `{function}`: {reason}")]
    Binding {
        /// The function name.
        function: String,
        /// The ABI error description.
        reason: String,
    },
    /// The key or the transaction envelope is not suitable for signing.
    #[error("Signing: {reason}")]
    Signing {
        /// The error description.
        reason: String,
    },
    /// The raw transaction cannot be decoded, or its sender cannot be recovered.
    #[error("Invalid raw transaction: {reason}")]
    InvalidTransaction {
        /// The error description.
        reason: String,
    },
    /// The node could not be reached, or its reply is not a JSON-RPC response.
    #[error("RPC method `{method}` transport failed: {message}")]
    Transport {
        /// The JSON-RPC method.
        method: String,
        /// The transport error message.
        message: String,
    },
    /// The node answered the JSON-RPC request with an error or an unexpected result.
    #[error("RPC method `{method}` failed: {message}")]
    Rpc {
        /// The JSON-RPC method.
        method: String,
        /// The error message.
        message: String,
    },
}

impl Error {
    ///
    /// Wraps the error into a deployment failure, unless it is one already.
    ///
    pub fn into_deployment_failure(self) -> Self {
        match self {
            error @ Self::DeploymentFailed { .. } => error,
            error => Self::DeploymentFailed {
                source: Box::new(error),
            },
        }
    }

    ///
    /// Whether the ledger itself declined the transaction.
    ///
    /// Local failures, such as encoding or signing errors, never count as a rejection.
    ///
    pub fn is_ledger_rejection(&self) -> bool {
        matches!(
            self,
            Self::EstimationRejected { .. } | Self::SubmissionFailed { .. } | Self::Reverted { .. }
        )
    }

    ///
    /// A shortcut constructor for ABI binding errors.
    ///
    pub fn binding<S>(function: &str, reason: S) -> Self
    where
        S: ToString,
    {
        Self::Binding {
            function: function.to_owned(),
            reason: reason.to_string(),
        }
    }
}
