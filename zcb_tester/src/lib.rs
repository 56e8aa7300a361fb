//!
//! The zero-coupon bond contracts testing harness library.
//!

pub mod account;
pub mod artifact;
pub mod binding;
pub mod client;
pub mod decoder;
pub mod deployer;
pub mod error;
pub mod filters;
pub mod scenario;
pub mod submitter;
pub mod summary;
pub mod transaction;
pub mod utils;

pub use self::account::Account;
pub use self::artifact::contract_type::ContractType;
pub use self::artifact::Artifact;
pub use self::artifact::Artifacts;
pub use self::binding::ContractBinding;
pub use self::client::block::Block;
pub use self::client::block::BlockTag;
pub use self::client::rpc::RpcClient;
pub use self::client::Client;
pub use self::decoder::registration::Registration;
pub use self::decoder::LogDecoder;
pub use self::deployer::deployment::Deployment;
pub use self::deployer::Deployer;
pub use self::error::Error;
pub use self::error::Result;
pub use self::filters::Filters;
pub use self::scenario::config::ScenarioConfig;
pub use self::scenario::context::ScenarioContext;
pub use self::scenario::Scenario;
pub use self::submitter::submission::Submission;
pub use self::submitter::Submitter;
pub use self::summary::Summary;
pub use self::transaction::RecoveredTransaction;
pub use self::transaction::SignedTransaction;
pub use self::transaction::TransactionRequest;
pub use self::transaction::TransactionResult;

/// The EVM word byte length.
pub const BYTE_LENGTH_FIELD: usize = 32;

/// The Ethereum address byte length.
pub const BYTE_LENGTH_ETH_ADDRESS: usize = 20;

/// The default artifacts root directory.
pub const DEFAULT_ARTIFACTS_DIRECTORY: &str = "./contracts/";

/// The environment variable selecting the issuer contract type.
pub const ENVIRONMENT_ISSUER_TYPE: &str = "TYPE";

/// The successful exit code.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The failure exit code.
pub const EXIT_CODE_FAILURE: i32 = 1;
