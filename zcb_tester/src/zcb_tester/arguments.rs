//!
//! The ZCB tester arguments.
//!

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;

///
/// The ZCB tester arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// The logging level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the output completely.
    #[arg(short, long)]
    pub quiet: bool,

    /// Runs only steps whose name contains any string from the specified ones.
    #[arg(short, long)]
    pub name: Vec<String>,

    /// Runs only steps from the specified groups: `issuer`, `bond`.
    #[arg(short, long)]
    pub group: Vec<String>,

    /// The ledger JSON-RPC endpoint.
    #[arg(long, default_value = zcb_tester::RpcClient::DEFAULT_URL)]
    pub rpc_url: String,

    /// The root directory of the compiled contract artifacts.
    #[arg(long, default_value = zcb_tester::DEFAULT_ARTIFACTS_DIRECTORY)]
    pub artifacts: PathBuf,

    /// The issuer contract type.
    #[arg(long, env = zcb_tester::ENVIRONMENT_ISSUER_TYPE, default_value = "zcb-issuer")]
    pub issuer_type: zcb_tester::ContractType,

    /// The private key of a funded account. The first one belongs to the owner.
    #[arg(long = "private-key")]
    pub private_keys: Vec<String>,

    /// The JSON file with an array of private keys, appended after `--private-key` ones.
    #[arg(long)]
    pub keys_file: Option<PathBuf>,

    /// The receipt polling interval in milliseconds.
    #[arg(long, default_value_t = zcb_tester::RpcClient::DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval: u64,
}

impl Arguments {
    ///
    /// Validate the arguments passed from user, checking invariants that are not
    /// expressed in the type system.
    ///
    pub fn validate(arguments: Self) -> anyhow::Result<Self> {
        if arguments.verbose && arguments.quiet {
            anyhow::bail!("Verbose and quiet modes are mutually exclusive");
        }
        if !arguments.issuer_type.is_issuer() {
            anyhow::bail!(
                "Contract type `{}` cannot be used as the issuer. Supported types: {}",
                arguments.issuer_type,
                zcb_tester::ContractType::ALL
                    .iter()
                    .filter(|contract_type| contract_type.is_issuer())
                    .join(", "),
            );
        }
        if arguments.private_keys.is_empty() && arguments.keys_file.is_none() {
            anyhow::bail!("Private keys must be passed with `--private-key` or `--keys-file`");
        }
        if arguments.poll_interval == 0 {
            anyhow::bail!("The polling interval must be positive");
        }

        Ok(arguments)
    }

    ///
    /// Returns the private keys in order, reading the keys file if specified.
    ///
    pub fn private_keys(&self) -> anyhow::Result<Vec<String>> {
        let mut private_keys = self.private_keys.clone();
        if let Some(path) = self.keys_file.as_ref() {
            let file = std::fs::File::open(path)
                .map_err(|error| anyhow::anyhow!("Keys file {path:?} reading: {error}"))?;
            let keys: Vec<String> = serde_json::from_reader(std::io::BufReader::new(file))
                .map_err(|error| anyhow::anyhow!("Keys file {path:?} parsing: {error}"))?;
            private_keys.extend(keys);
        }
        Ok(private_keys)
    }
}
