//!
//! The compiled contract artifacts.
//!

pub mod contract_type;


use std::path::Path;
use std::path::PathBuf;

use web3::ethabi;

use crate::error::Error;
use crate::error::Result;

use self::contract_type::ContractType;

///
/// The compiled contract artifact.
///
#[derive(Debug, Clone)]
pub struct Artifact {
    /// The contract type.
    pub contract_type: ContractType,
    /// The contract init code.
    pub bytecode: Vec<u8>,
    /// The contract ABI.
    pub interface: ethabi::Contract,
}

impl Artifact {
    ///
    /// Returns the init code as hex with the `0x` marker.
    ///
    pub fn bytecode_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytecode.as_slice()))
    }
}

///
/// The artifact directory with the static contract type table.
///
/// Artifacts are read from disk on every lookup.
///
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// The artifacts root directory.
    root: PathBuf,
}

impl Artifacts {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    ///
    /// Loads the artifact of the contract type identified by `name`.
    ///
    pub fn load_by_name(&self, name: &str) -> Result<Artifact> {
        let contract_type: ContractType = name.parse()?;
        self.load(contract_type)
    }

    ///
    /// Loads the artifact of `contract_type`.
    ///
    pub fn load(&self, contract_type: ContractType) -> Result<Artifact> {
        let (bin_path, abi_path) = contract_type.paths();
        let bin_path = self.root.join(bin_path);
        let abi_path = self.root.join(abi_path);

        let bytecode = Self::read_bytecode(bin_path.as_path())?;
        let interface = Self::read_interface(abi_path.as_path())?;

        Ok(Artifact {
            contract_type,
            bytecode,
            interface,
        })
    }

    ///
    /// Reads the raw hex init code.
    ///
    fn read_bytecode(path: &Path) -> Result<Vec<u8>> {
        let text = std::fs::read_to_string(path)?;
        let text = text.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        if text.is_empty() {
            return Err(Error::MalformedArtifact {
                path: path.to_owned(),
                reason: "empty bytecode".to_owned(),
            });
        }

        hex::decode(text).map_err(|error| Error::MalformedArtifact {
            path: path.to_owned(),
            reason: error.to_string(),
        })
    }

    ///
    /// Reads the JSON ABI.
    ///
    fn read_interface(path: &Path) -> Result<ethabi::Contract> {
        let file = std::fs::File::open(path)?;
        ethabi::Contract::load(std::io::BufReader::new(file)).map_err(|error| {
            Error::MalformedArtifact {
                path: path.to_owned(),
                reason: error.to_string(),
            }
        })
    }
}
