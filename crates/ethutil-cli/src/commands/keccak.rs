//! `keccak`: Keccak-256 of files or stdin

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use clap::Args;
use ethutil_crypto::{keccak256, keccak256_reader};
use ethutil_primitives::{strip_hex_prefix, H256};
use serde_json::{json, Value};

use crate::{output::Output, CliError};

/// Hash files with Keccak-256
#[derive(Debug, Args)]
pub struct KeccakArgs {
    /// Files to hash; "-" or none reads stdin
    files: Vec<String>,

    /// Treat the content as hex text and hash the decoded bytes
    #[arg(long)]
    binary: bool,
}

impl KeccakArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let files = if self.files.is_empty() {
            vec!["-".to_string()]
        } else {
            self.files
        };

        let mut output = Output::new(json);
        let mut entries = Vec::with_capacity(files.len());
        for file in &files {
            let hash = hash_input(file, self.binary)?;
            tracing::debug!(file = %file, hash = %hash, "hashed input");
            output = output.line(format!("{}  {}", hex::encode(hash.as_bytes()), file));
            entries.push(json!({"file": file, "keccak256": hash.to_hex()}));
        }

        output.field_value("hashes", Value::Array(entries)).print();
        Ok(())
    }
}

fn hash_input(file: &str, binary: bool) -> Result<H256, CliError> {
    if binary {
        let mut text = String::new();
        open(file)?.read_to_string(&mut text)?;
        let bytes = hex::decode(strip_hex_prefix(text.trim()))
            .map_err(|e| CliError::InvalidHex(format!("{}: {}", file, e)))?;
        return Ok(keccak256(&bytes));
    }
    Ok(keccak256_reader(open(file)?)?)
}

fn open(file: &str) -> Result<Box<dyn Read>, CliError> {
    if file == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let path = Path::new(file);
    let handle = File::open(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(handle))
}
