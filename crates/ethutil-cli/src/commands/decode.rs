//! `decode-output`: raw call output to named values

use std::path::PathBuf;

use clap::Args;
use ethutil_abi::{decode_call_output, dump_words, format_outputs, outputs_to_json, DebugOptions};
use ethutil_primitives::strip_hex_prefix;
use serde_json::json;

use crate::commands::resolve_signature;
use crate::{output::Output, CliError};

/// Decode raw call output using a signature's returns clause
#[derive(Debug, Args)]
pub struct DecodeOutputArgs {
    /// Signature with returns clause, e.g. "balanceOf(address) returns (uint256 balance)"
    signature: String,

    /// Raw output bytes as hex
    data: String,

    /// Resolve the function by name in this ABI JSON file
    #[arg(long)]
    abi_file: Option<PathBuf>,
}

impl DecodeOutputArgs {
    pub fn execute(self, options: &DebugOptions, json: bool) -> Result<(), CliError> {
        let sig = resolve_signature(&self.signature, self.abi_file.as_deref())?;
        let data = hex::decode(strip_hex_prefix(self.data.trim()))
            .map_err(|e| CliError::InvalidHex(e.to_string()))?;
        let words = dump_words(&data);

        if sig.returns.is_empty() {
            tracing::warn!("signature `{}` has no returns clause, nothing to decode", self.signature);
        }

        let values = match decode_call_output(&sig, &data, options) {
            Ok(values) => values,
            Err(e) => {
                // Leave the raw words on screen for manual inspection
                for line in &words {
                    eprintln!("{}", line);
                }
                return Err(e.into());
            }
        };

        Output::new(json)
            .field_value("words", json!(words))
            .field_value("outputs", outputs_to_json(&values))
            .lines(words)
            .lines(format_outputs(&values))
            .print();

        Ok(())
    }
}
