//! `encode-param`: signature and literals to call data

use std::path::PathBuf;

use clap::Args;
use ethutil_abi::{dump_call_data, encode_call, DebugOptions};
use serde_json::{json, Value};

use crate::commands::resolve_signature;
use crate::{output::Output, CliError};

/// Encode function arguments as ABI call data
#[derive(Debug, Args)]
pub struct EncodeParamArgs {
    /// Function signature, e.g. "transfer(address,uint256)" or "(uint256,bool)"
    signature: String,

    /// One literal per parameter; arrays as "[a,b]", tuples as "(a,b)"
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,

    /// Resolve the function by name in this ABI JSON file
    #[arg(long)]
    abi_file: Option<PathBuf>,
}

impl EncodeParamArgs {
    pub fn execute(self, options: &DebugOptions, json: bool) -> Result<(), CliError> {
        let sig = resolve_signature(&self.signature, self.abi_file.as_deref())?;
        let call = encode_call(&sig, &self.args, options)?;
        let data = call.to_hex();

        let selector = call
            .selector
            .map_or(Value::Null, |s| Value::String(format!("0x{}", hex::encode(s))));

        Output::new(json)
            .field("signature", &sig.canonical())
            .field_value("selector", selector)
            .field("data", &data)
            .field_value("words", json!(dump_call_data(&call)))
            .lines(dump_call_data(&call))
            .line(format!("encoded parameters (input data) = {}", data))
            .print();

        Ok(())
    }
}
