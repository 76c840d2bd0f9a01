//! `sig`: canonical signature and selector

use ethutil_abi::parse_signature;
use serde_json::{json, Value};

use crate::{output::Output, CliError};

pub fn execute(signature: &str, json: bool) -> Result<(), CliError> {
    let sig = parse_signature(signature)?;
    let selector = sig
        .selector()
        .ok_or_else(|| CliError::InvalidInput("signature has no function name".to_string()))?;
    let selector = format!("0x{}", hex::encode(selector));

    let returns: Vec<Value> = sig
        .returns
        .iter()
        .map(|(name, ty)| json!({"name": name, "type": ty.to_string()}))
        .collect();

    let mut output = Output::new(json)
        .field("signature", &sig.canonical())
        .field("selector", &selector)
        .field_value("returns", Value::Array(returns))
        .line(sig.canonical())
        .line(format!("selector = {}", selector));
    for (name, ty) in &sig.returns {
        output = output.line(format!("returns {} {}", ty, name));
    }
    output.print();

    Ok(())
}
