//! Signatures from Solidity ABI JSON documents

use serde::Deserialize;

use crate::error::AbiError;
use crate::signature::{parse_signature, FunctionSignature};

#[derive(Debug, Deserialize)]
struct AbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    components: Vec<AbiParam>,
}

impl AbiParam {
    /// Type text with tuple components expanded, e.g. `(uint256,bool)[]`
    fn type_text(&self) -> String {
        match self.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let fields: Vec<String> = self.components.iter().map(AbiParam::type_text).collect();
                format!("({}){}", fields.join(","), suffix)
            }
            None => self.kind.clone(),
        }
    }
}

fn default_item_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
struct AbiItem {
    #[serde(rename = "type", default = "default_item_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
}

/// A bare ABI array or a compiler artifact carrying an `abi` field
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AbiDocument {
    Items(Vec<AbiItem>),
    Artifact { abi: Vec<AbiItem> },
}

impl AbiDocument {
    fn into_items(self) -> Vec<AbiItem> {
        match self {
            AbiDocument::Items(items) => items,
            AbiDocument::Artifact { abi } => abi,
        }
    }
}

/// Build signature text for `function` from an ABI JSON document.
///
/// `constructor` selects the constructor entry, whose signature is the bare
/// parameter list. Named outputs keep their names in the `returns` clause.
pub fn signature_from_abi_json(abi: &str, function: &str) -> Result<String, AbiError> {
    if abi.trim().is_empty() {
        return Err(AbiError::AbiJson("document is empty".to_string()));
    }
    let items = serde_json::from_str::<AbiDocument>(abi)?.into_items();
    if items.is_empty() {
        return Err(AbiError::AbiJson("document has no entries".to_string()));
    }

    let item = items
        .iter()
        .find(|item| match function {
            "constructor" => item.kind == "constructor",
            name => item.kind == "function" && item.name == name,
        })
        .ok_or_else(|| AbiError::FunctionNotFound(function.to_string()))?;

    let name = if item.kind == "constructor" { "" } else { item.name.as_str() };
    let inputs: Vec<String> = item.inputs.iter().map(AbiParam::type_text).collect();
    let mut signature = format!("{}({})", name, inputs.join(","));

    if !item.outputs.is_empty() {
        let outputs: Vec<String> = item
            .outputs
            .iter()
            .map(|output| {
                if output.name.is_empty() {
                    output.type_text()
                } else {
                    format!("{} {}", output.type_text(), output.name)
                }
            })
            .collect();
        signature.push_str(&format!(" returns ({})", outputs.join(", ")));
    }

    tracing::debug!(function, %signature, "resolved signature from ABI JSON");
    Ok(signature)
}

impl FunctionSignature {
    /// Look up `function` in an ABI JSON document and parse its signature
    pub fn from_abi_json(abi: &str, function: &str) -> Result<Self, AbiError> {
        parse_signature(&signature_from_abi_json(abi, function)?)
    }
}
