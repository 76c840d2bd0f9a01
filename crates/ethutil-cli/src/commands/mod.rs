//! Subcommand implementations

pub mod decode;
pub mod encode;
pub mod keccak;
pub mod sig;

use std::path::Path;

use ethutil_abi::{extract_function_name, parse_signature, signature_from_abi_json, FunctionSignature};

use crate::CliError;

/// Read a whole file, keeping the path in the error
pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `signature`, looking the function up in an ABI JSON file when one is given.
///
/// With an ABI file only the function name is taken from `signature`; an
/// empty name selects the constructor.
pub(crate) fn resolve_signature(
    signature: &str,
    abi_file: Option<&Path>,
) -> Result<FunctionSignature, CliError> {
    let Some(abi_file) = abi_file else {
        return Ok(parse_signature(signature)?);
    };
    let abi = read_file(abi_file)?;
    let name = match extract_function_name(signature) {
        "" => "constructor",
        name => name,
    };
    let text = signature_from_abi_json(&abi, name)?;
    tracing::debug!(name, signature = %text, abi_file = %abi_file.display(), "signature from ABI file");
    Ok(parse_signature(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethutil_abi::{AbiError, ParamType};
    use std::io::Write;

    const ABI: &str = r#"[
        {"type":"constructor","inputs":[{"name":"owner","type":"address"}]},
        {"type":"function","name":"set","inputs":[{"name":"v","type":"uint8"}],"outputs":[]}
    ]"#;

    fn abi_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ABI.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_plain_signature() {
        let sig = resolve_signature("set(uint8)", None).unwrap();
        assert_eq!(sig.params, vec![ParamType::Uint(8)]);
    }

    #[test]
    fn test_resolve_through_abi_file() {
        let file = abi_file();
        let sig = resolve_signature("function set", Some(file.path())).unwrap();
        assert_eq!(sig.canonical(), "set(uint8)");

        let ctor = resolve_signature("constructor", Some(file.path())).unwrap();
        assert_eq!(ctor.params, vec![ParamType::Address]);
        assert_eq!(ctor.selector(), None);

        let ctor = resolve_signature("", Some(file.path())).unwrap();
        assert_eq!(ctor.params, vec![ParamType::Address]);
    }

    #[test]
    fn test_resolve_errors() {
        let file = abi_file();
        assert!(matches!(
            resolve_signature("missing", Some(file.path())),
            Err(CliError::Abi(AbiError::FunctionNotFound(_)))
        ));
        assert!(matches!(
            resolve_signature("f", Some(Path::new("/nonexistent/abi.json"))),
            Err(CliError::ReadFile { .. })
        ));
    }
}
