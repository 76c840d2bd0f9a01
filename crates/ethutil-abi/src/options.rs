//! Diagnostic switches for the call entry points

use serde::{Deserialize, Serialize};

/// Extra diagnostic output emitted while encoding or decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOptions {
    /// Log the full call data after encoding
    #[serde(default)]
    pub show_input_data: bool,
    /// Log the raw bytes before decoding
    #[serde(default)]
    pub show_raw_output: bool,
}
