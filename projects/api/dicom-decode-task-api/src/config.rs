//! Worker configuration, sent by the host once before the first task.

use crate::error::ConfigurationError;
use dicom_decode_task_api_common::CodecOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

static NO_CODEC_OPTIONS: CodecOptions = CodecOptions::Null;

/// Configuration of a decode worker.
///
/// Field names follow the host's initialization payload, e.g.
///
/// ```json
/// {
///   "codecsPath": "/opt/codecs/bundle.json",
///   "loadCodecsOnStartup": true,
///   "initializeCodecsOnStartup": true,
///   "strict": false,
///   "codecOptions": { "rle": { "strictSegmentCount": true } }
/// }
/// ```
///
/// Immutable once handed to [`crate::DecodeWorker::initialize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    /// Location of the codec bundle manifest.
    pub codecs_path: PathBuf,

    /// Load the codec bundle during initialization rather than on the first task.
    #[serde(default)]
    pub load_codecs_on_startup: bool,

    /// Initialize every engine as soon as the bundle is loaded, rather than
    /// each engine on its first use.
    #[serde(default)]
    pub initialize_codecs_on_startup: bool,

    /// Report declared-vs-actual intensity range mismatches instead of correcting them.
    #[serde(default)]
    pub strict: bool,

    /// Options per codec engine, keyed by engine name.
    #[serde(default)]
    pub codec_options: BTreeMap<String, CodecOptions>,
}

impl TaskConfig {
    /// Creates a configuration that loads codecs lazily and corrects intensity ranges.
    pub fn new(codecs_path: impl Into<PathBuf>) -> Self {
        Self {
            codecs_path: codecs_path.into(),
            load_codecs_on_startup: false,
            initialize_codecs_on_startup: false,
            strict: false,
            codec_options: BTreeMap::new(),
        }
    }

    pub fn with_load_codecs_on_startup(mut self, value: bool) -> Self {
        self.load_codecs_on_startup = value;
        self
    }

    pub fn with_initialize_codecs_on_startup(mut self, value: bool) -> Self {
        self.initialize_codecs_on_startup = value;
        self
    }

    pub fn with_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    pub fn with_codec_options(mut self, codec: impl Into<String>, options: CodecOptions) -> Self {
        self.codec_options.insert(codec.into(), options);
        self
    }

    /// Parses the host's JSON initialization payload.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses the host's JSON initialization payload.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigurationError> {
        let json = std::fs::read(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_slice(&json)
    }

    /// Options for engine `codec`, or `null` if it has none.
    pub fn codec_options_for(&self, codec: &str) -> &CodecOptions {
        self.codec_options.get(codec).unwrap_or(&NO_CODEC_OPTIONS)
    }

    /// Checks the configuration can be used to load codecs.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.codecs_path.as_os_str().is_empty() {
            return Err(ConfigurationError::MissingCodecsPath);
        }

        Ok(())
    }
}
