/// Options for a single codec engine: its entry in the worker's `codecOptions`.
///
/// Engines interpret the value themselves; an engine without an entry receives
/// [`serde_json::Value::Null`].
pub type CodecOptions = serde_json::Value;

/// Per-task decode options sent with each request, passed through untouched.
pub type DecodeOptions = serde_json::Map<String, serde_json::Value>;
