use crate::error::{InitError, MalformedPixelDataError};
use crate::options::{CodecOptions, DecodeOptions};
use dicom_decode_task_common::{ImageFrameInfo, SampleBuffer};
use std::borrow::Cow;

/// Everything an engine needs to decode one frame.
///
/// Engines that declare [`CodecEngine::reuses_input_buffer`] get the
/// compressed bytes by value ([`Cow::Owned`]) and may decode into them. All
/// other engines borrow them ([`Cow::Borrowed`]); the caller keeps them alive
/// until `decode` returns, so the output is always a separate allocation.
#[derive(Debug)]
pub struct EngineInput<'a> {
    /// Transfer syntax the frame is encoded with.
    pub transfer_syntax: &'a str,
    /// Compressed (or, for native syntaxes, raw) pixel data of one frame.
    pub compressed: Cow<'a, [u8]>,
    /// Descriptor of the frame being decoded.
    pub frame: &'a ImageFrameInfo,
    /// Per-task decode options, passed through from the host untouched.
    pub options: &'a DecodeOptions,
}

/// An external component implementing a pixel data compression scheme.
///
/// Engines are created by the worker's engine catalog when the codec bundle is
/// linked, initialized at most once, and then shared by every task the worker
/// runs. They must therefore be [`Send`] and [`Sync`]; engines with mutable
/// state after initialization use interior mutability.
///
/// # Buffer Ownership
///
/// [`CodecEngine::decode`] only owns the input allocation when
/// [`CodecEngine::reuses_input_buffer`] returns `true`; such an engine may
/// decode in place and return it. Every other engine borrows the input and
/// returns a buffer of its own.
pub trait CodecEngine: Send + Sync {
    /// Name the engine is listed under in codec bundles and `codecOptions`.
    fn name(&self) -> &str;

    /// Transfer syntaxes this engine can decode.
    fn transfer_syntaxes(&self) -> &[&'static str];

    /// Prepares the engine for decoding.
    ///
    /// Called at most once per worker, either at startup or right before the
    /// first decode routed to this engine. `options` is this engine's entry in
    /// `codecOptions`, or [`serde_json::Value::Null`] if there is none.
    fn initialize(&self, options: &CodecOptions) -> Result<(), InitError> {
        let _ = options;
        Ok(())
    }

    /// Decodes one frame into little-endian samples.
    ///
    /// On success the returned buffer must hold exactly
    /// `input.frame.expected_len()` bytes.
    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError>;

    /// Whether [`CodecEngine::decode`] receives the input allocation by value
    /// and may return it.
    fn reuses_input_buffer(&self) -> bool {
        false
    }
}

/// Blanket implementation of [`CodecEngine`] for any boxed variant of it.
impl<T: CodecEngine + ?Sized> CodecEngine for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        (**self).transfer_syntaxes()
    }

    fn initialize(&self, options: &CodecOptions) -> Result<(), InitError> {
        (**self).initialize(options)
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        (**self).decode(input)
    }

    fn reuses_input_buffer(&self) -> bool {
        (**self).reuses_input_buffer()
    }
}
