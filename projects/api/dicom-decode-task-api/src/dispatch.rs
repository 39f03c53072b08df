//! Routing of compressed frames to codec engines.

use crate::error::{DecodeError, DecodeResult, UnsupportedTransferSyntaxError};
use crate::registry::CodecRegistry;
use dicom_decode_task_api_common::transfer_syntax::normalize;
use dicom_decode_task_api_common::{DecodeOptions, EngineInput};
use dicom_decode_task_common::{ImageFrame, ImageFrameInfo};
use std::borrow::Cow;

/// Selects the engine for a transfer syntax and runs it.
///
/// The dispatcher does not know any codec: everything it routes to comes from
/// the worker's [`CodecRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct DecodeDispatcher<'a> {
    registry: &'a CodecRegistry,
}

impl<'a> DecodeDispatcher<'a> {
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self { registry }
    }

    /// Decodes one frame.
    ///
    /// `compressed` is consumed. Only an engine that declares in-place
    /// decoding receives it by value and may return it as the output; any
    /// other engine borrows it, and it is freed once the engine has returned.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedTransferSyntax`] if no engine is registered
    ///   for `transfer_syntax`. No engine is invoked.
    /// - [`DecodeError::InvalidFrame`] if `frame` does not describe a decodable frame.
    /// - [`DecodeError::CodecLoad`] if the engine fails to initialize on first use.
    /// - [`DecodeError::MalformedPixelData`] if the engine rejects the data.
    /// - [`DecodeError::SampleLengthMismatch`] if the engine returns the wrong
    ///   number of bytes.
    pub fn decode(
        &self,
        frame: ImageFrameInfo,
        transfer_syntax: &str,
        compressed: Vec<u8>,
        options: &DecodeOptions,
    ) -> DecodeResult<ImageFrame> {
        let transfer_syntax = normalize(transfer_syntax);
        let slot = self.registry.lookup(transfer_syntax).ok_or_else(|| {
            UnsupportedTransferSyntaxError {
                transfer_syntax: transfer_syntax.to_owned(),
            }
        })?;

        frame.validate()?;
        let expected = frame.expected_len()?;

        if !slot.is_initialized() {
            slot.ensure_initialized()?;
            self.registry.refresh();
        }

        let engine = slot.engine();
        log::trace!(
            "Dispatching {} bytes of {} to '{}'",
            compressed.len(),
            transfer_syntax,
            engine.name()
        );

        let input = if engine.reuses_input_buffer() {
            Cow::Owned(compressed)
        } else {
            Cow::Borrowed(compressed.as_slice())
        };
        let pixel_data = engine.decode(EngineInput {
            transfer_syntax,
            compressed: input,
            frame: &frame,
            options,
        })?;

        if pixel_data.len() != expected {
            return Err(DecodeError::SampleLengthMismatch {
                engine: engine.name().to_owned(),
                expected,
                actual: pixel_data.len(),
            });
        }

        Ok(ImageFrame::new(frame, pixel_data)?)
    }
}
