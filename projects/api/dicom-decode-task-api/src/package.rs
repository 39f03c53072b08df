//! Assembly of the outgoing task result.

use crate::validate::Diagnostic;
use dicom_decode_task_common::{ImageFrame, ImageFrameInfo, SampleBuffer};
use serde::Serialize;
use std::ops::Range;

/// How the decoded samples reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Handoff {
    /// Sole ownership of the allocation moved to the caller; nothing was copied
    /// and the worker keeps no handle to it.
    Moved,
}

/// Decoded samples whose ownership has been transferred out of the worker.
///
/// Deliberately neither [`Clone`] nor shareable: the only ways to reach the
/// bytes are borrowing from, or consuming, the one owner.
#[derive(Debug, PartialEq, Eq)]
pub struct TransferredBuffer(SampleBuffer);

impl TransferredBuffer {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Address range of the allocation, for identity comparisons.
    #[inline]
    pub fn address_range(&self) -> Range<usize> {
        self.0.address_range()
    }

    #[inline]
    pub fn into_inner(self) -> SampleBuffer {
        self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

/// The message a completed task hands back to its caller.
#[derive(Debug)]
pub struct TaskResult {
    /// Frame descriptor with the intensity range per validator policy.
    pub image_frame: ImageFrameInfo,
    /// Decoded samples.
    pub pixel_data: TransferredBuffer,
    /// Non-fatal findings from validation.
    pub diagnostics: Vec<Diagnostic>,
}

impl TaskResult {
    /// How [`TaskResult::pixel_data`] was handed over.
    #[inline]
    pub fn handoff(&self) -> Handoff {
        Handoff::Moved
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[inline]
    pub fn into_parts(self) -> (ImageFrameInfo, TransferredBuffer, Vec<Diagnostic>) {
        (self.image_frame, self.pixel_data, self.diagnostics)
    }
}

/// Builds [`TaskResult`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultPackager;

impl ResultPackager {
    /// Packages a decoded frame.
    ///
    /// Takes `frame` by value: after this returns the worker holds nothing of
    /// the decoded samples, which now belong to the returned result.
    pub fn package(frame: ImageFrame) -> TaskResult {
        let (image_frame, pixel_data) = frame.into_parts();
        TaskResult {
            image_frame,
            pixel_data: TransferredBuffer(pixel_data),
            diagnostics: Vec::new(),
        }
    }
}
