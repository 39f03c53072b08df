//! Test utilities and mock engines for decode task testing.
#![allow(unused_imports)]

use dicom_decode_task_api_common::{
    CodecEngine, CodecOptions, EngineInput, InitError, MalformedPixelDataError,
};
use dicom_decode_task_common::SampleBuffer;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// External crates commonly used in tests
pub use rstest::rstest;
pub use serde_json::json;
pub use tempfile::tempdir;

/// Transfer syntax every mock engine claims unless told otherwise.
pub const IDENTITY_SYNTAX: &str = "1.2.826.0.1.3680043.9.9999";

/// Writes a codec bundle manifest listing `codecs` to `dir/bundle.json`.
pub fn write_bundle(dir: &Path, codecs: &[&str]) -> PathBuf {
    let path = dir.join("bundle.json");
    let manifest = json!({ "codecs": codecs });
    std::fs::write(&path, manifest.to_string()).unwrap();
    path
}

/// Copies the input into a fresh allocation.
fn copy_input(input: EngineInput<'_>) -> SampleBuffer {
    SampleBuffer::from_vec(input.compressed.to_vec())
}

/// Shared counters for the engines made by [`EngineCounters::factory`].
#[derive(Debug, Clone, Default)]
pub struct EngineCounters {
    created: Arc<AtomicUsize>,
    initialized: Arc<AtomicUsize>,
    decoded: Arc<AtomicUsize>,
    last_options: Arc<Mutex<Option<CodecOptions>>>,
}

impl EngineCounters {
    /// A catalog factory producing [`CountingEngine`]s named `name`.
    pub fn factory(&self, name: &'static str) -> impl Fn() -> CountingEngine + Send + Sync + 'static {
        let counters = self.clone();
        move || {
            counters.created.fetch_add(1, Ordering::SeqCst);
            CountingEngine {
                name,
                counters: counters.clone(),
            }
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn decoded(&self) -> usize {
        self.decoded.load(Ordering::SeqCst)
    }

    /// Options passed to the most recent `initialize`.
    pub fn last_options(&self) -> Option<CodecOptions> {
        self.last_options.lock().clone()
    }
}

/// Copies input to output, recording every call in its [`EngineCounters`].
#[derive(Debug)]
pub struct CountingEngine {
    name: &'static str,
    counters: EngineCounters,
}

impl CodecEngine for CountingEngine {
    fn name(&self) -> &str {
        self.name
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[IDENTITY_SYNTAX]
    }

    fn initialize(&self, options: &CodecOptions) -> Result<(), InitError> {
        self.counters.initialized.fetch_add(1, Ordering::SeqCst);
        *self.counters.last_options.lock() = Some(options.clone());
        Ok(())
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        self.counters.decoded.fetch_add(1, Ordering::SeqCst);
        Ok(copy_input(input))
    }
}

/// Copies input to output for a fixed set of transfer syntaxes.
#[derive(Debug, Clone, Copy)]
pub struct IdentityEngine {
    name: &'static str,
    syntaxes: &'static [&'static str],
}

impl IdentityEngine {
    pub fn new(name: &'static str, syntaxes: &'static [&'static str]) -> Self {
        Self { name, syntaxes }
    }
}

impl CodecEngine for IdentityEngine {
    fn name(&self) -> &str {
        self.name
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        self.syntaxes
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        Ok(copy_input(input))
    }
}

/// Never initializes successfully.
#[derive(Debug, Clone, Copy)]
pub struct FailingInitEngine;

impl FailingInitEngine {
    pub const NAME: &'static str = "failing-init";
}

impl CodecEngine for FailingInitEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[IDENTITY_SYNTAX]
    }

    fn initialize(&self, _options: &CodecOptions) -> Result<(), InitError> {
        Err(InitError::Unavailable {
            reason: "backend missing".into(),
        })
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        Ok(copy_input(input))
    }
}

/// Returns one byte more than it was given.
#[derive(Debug, Clone, Copy)]
pub struct WrongLengthEngine;

impl WrongLengthEngine {
    pub const NAME: &'static str = "wrong-length";
}

impl CodecEngine for WrongLengthEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[IDENTITY_SYNTAX]
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        Ok(SampleBuffer::zeroed(input.compressed.len() + 1))
    }
}

/// Takes ownership of its input, frees it, then allocates the output.
#[derive(Debug, Clone, Copy)]
pub struct FreeThenAllocEngine;

impl FreeThenAllocEngine {
    pub const NAME: &'static str = "free-then-alloc";
}

/// Reads the first byte and length of `bytes`, dropping them.
fn first_and_len(bytes: Vec<u8>) -> (u8, usize) {
    (bytes.first().copied().unwrap_or(0), bytes.len())
}

impl CodecEngine for FreeThenAllocEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[IDENTITY_SYNTAX]
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        let (value, len) = first_and_len(input.compressed.into_owned());
        Ok(SampleBuffer::from_vec(vec![value; len]))
    }
}

/// Returns its input as the output, taking it over when it is handed over by value.
#[derive(Debug, Clone, Copy)]
pub struct InPlaceEngine {
    reuses: bool,
}

impl InPlaceEngine {
    pub fn new(reuses: bool) -> Self {
        Self { reuses }
    }
}

impl CodecEngine for InPlaceEngine {
    fn name(&self) -> &str {
        "in-place"
    }

    fn transfer_syntaxes(&self) -> &[&'static str] {
        &[IDENTITY_SYNTAX]
    }

    fn decode(&self, input: EngineInput<'_>) -> Result<SampleBuffer, MalformedPixelDataError> {
        Ok(SampleBuffer::from_vec(input.compressed.into_owned()))
    }

    fn reuses_input_buffer(&self) -> bool {
        self.reuses
    }
}
