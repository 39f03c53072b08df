//! The engines a worker is able to link.

use dicom_decode_task_api_common::CodecEngine;
use std::collections::BTreeMap;
use std::fmt;

type EngineFactory = Box<dyn Fn() -> Box<dyn CodecEngine> + Send + Sync>;

/// Compiled-in codec engine factories, keyed by the name codec bundles use.
///
/// Loading a bundle resolves each listed name here and instantiates the
/// engine. Adding a codec means adding an entry; the dispatcher never changes.
///
/// ```
/// use dicom_decode_task_api::EngineCatalog;
/// use dicom_decode_task_raw::RawDecoder;
/// use dicom_decode_task_rle::RleDecoder;
///
/// let catalog = EngineCatalog::new()
///     .with_engine(RawDecoder::NAME, RawDecoder::new)
///     .with_engine(RleDecoder::NAME, RleDecoder::new);
///
/// assert!(catalog.contains("rle"));
/// ```
#[derive(Default)]
pub struct EngineCatalog {
    factories: BTreeMap<String, EngineFactory>,
}

impl EngineCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the factory for engine `name`.
    pub fn with_engine<F, E>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: CodecEngine + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Adds (or replaces) the factory for engine `name`.
    pub fn register<F, E>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> E + Send + Sync + 'static,
        E: CodecEngine + 'static,
    {
        self.factories.insert(
            name.into(),
            Box::new(move || Box::new(factory()) as Box<dyn CodecEngine>),
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Names of all engines in the catalog, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Creates a new instance of engine `name`.
    pub(crate) fn instantiate(&self, name: &str) -> Option<Box<dyn CodecEngine>> {
        self.factories.get(name).map(|factory| factory())
    }
}

impl fmt::Debug for EngineCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
