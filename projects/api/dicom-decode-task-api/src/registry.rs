//! Per-worker codec state.

use crate::error::{CodecLoadError, CodecLoadResult};
use dicom_decode_task_api_common::{CodecEngine, CodecOptions};
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Load state of a worker's codec bundle.
///
/// Transitions only move forward, and the last state reached persists for the
/// lifetime of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CodecState {
    /// No bundle has been loaded.
    #[default]
    Unloaded,
    /// The bundle is loaded and linked; engines initialize on first use.
    Loaded,
    /// Every engine in the bundle has been initialized.
    Initialized,
}

/// A linked engine together with its options and initialization flag.
pub struct EngineSlot {
    engine: Box<dyn CodecEngine>,
    options: CodecOptions,
    initialized: Mutex<bool>,
}

impl EngineSlot {
    pub(crate) fn new(engine: Box<dyn CodecEngine>, options: CodecOptions) -> Self {
        Self {
            engine,
            options,
            initialized: Mutex::new(false),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    #[inline]
    pub fn engine(&self) -> &dyn CodecEngine {
        self.engine.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }

    /// Initializes the engine unless that has already succeeded.
    ///
    /// The flag is held locked for the duration of the call, so concurrent
    /// callers wait for the first one rather than initializing twice.
    pub fn ensure_initialized(&self) -> CodecLoadResult<()> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }

        self.engine
            .initialize(&self.options)
            .map_err(|source| CodecLoadError::Initialize {
                name: self.name().to_owned(),
                source,
            })?;

        *initialized = true;
        log::debug!("Initialized codec engine '{}'", self.name());
        Ok(())
    }
}

impl fmt::Debug for EngineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSlot")
            .field("name", &self.name())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// The engines of a linked bundle, indexed by transfer syntax.
#[derive(Debug, Default)]
pub(crate) struct LinkedCodecs {
    slots: Vec<Arc<EngineSlot>>,
    by_syntax: HashMap<&'static str, usize>,
}

impl LinkedCodecs {
    /// Adds an engine, claiming its transfer syntaxes.
    pub(crate) fn push(&mut self, slot: EngineSlot) -> CodecLoadResult<()> {
        let index = self.slots.len();
        for &syntax in slot.engine().transfer_syntaxes() {
            if let Some(&existing) = self.by_syntax.get(syntax) {
                return Err(CodecLoadError::DuplicateTransferSyntax {
                    syntax: syntax.to_owned(),
                    first: self.slots[existing].name().to_owned(),
                    second: slot.name().to_owned(),
                });
            }
            self.by_syntax.insert(syntax, index);
        }

        self.slots.push(Arc::new(slot));
        Ok(())
    }

    pub(crate) fn slots(&self) -> &[Arc<EngineSlot>] {
        &self.slots
    }

    fn all_initialized(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_initialized())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RegistryInner {
    state: CodecState,
    codecs: LinkedCodecs,
}

impl RegistryInner {
    #[inline]
    pub(crate) fn state(&self) -> CodecState {
        self.state
    }

    pub(crate) fn slots(&self) -> &[Arc<EngineSlot>] {
        self.codecs.slots()
    }

    /// Moves to `next` if it is ahead of the current state.
    fn advance(&mut self, next: CodecState) {
        if next > self.state {
            log::trace!("Codec registry {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Installs a freshly linked bundle.
    pub(crate) fn install(&mut self, codecs: LinkedCodecs) {
        self.codecs = codecs;
        self.advance(CodecState::Loaded);
        self.refresh();
    }

    /// Advances to [`CodecState::Initialized`] once every engine is.
    pub(crate) fn refresh(&mut self) {
        if self.state == CodecState::Loaded && self.codecs.all_initialized() {
            self.advance(CodecState::Initialized);
        }
    }
}

/// Codec engines and load state owned by one worker.
///
/// Exactly one registry exists per worker; independent workers share nothing.
/// All access goes through a mutex, which is also what makes loading happen
/// exactly once when several tasks race to be first.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    inner: Mutex<RegistryInner>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CodecState {
        self.inner.lock().state()
    }

    /// Engine registered for `transfer_syntax`, if any.
    pub fn lookup(&self, transfer_syntax: &str) -> Option<Arc<EngineSlot>> {
        let inner = self.inner.lock();
        inner
            .codecs
            .by_syntax
            .get(transfer_syntax)
            .map(|&index| Arc::clone(&inner.codecs.slots[index]))
    }

    /// Names of the linked engines, in bundle order.
    pub fn engine_names(&self) -> Vec<String> {
        let inner = self.inner.lock();
        inner
            .codecs
            .slots
            .iter()
            .map(|slot| slot.name().to_owned())
            .collect()
    }

    /// Transfer syntaxes the linked engines can decode, sorted.
    pub fn supported_transfer_syntaxes(&self) -> Vec<&'static str> {
        let inner = self.inner.lock();
        let mut syntaxes: Vec<_> = inner.codecs.by_syntax.keys().copied().collect();
        syntaxes.sort_unstable();
        syntaxes
    }

    /// Re-evaluates the state after an engine initialized on first use.
    pub(crate) fn refresh(&self) {
        self.inner.lock().refresh();
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn slot(name: &'static str, syntaxes: &'static [&'static str]) -> EngineSlot {
        EngineSlot::new(
            Box::new(IdentityEngine::new(name, syntaxes)),
            CodecOptions::Null,
        )
    }

    #[test]
    fn starts_unloaded_and_empty() {
        let registry = CodecRegistry::new();
        assert_eq!(registry.state(), CodecState::Unloaded);
        assert!(registry.lookup(IDENTITY_SYNTAX).is_none());
        assert!(registry.engine_names().is_empty());
    }

    #[test]
    fn install_indexes_by_transfer_syntax() {
        let registry = CodecRegistry::new();
        let mut codecs = LinkedCodecs::default();
        codecs.push(slot("a", &["1.1", "1.2"])).unwrap();
        codecs.push(slot("b", &["2.1"])).unwrap();
        registry.lock().install(codecs);

        assert_eq!(registry.state(), CodecState::Loaded);
        assert_eq!(registry.lookup("1.2").unwrap().name(), "a");
        assert_eq!(registry.lookup("2.1").unwrap().name(), "b");
        assert!(registry.lookup("9.9.9.9").is_none());
        assert_eq!(registry.engine_names(), vec!["a", "b"]);
        assert_eq!(registry.supported_transfer_syntaxes(), vec!["1.1", "1.2", "2.1"]);
    }

    #[test]
    fn duplicate_transfer_syntax_is_rejected() {
        let mut codecs = LinkedCodecs::default();
        codecs.push(slot("a", &["1.1"])).unwrap();
        let result = codecs.push(slot("b", &["3.3", "1.1"]));

        match result {
            Err(CodecLoadError::DuplicateTransferSyntax {
                syntax,
                first,
                second,
            }) => {
                assert_eq!(syntax, "1.1");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("Expected duplicate syntax error, got {other:?}"),
        }
    }

    #[test]
    fn becomes_initialized_once_every_engine_is() {
        let registry = CodecRegistry::new();
        let mut codecs = LinkedCodecs::default();
        codecs.push(slot("a", &["1.1"])).unwrap();
        codecs.push(slot("b", &["2.1"])).unwrap();
        registry.lock().install(codecs);

        registry.lookup("1.1").unwrap().ensure_initialized().unwrap();
        registry.refresh();
        assert_eq!(registry.state(), CodecState::Loaded);

        registry.lookup("2.1").unwrap().ensure_initialized().unwrap();
        registry.refresh();
        assert_eq!(registry.state(), CodecState::Initialized);
    }

    #[test]
    fn state_never_moves_backwards() {
        let mut inner = RegistryInner::default();
        inner.advance(CodecState::Initialized);
        inner.advance(CodecState::Loaded);
        assert_eq!(inner.state(), CodecState::Initialized);
    }

    #[test]
    fn slot_initializes_once() {
        let counters = EngineCounters::default();
        let slot = EngineSlot::new(Box::new(counters.factory("counting")()), CodecOptions::Null);

        slot.ensure_initialized().unwrap();
        slot.ensure_initialized().unwrap();
        assert!(slot.is_initialized());
        assert_eq!(counters.initialized(), 1);
    }

    #[test]
    fn failed_initialization_is_reported_with_engine_name() {
        let slot = EngineSlot::new(Box::new(FailingInitEngine), CodecOptions::Null);
        let result = slot.ensure_initialized();

        assert!(matches!(
            result,
            Err(CodecLoadError::Initialize { ref name, .. }) if name == FailingInitEngine::NAME
        ));
        assert!(!slot.is_initialized());
    }
}
