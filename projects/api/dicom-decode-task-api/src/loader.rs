//! Loading and linking of the codec bundle.

use crate::catalog::EngineCatalog;
use crate::config::TaskConfig;
use crate::error::{CodecLoadError, CodecLoadResult};
use crate::registry::{CodecRegistry, CodecState, EngineSlot, LinkedCodecs};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest of a codec bundle.
///
/// ```json
/// { "codecs": ["raw", "rle"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecBundle {
    /// Names of the engines in the bundle, in link order.
    pub codecs: Vec<String>,
}

impl CodecBundle {
    /// Fetches and parses the manifest at `path`.
    pub fn read(path: &Path) -> CodecLoadResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| CodecLoadError::Fetch {
            path: path.to_path_buf(),
            source,
        })?;

        let bundle: CodecBundle =
            serde_json::from_slice(&bytes).map_err(|source| CodecLoadError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        if bundle.codecs.is_empty() {
            return Err(CodecLoadError::EmptyBundle {
                path: path.to_path_buf(),
            });
        }

        Ok(bundle)
    }
}

/// Brings a worker's registry to at least [`CodecState::Loaded`].
#[derive(Debug, Clone, Copy)]
pub struct CodecLoader<'a> {
    registry: &'a CodecRegistry,
    catalog: &'a EngineCatalog,
}

impl<'a> CodecLoader<'a> {
    pub fn new(registry: &'a CodecRegistry, catalog: &'a EngineCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Loads, links and (if configured) initializes the codec bundle.
    ///
    /// Returns immediately if the bundle is already loaded. The registry lock
    /// is held for the whole load, so concurrent callers on one worker wait for
    /// the first and then observe its result; the bundle is fetched at most
    /// once per successful load.
    ///
    /// # Errors
    ///
    /// On any failure before linking completes, the registry stays
    /// [`CodecState::Unloaded`] and the next call tries again. If an engine
    /// fails to initialize on startup, the registry stays
    /// [`CodecState::Loaded`] and the engine is retried on first use.
    pub fn ensure_loaded(&self, config: &TaskConfig) -> CodecLoadResult<()> {
        config.validate()?;

        let mut inner = self.registry.lock();
        if inner.state() >= CodecState::Loaded {
            return Ok(());
        }

        log::info!("Loading codec bundle {}", config.codecs_path.display());
        let bundle = CodecBundle::read(&config.codecs_path)?;
        let codecs = self.link(&bundle, config)?;
        inner.install(codecs);
        log::info!("Linked codec engines: {}", bundle.codecs.join(", "));

        if config.initialize_codecs_on_startup {
            for slot in inner.slots() {
                slot.ensure_initialized()?;
            }
            inner.refresh();
        }

        Ok(())
    }

    fn link(&self, bundle: &CodecBundle, config: &TaskConfig) -> CodecLoadResult<LinkedCodecs> {
        let mut codecs = LinkedCodecs::default();
        for name in &bundle.codecs {
            let engine = self
                .catalog
                .instantiate(name)
                .ok_or_else(|| CodecLoadError::Link { name: name.clone() })?;

            log::debug!(
                "Linking codec engine '{}' for {:?}",
                name,
                engine.transfer_syntaxes()
            );
            let options = config.codec_options_for(name).clone();
            codecs.push(EngineSlot::new(engine, options))?;
        }

        Ok(codecs)
    }
}
