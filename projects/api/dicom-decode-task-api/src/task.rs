//! The decode task handler.

use crate::catalog::EngineCatalog;
use crate::config::TaskConfig;
use crate::dispatch::DecodeDispatcher;
use crate::error::{CodecLoadResult, ConfigurationError, TaskError, TaskErrorKind};
use crate::loader::CodecLoader;
use crate::package::{ResultPackager, TaskResult};
use crate::registry::{CodecRegistry, CodecState};
use crate::validate::MinMaxValidator;
use dicom_decode_task_api_common::DecodeOptions;
use dicom_decode_task_common::ImageFrameInfo;
use std::fmt;
use std::sync::OnceLock;

/// Result of running one task.
pub type TaskOutcome = Result<TaskResult, TaskError>;

/// Progress of a single decode task.
///
/// `Idle → CodecsEnsured → Decoding → Validating → Packaging → Done`, or
/// `Error` from any non-terminal state. Transitions only move forward and no
/// stage is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskState {
    Idle,
    CodecsEnsured,
    Decoding,
    Validating,
    Packaging,
    Done,
    Error,
}

impl TaskState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Error)
    }

    /// Whether a task in this state may move to `next`.
    pub fn can_advance_to(self, next: TaskState) -> bool {
        use TaskState::*;
        match (self, next) {
            (Done | Error, _) => false,
            (_, Error) => true,
            (Idle, CodecsEnsured)
            | (CodecsEnsured, Decoding)
            | (Decoding, Validating)
            | (Validating, Packaging)
            | (Packaging, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskState::Idle => "idle",
            TaskState::CodecsEnsured => "codecs ensured",
            TaskState::Decoding => "decoding",
            TaskState::Validating => "validating",
            TaskState::Packaging => "packaging",
            TaskState::Done => "done",
            TaskState::Error => "error",
        })
    }
}

/// One frame to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeRequest {
    pub image_frame: ImageFrameInfo,
    pub transfer_syntax: String,
    /// Compressed pixel data. Consumed by the decode.
    pub pixel_data: Vec<u8>,
    /// Per-task options, passed to the engine untouched.
    pub options: DecodeOptions,
}

impl DecodeRequest {
    pub fn new(
        image_frame: ImageFrameInfo,
        transfer_syntax: impl Into<String>,
        pixel_data: Vec<u8>,
    ) -> Self {
        Self {
            image_frame,
            transfer_syntax: transfer_syntax.into(),
            pixel_data,
            options: DecodeOptions::new(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }
}

struct TaskProgress {
    state: TaskState,
}

impl TaskProgress {
    fn new() -> Self {
        Self {
            state: TaskState::Idle,
        }
    }

    fn advance(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "{} -> {}",
            self.state,
            next
        );
        log::trace!("Decode task {} -> {}", self.state, next);
        self.state = next;
    }

    /// Ends the task, recording the state it failed in.
    fn fail(&mut self, kind: impl Into<TaskErrorKind>) -> TaskError {
        let stage = self.state;
        self.state = TaskState::Error;
        let error = TaskError::new(stage, kind.into());
        log::debug!("{error}");
        error
    }
}

/// A decode worker: one configuration, one codec registry, many tasks.
///
/// ```no_run
/// use dicom_decode_task_api::{DecodeRequest, DecodeWorker, EngineCatalog, TaskConfig};
/// use dicom_decode_task_common::{ImageFrameInfo, PixelRepresentation};
/// use dicom_decode_task_raw::RawDecoder;
///
/// let worker = DecodeWorker::new(EngineCatalog::new().with_engine(RawDecoder::NAME, RawDecoder::new));
/// worker.initialize(TaskConfig::new("/opt/codecs/bundle.json"))?;
///
/// let frame = ImageFrameInfo::new(512, 512, 16, 1, PixelRepresentation::Signed);
/// let request = DecodeRequest::new(frame, "1.2.840.10008.1.2.1", vec![0; 512 * 512 * 2]);
/// let result = worker.handle(request)?;
/// println!("{:?}", result.image_frame);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DecodeWorker {
    config: OnceLock<TaskConfig>,
    registry: CodecRegistry,
    catalog: EngineCatalog,
}

impl DecodeWorker {
    /// Creates an uninitialized worker that can link the engines in `catalog`.
    pub fn new(catalog: EngineCatalog) -> Self {
        Self {
            config: OnceLock::new(),
            registry: CodecRegistry::new(),
            catalog,
        }
    }

    /// Stores the worker's configuration and, if it asks for it, loads codecs.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid or the worker was already initialized.
    /// A failed startup load keeps the configuration; codecs are then loaded
    /// again by the next task.
    pub fn initialize(&self, config: TaskConfig) -> CodecLoadResult<()> {
        config.validate()?;
        self.config
            .set(config)
            .map_err(|_| ConfigurationError::AlreadyInitialized)?;

        let config = self.config()?;
        log::debug!("Decode worker initialized, strict = {}", config.strict);
        if config.load_codecs_on_startup {
            self.loader().ensure_loaded(config)?;
        }

        Ok(())
    }

    /// The configuration given to [`DecodeWorker::initialize`].
    pub fn config(&self) -> Result<&TaskConfig, ConfigurationError> {
        self.config.get().ok_or(ConfigurationError::NotInitialized)
    }

    #[inline]
    pub fn codec_state(&self) -> CodecState {
        self.registry.state()
    }

    #[inline]
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Loads the codec bundle unless it already is.
    pub fn ensure_loaded(&self) -> CodecLoadResult<()> {
        self.loader().ensure_loaded(self.config()?)
    }

    /// Runs one decode task to completion.
    ///
    /// # Errors
    ///
    /// Any failure ends the task. The error records the state the task was in
    /// and no partial frame is returned.
    pub fn handle(&self, request: DecodeRequest) -> TaskOutcome {
        let mut progress = TaskProgress::new();

        let config = self.config().map_err(|e| progress.fail(e))?;
        self.loader()
            .ensure_loaded(config)
            .map_err(|e| progress.fail(e))?;
        progress.advance(TaskState::CodecsEnsured);

        progress.advance(TaskState::Decoding);
        let DecodeRequest {
            image_frame,
            transfer_syntax,
            pixel_data,
            options,
        } = request;
        let mut frame = DecodeDispatcher::new(&self.registry)
            .decode(image_frame, &transfer_syntax, pixel_data, &options)
            .map_err(|e| progress.fail(e))?;

        progress.advance(TaskState::Validating);
        let diagnostics = MinMaxValidator::from_strict(config.strict).apply(&mut frame);

        progress.advance(TaskState::Packaging);
        let result = ResultPackager::package(frame).with_diagnostics(diagnostics);

        progress.advance(TaskState::Done);
        Ok(result)
    }

    fn loader(&self) -> CodecLoader<'_> {
        CodecLoader::new(&self.registry, &self.catalog)
    }
}
