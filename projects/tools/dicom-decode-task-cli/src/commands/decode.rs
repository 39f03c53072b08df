use crate::error::CliError;
use crate::util::*;
use argh::FromArgs;
use dicom_decode_task_api::{DecodeRequest, DecodeWorker, EngineCatalog, TaskConfig, TaskResult};
use dicom_decode_task_api_common::DecodeOptions;
use dicom_decode_task_common::ImageFrameInfo;
use dicom_decode_task_raw::RawDecoder;
use dicom_decode_task_rle::RleDecoder;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Decode every task file in the input directory into the output directory
#[argh(subcommand, name = "decode")]
pub struct DecodeCmd {
    /// worker configuration file (JSON)
    #[argh(option, from_str_fn(crate::util::canonicalize_cli_file))]
    pub config: PathBuf,

    /// input directory path
    #[argh(option, from_str_fn(crate::util::canonicalize_cli_path))]
    pub input: PathBuf,

    /// output directory path
    #[argh(option, from_str_fn(crate::util::canonicalize_cli_path))]
    pub output: PathBuf,
}

/// One decode task, as written by the host.
///
/// ```json
/// {
///   "imageFrame": { "rows": 512, "columns": 512, "bitsAllocated": 16, ... },
///   "transferSyntax": "1.2.840.10008.1.2.5",
///   "pixelData": "frame0.rle",
///   "options": {}
/// }
/// ```
///
/// `pixelData` is relative to the task file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFile {
    pub image_frame: ImageFrameInfo,
    pub transfer_syntax: String,
    pub pixel_data: PathBuf,
    #[serde(default)]
    pub options: DecodeOptions,
}

impl TaskFile {
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let json = fs::read(path)?;
        serde_json::from_slice(&json).map_err(|source| CliError::TaskFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn into_request(self, task_dir: &Path) -> Result<DecodeRequest, CliError> {
        let pixel_path = task_dir.join(&self.pixel_data);
        let pixel_data = fs::read(&pixel_path).map_err(|source| CliError::PixelData {
            path: pixel_path,
            source,
        })?;

        Ok(
            DecodeRequest::new(self.image_frame, self.transfer_syntax, pixel_data)
                .with_options(self.options),
        )
    }
}

/// Engines shipped with the CLI.
pub fn default_catalog() -> EngineCatalog {
    EngineCatalog::new()
        .with_engine(RawDecoder::NAME, RawDecoder::new)
        .with_engine(RleDecoder::NAME, RleDecoder::new)
}

/// Reads the worker configuration, resolving `codecsPath` against the file's directory.
pub fn read_config(path: &Path) -> Result<TaskConfig, CliError> {
    let mut config = TaskConfig::from_json_file(path)?;
    config.validate()?;
    if config.codecs_path.is_relative() {
        if let Some(dir) = path.parent() {
            config.codecs_path = dir.join(&config.codecs_path);
        }
    }
    Ok(config)
}

pub fn handle_decode_command(cmd: DecodeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(&cmd.config)?;

    let tasks = find_task_files(&cmd.input)?;
    println!("Found {} task files to decode", tasks.len());

    let start = Instant::now();

    // One worker per rayon split; each loads its own codec registry.
    let bytes: u64 = tasks
        .par_iter()
        .map_init(
            || new_worker(&config),
            |worker, task| {
                handle_process_entry_error(process_task_file(worker, task, &cmd.output))
            },
        )
        .sum();

    let elapsed = start.elapsed();
    println!("=== Decode Summary ===");
    println!("Decoded: {}", bytesize::ByteSize(bytes));
    println!("Time: {elapsed:.2?}");
    println!("Throughput: {}", Throughput::from_elapsed(bytes, elapsed));
    Ok(())
}

fn new_worker(config: &TaskConfig) -> DecodeWorker {
    let worker = DecodeWorker::new(default_catalog());
    if let Err(e) = worker.initialize(config.clone()) {
        // The worker keeps its configuration; each task retries the load.
        log::warn!("Codec bundle failed to load on startup: {e}");
    }
    worker
}

/// Runs one task file, writing `<name>.raw` and `<name>.json` to `output`.
///
/// Returns the number of decoded bytes.
pub fn process_task_file(
    worker: &DecodeWorker,
    task_path: &Path,
    output: &Path,
) -> Result<u64, CliError> {
    let task = TaskFile::read(task_path)?;
    let task_dir = task_path.parent().unwrap_or(Path::new("."));
    let request = task.into_request(task_dir)?;

    let result = worker.handle(request).map_err(|source| CliError::Task {
        path: task_path.to_path_buf(),
        source,
    })?;

    let name = task_path.file_stem().unwrap_or(task_path.as_os_str());
    write_result(result, &output.join(name))
}

fn write_result(result: TaskResult, stem: &Path) -> Result<u64, CliError> {
    let handoff = result.handoff();
    let (image_frame, pixel_data, diagnostics) = result.into_parts();
    for warning in &diagnostics {
        log::warn!("{}: {warning}", stem.display());
    }

    let summary = serde_json::json!({
        "imageFrame": image_frame,
        "diagnostics": diagnostics,
        "handoff": handoff,
    });
    let summary = serde_json::to_vec_pretty(&summary).map_err(|source| CliError::Summary {
        path: stem.with_extension("json"),
        source,
    })?;

    fs::write(stem.with_extension("raw"), pixel_data.as_bytes())?;
    fs::write(stem.with_extension("json"), summary)?;
    log::debug!("Wrote {} ({} bytes)", stem.display(), pixel_data.len());
    Ok(pixel_data.len() as u64)
}
