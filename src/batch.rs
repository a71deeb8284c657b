//! Batch conversion.
//!
//! A batch converts each input in order into `<output_dir>/<stem>.<ext>`.
//! The first failure stops the batch: later inputs are never opened, and the
//! outputs written so far stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::{assemble, realize, AssembleOptions};
use crate::error::{Error, Result};
use crate::progress::BatchReporter;
use crate::sink::{DocumentSinkFactory, DocxSinkFactory};
use crate::source::{PageSourceFactory, PdfSourceFactory, SourceOptions};

/// Input files plus the directory the outputs go to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchJob {
    /// Inputs in conversion order
    pub inputs: Vec<PathBuf>,

    /// Output directory, required before conversion starts
    pub output_dir: Option<PathBuf>,
}

impl BatchJob {
    /// Create an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input file.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Add several input files.
    pub fn with_inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Check that there is something to convert and somewhere to put it.
    ///
    /// Returns the output directory on success.
    pub fn validate(&self) -> Result<&Path> {
        if self.inputs.is_empty() {
            return Err(Error::Validation("no input files selected".into()));
        }
        match self.output_dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
            _ => Err(Error::Validation("no output directory selected".into())),
        }
    }
}

/// Options for converting documents.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Block assembly and realization options
    pub assemble: AssembleOptions,

    /// PDF reading options (used by [`convert_file`] and [`convert_pdfs`])
    pub source: SourceOptions,

    /// Output file extension, without the dot
    pub extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            assemble: AssembleOptions::default(),
            source: SourceOptions::default(),
            extension: "docx".to_string(),
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set assembly options.
    pub fn with_assemble(mut self, options: AssembleOptions) -> Self {
        self.assemble = options;
        self
    }

    /// Set PDF reading options.
    pub fn with_source(mut self, options: SourceOptions) -> Self {
        self.source = options;
        self
    }

    /// Set the output extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every input converted; outputs in input order
    Completed(Vec<PathBuf>),

    /// Conversion of `input` failed and the batch stopped there
    Failed {
        input: PathBuf,
        message: String,
        completed: Vec<PathBuf>,
    },
}

impl BatchOutcome {
    /// Check if every input converted.
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Completed(_))
    }

    /// Outputs written before the batch ended.
    pub fn outputs(&self) -> &[PathBuf] {
        match self {
            BatchOutcome::Completed(paths) => paths,
            BatchOutcome::Failed { completed, .. } => completed,
        }
    }
}

/// Derive the output path for `input`: `<output_dir>/<stem>.<extension>`.
pub fn output_path_for(input: &Path, output_dir: &Path, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::Validation(format!("cannot derive a file name from '{}'", input.display()))
        })?;
    // Only the last extension is replaced, so "report.v2.pdf" keeps its ".v2".
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    Ok(output_dir.join(name))
}

/// Convert every input of `job`, stopping at the first failure.
///
/// An invalid job (no inputs, no output directory, bad thresholds) is
/// returned as `Err` before any input is opened. Per-file failures end the
/// batch and come back as [`BatchOutcome::Failed`].
pub fn convert_batch<F, K>(
    job: &BatchJob,
    options: &ConvertOptions,
    reporter: &mut dyn BatchReporter,
    sources: &F,
    sinks: &K,
) -> Result<BatchOutcome>
where
    F: PageSourceFactory,
    K: DocumentSinkFactory,
{
    let output_dir = match job
        .validate()
        .and_then(|dir| options.assemble.validate().map(|_| dir))
    {
        Ok(dir) => dir,
        Err(e) => {
            reporter.report_error(&e.to_string());
            return Err(e);
        }
    };

    if let Err(e) = fs::create_dir_all(output_dir) {
        let e = Error::from(e);
        reporter.report_error(&e.to_string());
        return Err(e);
    }

    let total = job.inputs.len();
    let mut completed = Vec::with_capacity(total);

    for (i, input) in job.inputs.iter().enumerate() {
        log::info!("[{}/{}] converting {}", i + 1, total, input.display());

        match convert_one(input, output_dir, options, sources, sinks) {
            Ok(output) => {
                log::info!("wrote {}", output.display());
                completed.push(output);
                reporter.report_progress(i + 1, total);
            }
            Err(e) => {
                let message = format!("Failed to convert '{}': {}", input.display(), e);
                log::error!("{}", message);
                reporter.report_error(&message);
                return Ok(BatchOutcome::Failed {
                    input: input.clone(),
                    message,
                    completed,
                });
            }
        }
    }

    reporter.report_success(&completed);
    Ok(BatchOutcome::Completed(completed))
}

fn convert_one<F, K>(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
    sources: &F,
    sinks: &K,
) -> Result<PathBuf>
where
    F: PageSourceFactory,
    K: DocumentSinkFactory,
{
    let output = output_path_for(input, output_dir, &options.extension)?;

    let blocks = {
        let mut source = sources.open(input)?;
        assemble(&mut source, &options.assemble)?
    };

    let mut sink = sinks.create();
    realize(&blocks, &mut sink, &output, options.assemble.table_policy)?;
    Ok(output)
}

/// Convert PDFs to DOCX files with the built-in source and sink.
pub fn convert_pdfs(
    job: &BatchJob,
    options: &ConvertOptions,
    reporter: &mut dyn BatchReporter,
) -> Result<BatchOutcome> {
    let sources = PdfSourceFactory::with_options(options.source.clone());
    convert_batch(job, options, reporter, &sources, &DocxSinkFactory::new())
}

/// Convert a single PDF into `output_dir`, returning the written path.
pub fn convert_file<P, Q>(input: P, output_dir: Q, options: &ConvertOptions) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_dir = output_dir.as_ref();
    options.assemble.validate()?;
    fs::create_dir_all(output_dir)?;

    let sources = PdfSourceFactory::with_options(options.source.clone());
    convert_one(
        input.as_ref(),
        output_dir,
        options,
        &sources,
        &DocxSinkFactory::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        let out = output_path_for(Path::new("/in/report.v2.pdf"), Path::new("/out"), "docx").unwrap();
        assert_eq!(out, PathBuf::from("/out/report.v2.docx"));

        let out = output_path_for(Path::new("scan"), Path::new("out"), "docx").unwrap();
        assert_eq!(out, PathBuf::from("out/scan.docx"));

        let out = output_path_for(Path::new(".hidden.pdf"), Path::new("out"), "docx").unwrap();
        assert_eq!(out, PathBuf::from("out/.hidden.docx"));
    }

    #[test]
    fn test_output_path_without_stem() {
        assert!(matches!(
            output_path_for(Path::new("/"), Path::new("out"), "docx"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_job_validation() {
        assert!(BatchJob::new().with_output_dir("out").validate().is_err());
        assert!(BatchJob::new().with_input("a.pdf").validate().is_err());
        assert!(BatchJob::new()
            .with_input("a.pdf")
            .with_output_dir("")
            .validate()
            .is_err());

        let job = BatchJob::new()
            .with_inputs(["a.pdf", "b.pdf"])
            .with_output_dir("out");
        assert_eq!(job.validate().unwrap(), Path::new("out"));
        assert_eq!(job.inputs.len(), 2);
    }

    #[test]
    fn test_outcome_outputs() {
        let failed = BatchOutcome::Failed {
            input: "b.pdf".into(),
            message: "boom".into(),
            completed: vec!["out/a.docx".into()],
        };
        assert!(!failed.is_success());
        assert_eq!(failed.outputs(), &[PathBuf::from("out/a.docx")]);
        assert!(BatchOutcome::Completed(vec![]).is_success());
    }
}
