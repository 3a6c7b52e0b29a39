//! Feed reading and processor dispatch.
//!
//! ```ignore
//! let stats = Pipeline::builder()
//!     .datasource(JsonLinesDatasource::open("history.jsonl").await?)
//!     .processor(processor)
//!     .build()?
//!     .run()
//!     .await?;
//! ```

use {
    crate::{
        error::{ActivityError, ActivityResult},
        processors::{ProcessOutcome, Processor},
    },
    async_trait::async_trait,
    std::{fmt, path::Path},
    tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader},
    wallet_activity_decoder::{decode_line, TransactionDetails},
};

/// A source of decoded transactions.
#[async_trait]
pub trait Datasource: Send {
    /// Returns the next transaction, or `None` once the source is exhausted.
    async fn next_transaction(&mut self) -> ActivityResult<Option<TransactionDetails>>;

    /// Number of inputs dropped because they could not be decoded.
    fn skipped(&self) -> u64 {
        0
    }
}

pub type FeedReader = BufReader<Box<dyn AsyncRead + Unpin + Send>>;

/// Reads one JSON transaction per line.
///
/// Blank lines and `#` comments are ignored. Lines that are not UTF-8 or
/// fail to decode are logged and skipped.
pub struct JsonLinesDatasource<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: u64,
    skipped: u64,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesDatasource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Reads the next raw line into `buf`. Returns `false` at end of input.
    async fn read_line(&mut self) -> ActivityResult<bool> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }
        Ok(true)
    }
}

impl JsonLinesDatasource<FeedReader> {
    /// Opens a feed file, or stdin when `path` is `-`.
    pub async fn open(path: impl AsRef<Path>) -> ActivityResult<Self> {
        let path = path.as_ref();
        let reader: Box<dyn AsyncRead + Unpin + Send> = if path == Path::new("-") {
            log::info!("Reading transactions from stdin");
            Box::new(tokio::io::stdin())
        } else {
            log::info!("Reading transactions from {}", path.display());
            Box::new(tokio::fs::File::open(path).await?)
        };
        Ok(Self::new(BufReader::new(reader)))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Datasource for JsonLinesDatasource<R> {
    async fn next_transaction(&mut self) -> ActivityResult<Option<TransactionDetails>> {
        while self.read_line().await? {
            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("Skipping line {}: not valid UTF-8 ({e})", self.line_no);
                    continue;
                }
            };
            match decode_line(line) {
                Ok(Some(tx)) => return Ok(Some(tx)),
                Ok(None) => {}
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("Skipping line {}: {e}", self.line_no);
                }
            }
        }
        Ok(None)
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Counters reported when a pipeline finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Transactions read from the datasource
    pub processed: u64,
    /// Items emitted by any processor
    pub emitted: u64,
    /// Transactions every processor filtered out
    pub filtered: u64,
    /// Inputs the datasource could not decode
    pub skipped: u64,
    /// Processor errors
    pub failed: u64,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={}, emitted={}, filtered={}, skipped={}, failed={}",
            self.processed, self.emitted, self.filtered, self.skipped, self.failed
        )
    }
}

/// Drives one datasource into a set of processors.
pub struct Pipeline {
    datasource: Box<dyn Datasource>,
    processors: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Runs until the datasource is exhausted.
    ///
    /// Processor errors are logged and counted; only datasource IO errors
    /// abort the run.
    pub async fn run(mut self) -> ActivityResult<PipelineStats> {
        let mut stats = PipelineStats::default();

        while let Some(tx) = self.datasource.next_transaction().await? {
            stats.processed += 1;
            let mut emitted = false;

            for processor in self.processors.iter_mut() {
                match processor.process(&tx).await {
                    Ok(ProcessOutcome::Emitted) => emitted = true,
                    Ok(ProcessOutcome::Filtered) => {}
                    Err(e) => {
                        stats.failed += 1;
                        log::error!("Processor failed on {}: {e}", tx.hash);
                    }
                }
            }

            if emitted {
                stats.emitted += 1;
            } else {
                stats.filtered += 1;
            }
        }

        stats.skipped = self.datasource.skipped();
        log::info!("Pipeline finished: {stats}");
        Ok(stats)
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    datasource: Option<Box<dyn Datasource>>,
    processors: Vec<Box<dyn Processor>>,
}

impl PipelineBuilder {
    pub fn datasource(mut self, datasource: impl Datasource + 'static) -> Self {
        self.datasource = Some(Box::new(datasource));
        self
    }

    pub fn processor(mut self, processor: impl Processor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn build(self) -> ActivityResult<Pipeline> {
        let datasource = self
            .datasource
            .ok_or_else(|| ActivityError::Pipeline("no datasource configured".to_string()))?;
        if self.processors.is_empty() {
            return Err(ActivityError::Pipeline("no processors configured".to_string()));
        }
        Ok(Pipeline {
            datasource,
            processors: self.processors,
        })
    }
}
