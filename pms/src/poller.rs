//! Polls a capture file and records the latest reading.

use super::capture::read_capture;
use super::decoder::Decoder;
use super::error::{DecodeError, Error, Result};
use super::reading::{Health, Reading, Thresholds};
use log::{info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Output log line written for a cycle that failed to decode.
pub const DECODE_ERROR_LINE: &str = "Error! Bits are short... looping again...";

/// The result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    Reading { reading: Reading, health: Health },
    Failed(DecodeError),
}

pub struct Poller {
    capture: PathBuf,
    log: PathBuf,
    decoder: Decoder,
    thresholds: Thresholds,
}

impl Poller {
    /// Create a poller that reads `capture` and appends to `log`.
    pub fn new<C, L>(capture: C, log: L) -> Poller
    where
        C: Into<PathBuf>,
        L: Into<PathBuf>,
    {
        Poller {
            capture: capture.into(),
            log: log.into(),
            decoder: Decoder::default(),
            thresholds: Thresholds::default(),
        }
    }

    pub fn decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Run one cycle: read the capture, decode its last frame and append the outcome to the
    /// output log.
    ///
    /// Decode failures are reported as `Cycle::Failed`; only I/O errors are returned as `Err`.
    pub fn poll(&mut self) -> Result<Cycle> {
        let capture = read_capture(&self.capture)?;

        match self.decoder.decode(&capture) {
            Ok(reading) => {
                let health = reading.classify(&self.thresholds);
                info!("{}", reading);
                self.append(&reading)?;
                Ok(Cycle::Reading { reading, health })
            }
            Err(e) => {
                warn!("{}: {}", self.capture.display(), e);
                self.append(DECODE_ERROR_LINE)?;
                Ok(Cycle::Failed(e))
            }
        }
    }

    /// Poll forever, handing each cycle to `handler` and sleeping `interval` in between.
    ///
    /// Returns `Ok(())` if `handler` returns `Error::Stop`; any other error ends the run and is
    /// returned.
    pub fn run<H>(&mut self, interval: Duration, mut handler: H) -> Result<()>
    where
        H: FnMut(&Cycle) -> Result<()>,
    {
        info!(
            "polling {} every {:?}, logging to {}",
            self.capture.display(),
            interval,
            self.log.display()
        );
        loop {
            let cycle = self.poll()?;
            match handler(&cycle) {
                Err(Error::Stop) => return Ok(()),
                r => r?,
            }
            thread::sleep(interval);
        }
    }

    fn append<T: std::fmt::Display + ?Sized>(&self, line: &T) -> Result<()> {
        let err = |source| Error::Log {
            path: self.log.clone(),
            source,
        };
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log)
            .map_err(err)?;
        writeln!(f, "{}", line).map_err(err)
    }
}
