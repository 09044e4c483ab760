//! # Track Pipeline Module
//!
//! This module implements the track-resolution-to-verified-file pipeline:
//! given the ordered track list of a resolved playlist, it produces tagged
//! MP3 files on disk, one best-effort match per track.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer (CLI)
//!          ↑ ordered PipelineEvent channel      ↓ cancellation flag
//! PlaylistDownload (orchestrator, single worker task)
//!     ├── locator  - external index search (yt-dlp, depth 1)
//!     ├── fetcher  - stream download + MP3 transcode (yt-dlp/ffmpeg)
//!     └── embedder - ID3 tags + cover art
//! ```
//!
//! ## Per-track sequence
//!
//! locate → fetch → [`verify_download`] → embed → verify_metadata. The two
//! verification steps are independent of the step they check: a successful
//! fetch does not imply the file landed non-empty, and a successful embed
//! does not imply the required tags are readable. Any step's failure skips
//! the track with a status line naming the track and the step, and the run
//! continues with the next track. Run-level failures (missing configuration,
//! unresolvable playlist) abort before any track work begins.
//!
//! ## Pacing and cancellation
//!
//! The locator sleeps a randomized 1-3 seconds before every search to reduce
//! the chance of upstream rate limiting; the delay is unconditional, not
//! adaptive. Cancellation is cooperative and track-granular: the flag is
//! polled before each track, a download already in flight is not
//! interrupted, and a cancelled run ends with a clean `Done`, not an error.
//!
//! ## Accuracy limitation
//!
//! The locator takes the external index's first result for a constructed
//! text query. The index's relevance ordering is not a contract this tool
//! can enforce; a mismatched upload is possible and is not detected here.
//!
//! ## No timeouts
//!
//! Individual network calls and subprocess invocations carry no timeout; an
//! unresponsive external service stalls the worker until it errors or the
//! process is terminated externally.

pub mod embedder;
pub mod fetcher;
pub mod locator;

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    types::{SearchResult, Track},
    utils,
};

/// User agent presented to the external index on searches and downloads.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Run-level failure: aborts the run before or instead of track processing.
#[derive(Debug, Clone)]
pub enum RunError {
    Config(String),
    Resolution(String),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Config(msg) => write!(f, "{}", msg),
            RunError::Resolution(msg) => write!(f, "{}", msg),
        }
    }
}

/// Track-level failure: skips the affected track, never the run.
///
/// Callers can distinguish "nothing matched" from a transient transport
/// failure even though no retry policy acts on the difference yet.
#[derive(Debug, Clone)]
pub enum TrackError {
    NotFound,
    LocateFailed(String),
    FetchFailed(String),
    DownloadVerificationFailed,
    TagError(String),
    MetadataVerificationFailed,
}

/// The closed set of events the worker delivers to the presentation layer,
/// in production order, over one channel.
#[derive(Debug)]
pub enum PipelineEvent {
    Status(String),
    Progress(f32),
    Done,
    Error(RunError),
}

/// The pipeline's seam to its external collaborators. The production
/// implementation is [`YtDlpSteps`]; tests substitute a stub so sequencing,
/// isolation and cancellation are exercised without the network.
#[allow(async_fn_in_trait)]
pub trait TrackSteps {
    async fn locate(&self, track: &Track) -> Result<SearchResult, TrackError>;
    async fn fetch(
        &self,
        result: &SearchResult,
        dest_dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, TrackError>;
    async fn embed(&self, path: &Path, track: &Track) -> Result<(), TrackError>;
    async fn verify_metadata(&self, path: &Path) -> bool;
}

/// Production steps backed by yt-dlp and the ID3 embedder.
pub struct YtDlpSteps;

impl TrackSteps for YtDlpSteps {
    async fn locate(&self, track: &Track) -> Result<SearchResult, TrackError> {
        locator::locate(track).await
    }

    async fn fetch(
        &self,
        result: &SearchResult,
        dest_dir: &Path,
        file_stem: &str,
    ) -> Result<PathBuf, TrackError> {
        fetcher::fetch(result, dest_dir, file_stem).await
    }

    async fn embed(&self, path: &Path, track: &Track) -> Result<(), TrackError> {
        embedder::embed(path, track).await
    }

    async fn verify_metadata(&self, path: &Path) -> bool {
        embedder::verify_metadata(path)
    }
}

/// Confirms a fetched file exists on disk and is non-empty.
///
/// Deliberately separate from the fetch step: the fetcher reports what the
/// downloader claimed, this reports what actually landed.
pub async fn verify_download(path: &Path) -> Result<(), TrackError> {
    match async_fs::metadata(path).await {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(TrackError::DownloadVerificationFailed),
    }
}

/// One end-to-end processing of one resolved playlist. Holds the destination
/// directory, the track list, the processed count and the cancellation flag;
/// nothing survives the run.
pub struct PlaylistDownload {
    dest_dir: PathBuf,
    tracks: Vec<Track>,
    cancelled: Arc<AtomicBool>,
    events: UnboundedSender<PipelineEvent>,
    processed: usize,
}

impl PlaylistDownload {
    pub fn new(
        dest_dir: PathBuf,
        tracks: Vec<Track>,
        cancelled: Arc<AtomicBool>,
        events: UnboundedSender<PipelineEvent>,
    ) -> Self {
        Self {
            dest_dir,
            tracks,
            cancelled,
            events,
            processed: 0,
        }
    }

    /// Runs the pipeline over the track list, strictly sequentially.
    ///
    /// Emits, per track: a processing status, an outcome status (success or
    /// the failed step), and the progress fraction `processed/total`. The
    /// fractions are exactly `1/n, 2/n, …, n/n`. Ends with a terminal
    /// `Done` event, also after cancellation; `Error` is emitted only for an
    /// empty track list.
    pub async fn run<S: TrackSteps>(mut self, steps: S) {
        if self.tracks.is_empty() {
            self.emit(PipelineEvent::Error(RunError::Resolution(
                "No tracks found in playlist".to_string(),
            )));
            return;
        }

        let total = self.tracks.len();
        let tracks = std::mem::take(&mut self.tracks);

        for (index, track) in tracks.iter().enumerate() {
            if self.cancelled.load(Ordering::Relaxed) {
                self.emit(PipelineEvent::Status(
                    "Download cancelled by user.".to_string(),
                ));
                self.emit(PipelineEvent::Done);
                return;
            }

            self.emit(PipelineEvent::Status(format!(
                "Processing track {}/{}: {}",
                index + 1,
                total,
                track.title
            )));

            let status = match self.process_track(&steps, track).await {
                Ok(()) => format!("Successfully processed: {}", track.title),
                Err(err) => skip_status(track, &err),
            };
            self.emit(PipelineEvent::Status(status));

            self.processed += 1;
            self.emit(PipelineEvent::Progress(
                self.processed as f32 / total as f32,
            ));
        }

        self.emit(PipelineEvent::Status("Download completed!".to_string()));
        self.emit(PipelineEvent::Done);
    }

    async fn process_track<S: TrackSteps>(
        &self,
        steps: &S,
        track: &Track,
    ) -> Result<(), TrackError> {
        let result = steps.locate(track).await?;

        let file_stem = utils::track_file_stem(track);
        let path = steps.fetch(&result, &self.dest_dir, &file_stem).await?;

        verify_download(&path).await?;

        steps.embed(&path, track).await?;

        if !steps.verify_metadata(&path).await {
            return Err(TrackError::MetadataVerificationFailed);
        }

        Ok(())
    }

    fn emit(&self, event: PipelineEvent) {
        let _ = self.events.send(event);
    }
}

fn skip_status(track: &Track, err: &TrackError) -> String {
    match err {
        TrackError::NotFound => format!("No results found for: {}", track.title),
        TrackError::LocateFailed(cause) => format!("Search failed for {}: {}", track.title, cause),
        TrackError::FetchFailed(cause) => {
            format!("Failed to download {}: {}", track.title, cause)
        }
        TrackError::DownloadVerificationFailed => {
            format!("Download verification failed: {}", track.title)
        }
        TrackError::TagError(cause) => {
            format!("Failed to embed metadata for {}: {}", track.title, cause)
        }
        TrackError::MetadataVerificationFailed => {
            format!("Metadata verification failed: {}", track.title)
        }
    }
}

pub(crate) fn last_stderr_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("unknown error")
        .to_string()
}
