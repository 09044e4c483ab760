//! # CLI Module
//!
//! This module provides the command-line interface layer for spodlcli. It is
//! the presentation side of the application: it collects user input, runs
//! the run-level preflight checks, drives the download pipeline and renders
//! its event stream as status lines and a progress bar.
//!
//! ## Commands
//!
//! - [`download`] - Resolves a playlist and downloads every track as a
//!   tagged MP3 file, with per-track progress and Ctrl-C cancellation
//! - [`tracks`] - Resolves a playlist and prints its track table without
//!   downloading anything
//! - [`credentials`] - Saves or shows the Spotify API credential record
//!
//! ## Responsiveness
//!
//! The pipeline runs on its own worker task; this layer only consumes the
//! ordered event channel, so rendering never blocks a download and a
//! download never blocks rendering. Cancellation is forwarded through an
//! atomic flag the worker polls at track boundaries.
//!
//! ## Error presentation
//!
//! Run-level failures (missing credentials, bad playlist reference, missing
//! destination directory, empty playlist) abort with a single message via
//! the `error!` macro before any track work begins. Track-level failures
//! arrive as status events and are printed without stopping the run.

mod credentials;
mod download;
mod tracks;

pub use credentials::credentials;
pub use download::download;
pub use tracks::tracks;
