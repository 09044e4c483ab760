use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;

use crate::{config, types::SearchResult};

use super::{BROWSER_USER_AGENT, TrackError, last_stderr_line};

/// Fully-specified download options for a single track.
///
/// Built once per track from the static flag set plus the track's derived
/// filename; never mutated afterwards and never shared between tracks.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    url: String,
    output_template: String,
    output_path: PathBuf,
}

impl FetchOptions {
    pub fn for_track(result: &SearchResult, dest_dir: &Path, file_stem: &str) -> Self {
        let output_template = dest_dir
            .join(format!("{}.%(ext)s", file_stem))
            .to_string_lossy()
            .into_owned();
        let output_path = dest_dir.join(format!("{}.mp3", file_stem));

        Self {
            url: result.url.clone(),
            output_template,
            output_path,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(config::ytdlp_path());
        cmd.args(["--format", "bestaudio/best"])
            .arg("--extract-audio")
            .args(["--audio-format", "mp3"])
            .args(["--audio-quality", "2"])
            .args(["--postprocessor-args", "ffmpeg:-ar 44100 -ac 2"])
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--no-check-certificate")
            .arg("--geo-bypass")
            .args(["--user-agent", BROWSER_USER_AGENT])
            .args(["--output", &self.output_template])
            .arg(&self.url)
            .stdin(Stdio::null());
        cmd
    }
}

/// Downloads the best available audio-only stream (falling back to the best
/// combined stream) for a located item and transcodes it to MP3, 44.1 kHz
/// stereo at quality scale 2 — the ~192 kbps class the tagging step assumes.
///
/// Returns the expected output path when the subprocess reports success; it
/// does not stat the file. Confirming the file actually landed non-empty is
/// `verify_download`'s job, one step later.
pub async fn fetch(
    result: &SearchResult,
    dest_dir: &Path,
    file_stem: &str,
) -> Result<PathBuf, TrackError> {
    let options = FetchOptions::for_track(result, dest_dir, file_stem);

    let output = options
        .command()
        .output()
        .await
        .map_err(|e| TrackError::FetchFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(TrackError::FetchFailed(last_stderr_line(&output.stderr)));
    }

    Ok(options.output_path().to_path_buf())
}
