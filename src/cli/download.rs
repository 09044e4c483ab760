use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::{
    error, info,
    management::{CredentialsManager, TokenManager},
    pipeline::{PipelineEvent, PlaylistDownload, YtDlpSteps},
    spotify, success, utils,
};

pub async fn download(url: String, output: PathBuf) {
    // Run-level preflight. Each unmet precondition fails the run with its
    // own message and nothing is retried. The destination check runs first,
    // before any network call.
    if !output.is_dir() {
        error!(
            "Configuration error: destination directory {} does not exist",
            output.display()
        );
    }

    let playlist_id = match utils::extract_playlist_id(&url) {
        Some(id) => id,
        None => error!("Invalid Spotify playlist URL"),
    };

    let credentials = match CredentialsManager::resolve().await {
        Some(credentials) => credentials,
        None => error!(
            "Spotify credentials not configured. Run spodlcli credentials --client-id <ID> --client-secret <SECRET>"
        ),
    };

    let mut token_mgr = match TokenManager::acquire(credentials).await {
        Ok(manager) => manager,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };
    let token = token_mgr.get_valid_token().await;

    let playlist_name = match spotify::playlist::get_playlist_name(&playlist_id, &token).await {
        Ok(name) => name,
        Err(e) => error!("Could not retrieve playlist information: {}", e),
    };

    info!("Processing playlist: {}", playlist_name);

    let tracks = match spotify::playlist::get_playlist_tracks(&playlist_id, &token).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to get playlist tracks: {}", e),
    };

    if tracks.is_empty() {
        error!("No tracks found in playlist");
    }

    info!("Found {} tracks", tracks.len());

    let playlist_dir = output.join(utils::sanitize_title(&playlist_name));
    if let Err(e) = async_fs::create_dir_all(&playlist_dir).await {
        error!(
            "Failed to create playlist directory {}: {}",
            playlist_dir.display(),
            e
        );
    }

    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = Arc::clone(&cancelled);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancelled.store(true, Ordering::Relaxed);
            }
        });
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let total = tracks.len() as u64;

    let run = PlaylistDownload::new(
        playlist_dir.clone(),
        tracks,
        Arc::clone(&cancelled),
        events_tx,
    );
    let worker = tokio::spawn(run.run(YtDlpSteps));

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} tracks")
            .unwrap()
            .progress_chars("=> "),
    );

    while let Some(event) = events_rx.recv().await {
        match event {
            PipelineEvent::Status(message) => pb.println(message),
            PipelineEvent::Progress(fraction) => {
                pb.set_position((fraction * total as f32).round() as u64);
            }
            PipelineEvent::Done => {
                pb.finish_and_clear();
                break;
            }
            PipelineEvent::Error(e) => {
                pb.finish_and_clear();
                error!("{}", e);
            }
        }
    }

    let _ = worker.await;

    if cancelled.load(Ordering::Relaxed) {
        info!("Stopped. Finished tracks remain in {}", playlist_dir.display());
    } else {
        success!(
            "Finished processing playlist {} into {}",
            playlist_name,
            playlist_dir.display()
        );
    }
}
