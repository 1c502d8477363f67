use std::path::Path;

use crate::config::{OUTPUT_FILE, youtube_api_key};
use crate::error::{Error, Result};
use crate::report::{print_table, rank_videos, write_json};
use crate::youtube::YouTube;

pub async fn run(channel: &str) -> Result<()> {
    let api_key = youtube_api_key().ok_or(Error::ApiKeyMissing)?;
    let youtube = YouTube::new(api_key)?;

    eprintln!("Resolving channel {}...", channel);
    let channel_id = youtube.resolve_channel_id(channel).await?;
    eprintln!("Channel id: {}", channel_id);

    let playlist_id = youtube.uploads_playlist_id(&channel_id).await?;
    eprintln!("Uploads playlist: {}", playlist_id);

    eprintln!("Collecting video ids...");
    let video_ids = youtube.collect_video_ids(&playlist_id).await?;
    eprintln!("Found {} video(s)", video_ids.len());

    eprintln!("Fetching video details...");
    let videos = youtube.fetch_video_details(&video_ids).await?;

    let ranked = rank_videos(videos);
    print_table(channel, &ranked);
    write_json(Path::new(OUTPUT_FILE), &ranked)?;
    eprintln!("Wrote {} video(s) to {}", ranked.len(), OUTPUT_FILE);

    Ok(())
}
