use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Maximum items per call, for both playlist pages and detail batches.
const PAGE_SIZE: usize = 50;

/// A single video with its popularity metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    id: String,
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    content_details: Option<VideoContentDetails>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    published_at: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

impl VideoItem {
    fn into_video(self) -> Video {
        let stats = self.statistics.unwrap_or_default();
        let url = format!("{}{}", WATCH_URL, self.id);
        Video {
            id: self.id,
            title: self.snippet.title,
            published_at: self.snippet.published_at,
            view_count: parse_count(stats.view_count),
            like_count: parse_count(stats.like_count),
            comment_count: parse_count(stats.comment_count),
            duration: self
                .content_details
                .and_then(|details| details.duration)
                .unwrap_or_default(),
            url,
        }
    }
}

/// The API reports statistics counters as strings; missing or unparsable
/// values count as zero.
fn parse_count(value: Option<String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn normalize_handle(handle: &str) -> &str {
    handle.strip_prefix('@').unwrap_or(handle)
}

/// Comma-joined id lists, one per detail call
fn id_batches(video_ids: &[String]) -> Vec<String> {
    video_ids
        .chunks(PAGE_SIZE)
        .map(|batch| batch.join(","))
        .collect()
}

fn append_batch(videos: &mut Vec<Video>, response: VideoListResponse) {
    videos.extend(response.items.into_iter().map(VideoItem::into_video));
}

/// Append one page of playlist items, returning the continuation token
fn append_page(video_ids: &mut Vec<String>, page: PlaylistItemsResponse) -> Option<String> {
    video_ids.extend(
        page.items
            .into_iter()
            .map(|item| item.content_details.video_id),
    );
    page.next_page_token
}

/// YouTube Data API client
pub struct YouTube {
    client: Client,
    api_key: String,
}

impl YouTube {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Resolve a channel handle (with or without a leading @) to its channel id
    pub async fn resolve_channel_id(&self, handle: &str) -> Result<String> {
        let handle = normalize_handle(handle);
        let response: ChannelListResponse = self
            .get_json("channels", &[("part", "id"), ("forHandle", handle)])
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.id)
            .ok_or_else(|| Error::ChannelNotFound(format!("@{}", handle)))
    }

    /// Look up the id of the channel's uploads playlist
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String> {
        let response: ChannelListResponse = self
            .get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;

        response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|details| details.related_playlists)
            .and_then(|playlists| playlists.uploads)
            .ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "no uploads playlist for channel {}",
                    channel_id
                ))
            })
    }

    /// Walk the uploads playlist and collect every video id, in playlist order
    pub async fn collect_video_ids(&self, playlist_id: &str) -> Result<Vec<String>> {
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let max_results = PAGE_SIZE.to_string();
            let mut params = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let page: PlaylistItemsResponse = self.get_json("playlistItems", &params).await?;
            let next = append_page(&mut video_ids, page);
            eprintln!("Collected {} video id(s)...", video_ids.len());

            // A missing token means the last page was reached
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(video_ids)
    }

    /// Fetch metadata and statistics for the given video ids, 50 per call.
    /// Ids with no matching item (deleted or private videos) are skipped.
    pub async fn fetch_video_details(&self, video_ids: &[String]) -> Result<Vec<Video>> {
        let mut videos = Vec::new();

        for ids in id_batches(video_ids) {
            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[
                        ("part", "snippet,contentDetails,statistics"),
                        ("id", ids.as_str()),
                    ],
                )
                .await?;

            append_batch(&mut videos, response);
            eprintln!(
                "Fetched details for {}/{} video(s)...",
                videos.len(),
                video_ids.len()
            );
        }

        Ok(videos)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", YOUTUBE_API_BASE_URL, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "{} request failed ({}): {}",
                endpoint, status, text
            )));
        }

        Ok(response.json().await?)
    }
}
