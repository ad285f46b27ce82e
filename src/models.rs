use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Scheduled Post Models (fetched from the posting backend)
// ============================================================================

/// Publishing destination. Closed set; the backend sends lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Pinterest,
    Telegram,
}

impl Platform {
    /// Lowercase wire name, also used in per-platform API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Pinterest => "pinterest",
            Platform::Telegram => "telegram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Scheduled,
    Posted,
    Failed,
}

/// Which subsystem created the item: direct user action or a recurring
/// automation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    Manual,
    Automation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single post, scheduled or already published. Arrives read-only from the
/// backend; the view never mutates one, only cancels scheduled ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub platform: Platform,
    /// Calendar date the item is bucketed under (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Time of day, `HH:MM` (24h) or `H:MM AM/PM`. May be absent or
    /// malformed; malformed values degrade to the top of the grid.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "mediaUrl")]
    pub media_url: Option<String>,
    #[serde(default, rename = "mediaType")]
    pub media_kind: Option<MediaKind>,
    pub status: PostStatus,
    pub source: PostSource,
}

// ============================================================================
// API envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WeeklyPostsResponse {
    #[serde(default)]
    pub data: Vec<ScheduledItem>,
}

#[derive(Debug, Deserialize)]
pub struct CancelPostResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CancelPostRequest<'a> {
    #[serde(rename = "postId")]
    pub post_id: &'a str,
    #[serde(rename = "userId")]
    pub user_id: &'a str,
}

/// Bound a caption to `max_len` characters for summary rendering, appending
/// an ellipsis when truncated.
pub fn truncate_caption(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_len).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_item() {
        let json = r#"{
            "id": "665f1c2e9a",
            "platform": "instagram",
            "date": "2024-06-03",
            "time": "2:30 PM",
            "message": "Launch day!",
            "mediaUrl": "https://cdn.example.com/a.jpg",
            "mediaType": "image",
            "status": "scheduled",
            "source": "automation"
        }"#;

        let item: ScheduledItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.platform, Platform::Instagram);
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(item.media_kind, Some(MediaKind::Image));
        assert_eq!(item.status, PostStatus::Scheduled);
        assert_eq!(item.source, PostSource::Automation);
    }

    #[test]
    fn deserialize_minimal_item() {
        // time/message/media are all optional on the wire
        let json = r#"{
            "id": "1",
            "platform": "telegram",
            "date": "2024-06-09",
            "status": "failed",
            "source": "manual"
        }"#;

        let item: ScheduledItem = serde_json::from_str(json).unwrap();
        assert!(item.time.is_none());
        assert!(item.message.is_none());
        assert!(item.media_url.is_none());
        // failed items still deserialize and render
        assert_eq!(item.status, PostStatus::Failed);
    }

    #[test]
    fn weekly_envelope_defaults_to_empty() {
        let resp: WeeklyPostsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn platform_wire_names_round_trip() {
        for platform in [
            Platform::Facebook,
            Platform::Instagram,
            Platform::Twitter,
            Platform::Linkedin,
            Platform::Youtube,
            Platform::Pinterest,
            Platform::Telegram,
        ] {
            let wire = serde_json::to_string(&platform).unwrap();
            assert_eq!(wire, format!("\"{}\"", platform.as_str()));
        }
    }

    #[test]
    fn truncate_caption_bounds_length() {
        assert_eq!(truncate_caption("short", 160), "short");
        let long = "x".repeat(200);
        let cut = truncate_caption(&long, 160);
        assert_eq!(cut.chars().count(), 163);
        assert!(cut.ends_with("..."));
    }
}
