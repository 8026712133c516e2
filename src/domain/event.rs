use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";
pub const VIDEO_LINK_LABEL: &str = "View Video";
pub const NO_VIDEO: &str = "No video";

/// Display format for timestamps, always rendered in the local time zone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One entry of the `/api/events` response.
///
/// Every field is optional. The backend's wire names `timestamp_iso` and
/// `video_url_remote` are accepted next to `timestamp` and `video_url`;
/// when both spellings are present the short one wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: Option<Value>,
    pub timestamp: Option<Value>,
    pub timestamp_iso: Option<Value>,
    pub tag_id: Option<Value>,
    pub video_url: Option<String>,
    pub video_url_remote: Option<String>,

    pub unit_id: Option<String>,
    pub direction: Option<String>,
    pub asset_id: Option<Value>,
    pub asset_info: Option<AssetInfo>,
    pub received_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetInfo {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// The video column of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoCell {
    /// A "View Video" link that opens `href` outside the viewer.
    Link { href: String },
    NoVideo,
}

impl VideoCell {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Link { .. } => VIDEO_LINK_LABEL,
            Self::NoVideo => NO_VIDEO,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Link { href } => Some(href),
            Self::NoVideo => None,
        }
    }
}

/// The four cells shown for one event in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: String,
    pub timestamp: String,
    pub tag_id: String,
    pub video: VideoCell,
}

impl EventRecord {
    pub fn timestamp_value(&self) -> Option<&Value> {
        self.timestamp.as_ref().or(self.timestamp_iso.as_ref())
    }

    /// The non-empty video URL, if any.
    pub fn video_url(&self) -> Option<&str> {
        [self.video_url.as_deref(), self.video_url_remote.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
    }

    pub fn to_row(&self) -> EventRow {
        EventRow {
            id: opaque_cell(self.id.as_ref()),
            timestamp: timestamp_cell(self.timestamp_value()),
            tag_id: opaque_cell(self.tag_id.as_ref()),
            video: match self.video_url() {
                Some(href) => VideoCell::Link {
                    href: href.to_string(),
                },
                None => VideoCell::NoVideo,
            },
        }
    }

    /// Label/value pairs for the detail overlay, in display order.
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        let row = self.to_row();
        let mut fields = vec![
            ("ID", row.id),
            ("Timestamp", row.timestamp),
            ("Tag ID", row.tag_id),
            ("Unit", text_cell(self.unit_id.as_deref())),
            ("Direction", text_cell(self.direction.as_deref())),
            ("Asset ID", opaque_cell(self.asset_id.as_ref())),
        ];

        if let Some(asset) = &self.asset_info {
            fields.push(("Asset", text_cell(asset.name.as_deref())));
            let active = match asset.is_active {
                Some(true) => "yes",
                Some(false) => "no",
                None => NOT_AVAILABLE,
            };
            fields.push(("Asset active", active.to_string()));
        }

        fields.push((
            "Received",
            self.received_at
                .as_deref()
                .map(|raw| timestamp_cell(Some(&Value::String(raw.to_string()))))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ));
        fields.push((
            "Video",
            self.video_url().unwrap_or(NO_VIDEO).to_string(),
        ));
        fields
    }
}

/// Decode an `/api/events` body. `null` counts as an empty list; anything
/// other than an array of objects is an error.
pub fn decode_events(body: &[u8]) -> Result<Vec<EventRecord>, serde_json::Error> {
    let events: Option<Vec<EventRecord>> = serde_json::from_slice(body)?;
    Ok(events.unwrap_or_default())
}

/// Render an opaque identifier. Missing, null and empty values become "N/A".
pub fn opaque_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => text_cell(Some(s)),
        Some(other) => other.to_string(),
    }
}

fn text_cell(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn timestamp_cell(value: Option<&Value>) -> String {
    let parsed = match value {
        None | Some(Value::Null) => return NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => parse_timestamp(s),
        // Numbers are epoch milliseconds.
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(|ms| Local.timestamp_millis_opt(ms as i64).single()),
        Some(_) => None,
    };

    match parsed {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse the timestamp shapes the backend is known to emit.
///
/// Strings with an offset are converted to local time. Date-times without
/// one are local already. A bare date is midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        serde_json::from_value(value).expect("valid record")
    }

    fn local(rfc3339: &str) -> String {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    #[test]
    fn full_record_renders_all_cells() {
        let row = record(json!({
            "id": 1,
            "timestamp": "2024-01-01T00:00:00Z",
            "tag_id": "A",
            "video_url": "https://x/v.mp4"
        }))
        .to_row();

        assert_eq!(row.id, "1");
        assert_eq!(row.timestamp, local("2024-01-01T00:00:00Z"));
        assert_eq!(row.tag_id, "A");
        assert_eq!(
            row.video,
            VideoCell::Link {
                href: "https://x/v.mp4".to_string()
            }
        );
        assert_eq!(row.video.label(), "View Video");
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let row = record(json!({})).to_row();
        assert_eq!(row.id, "N/A");
        assert_eq!(row.timestamp, "N/A");
        assert_eq!(row.tag_id, "N/A");
        assert_eq!(row.video, VideoCell::NoVideo);
        assert_eq!(row.video.label(), "No video");
    }

    #[test]
    fn null_and_empty_values_count_as_missing() {
        let row = record(json!({
            "id": null,
            "timestamp": "",
            "tag_id": "",
            "video_url": ""
        }))
        .to_row();
        assert_eq!(row.id, "N/A");
        assert_eq!(row.timestamp, "N/A");
        assert_eq!(row.tag_id, "N/A");
        assert_eq!(row.video, VideoCell::NoVideo);
    }

    #[test]
    fn zero_id_is_rendered_verbatim() {
        assert_eq!(record(json!({ "id": 0 })).to_row().id, "0");
        assert_eq!(record(json!({ "id": "evt-7" })).to_row().id, "evt-7");
    }

    #[test]
    fn backend_wire_names_are_accepted() {
        let rec = record(json!({
            "id": 42,
            "unit_id": "GU-01",
            "timestamp_iso": "2024-03-05T10:20:30+00:00",
            "tag_id": "E2801160",
            "video_url_remote": "https://cdn/clip.mp4",
            "direction": "IN",
            "asset_id": null,
            "asset_info": null,
            "raw_event_payload": { "rssi": -40 },
            "received_at": "2024-03-05T10:20:31.123456"
        }));
        let row = rec.to_row();
        assert_eq!(row.timestamp, local("2024-03-05T10:20:30+00:00"));
        assert_eq!(row.video.href(), Some("https://cdn/clip.mp4"));
    }

    #[test]
    fn short_names_win_over_wire_names() {
        let rec = record(json!({
            "timestamp": "2024-01-01T00:00:00Z",
            "timestamp_iso": "1999-01-01T00:00:00Z",
            "video_url": "https://a/1.mp4",
            "video_url_remote": "https://b/2.mp4"
        }));
        assert_eq!(rec.to_row().timestamp, local("2024-01-01T00:00:00Z"));
        assert_eq!(rec.video_url(), Some("https://a/1.mp4"));
    }

    #[test]
    fn unparseable_timestamp_is_flagged() {
        let row = record(json!({ "timestamp": "yesterday-ish" })).to_row();
        assert_eq!(row.timestamp, INVALID_DATE);
    }

    #[test]
    fn naive_timestamp_is_local_time() {
        let row = record(json!({ "timestamp": "2024-06-01T12:34:56.789" })).to_row();
        assert_eq!(row.timestamp, "2024-06-01 12:34:56");
    }

    #[test]
    fn numeric_timestamp_is_epoch_millis() {
        let row = record(json!({ "timestamp": 1704067200000_i64 })).to_row();
        assert_eq!(row.timestamp, local("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn decode_accepts_arrays_and_null() {
        assert!(decode_events(b"[]").unwrap().is_empty());
        assert!(decode_events(b"null").unwrap().is_empty());
        let events = decode_events(br#"[{"id":1},{"id":2},{"id":3}]"#).unwrap();
        let ids: Vec<String> = events.iter().map(|e| e.to_row().id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn decode_rejects_other_shapes() {
        assert!(decode_events(br#"{"status":"error","message":"Could not fetch events"}"#).is_err());
        assert!(decode_events(b"<html>").is_err());
        assert!(decode_events(b"[1, 2]").is_err());
    }

    #[test]
    fn detail_fields_include_asset_info() {
        let rec = record(json!({
            "id": 5,
            "unit_id": "GU-02",
            "asset_info": { "id": 9, "name": "Forklift", "is_active": false }
        }));
        let fields = rec.detail_fields();
        assert!(fields.contains(&("Unit", "GU-02".to_string())));
        assert!(fields.contains(&("Asset", "Forklift".to_string())));
        assert!(fields.contains(&("Asset active", "no".to_string())));
        assert!(fields.contains(&("Video", "No video".to_string())));
    }
}
