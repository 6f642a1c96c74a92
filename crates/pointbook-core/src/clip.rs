//! Clip links: deep links into game footage that seek to a point.
//!
//! Footage lives on third-party hosts. Each host spells "start playback at"
//! differently, so the base URL is classified into a [`Provider`] once and the
//! seek marker is appended accordingly. Every input has a defined result; an
//! empty string means there is no link to show.

// ─── Provider ────────────────────────────────────────────────────────────────

/// The video hosts a clip link knows how to seek into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
  /// Takes the timestamp exactly as typed, in a `#t=` fragment.
  Veo,
  /// YouTube and Google Drive: a `t=<seconds>` query parameter.
  YouTubeFamily,
  /// Anything else; linked without a seek marker.
  Unknown,
}

impl Provider {
  /// Classify `url` by case-insensitive substring; first match wins.
  pub fn detect(url: &str) -> Self {
    let lower = url.to_lowercase();
    if lower.contains("veo") {
      Self::Veo
    } else if ["youtube", "youtu.be", "drive.google.com"]
      .iter()
      .any(|needle| lower.contains(needle))
    {
      Self::YouTubeFamily
    } else {
      Self::Unknown
    }
  }
}

// ─── Timestamps ──────────────────────────────────────────────────────────────

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into a total number of seconds.
///
/// Components are not range-checked (`"99:99"` is 6039 seconds). Any other
/// shape, or a component that is not a non-negative integer, yields 0.
pub fn parse_timestamp(raw: &str) -> u64 {
  let parts: Option<Vec<u64>> = raw
    .split(':')
    .map(|part| part.trim().parse::<u64>().ok())
    .collect();

  let total = match parts.as_deref() {
    Some([hh, mm, ss]) => hh
      .checked_mul(3600)
      .and_then(|h| mm.checked_mul(60).and_then(|m| h.checked_add(m)))
      .and_then(|hm| hm.checked_add(*ss)),
    Some([mm, ss]) => mm.checked_mul(60).and_then(|m| m.checked_add(*ss)),
    Some([ss]) => Some(*ss),
    _ => None,
  };

  total.unwrap_or(0)
}

// ─── Links ───────────────────────────────────────────────────────────────────

/// Build a playback URL for `base_url` that starts at `raw_timestamp`.
pub fn build_clip_url(base_url: &str, raw_timestamp: &str) -> String {
  if base_url.is_empty() {
    return String::new();
  }

  match Provider::detect(base_url) {
    Provider::Veo => format!("{base_url}#t={raw_timestamp}"),
    Provider::YouTubeFamily => {
      let seconds = parse_timestamp(raw_timestamp);
      if seconds == 0 {
        return base_url.to_owned();
      }
      let sep = if base_url.contains('?') { '&' } else { '?' };
      format!("{base_url}{sep}t={seconds}")
    }
    Provider::Unknown => base_url.to_owned(),
  }
}

/// Pick the footage for a point and build its clip link.
///
/// A per-point video URL wins over the game's footage URL when it is not
/// blank. Returns `None` when there is nothing to link to.
pub fn resolve_clip_url(
  point_video_url: Option<&str>,
  footage_url: Option<&str>,
  raw_timestamp: Option<&str>,
) -> Option<String> {
  let base = point_video_url
    .map(str::trim)
    .filter(|u| !u.is_empty())
    .or(footage_url)
    .unwrap_or_default();
  let timestamp = raw_timestamp.map(str::trim).unwrap_or_default();

  let url = build_clip_url(base, timestamp);
  (!url.is_empty()).then_some(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_all_three_shapes() {
    assert_eq!(parse_timestamp("45"), 45);
    assert_eq!(parse_timestamp("01:30"), 90);
    assert_eq!(parse_timestamp("93:40"), 93 * 60 + 40);
    assert_eq!(parse_timestamp("01:02:03"), 3723);
    assert_eq!(parse_timestamp("99:99"), 99 * 60 + 99);
  }

  #[test]
  fn unparsable_timestamps_fall_back_to_zero() {
    assert_eq!(parse_timestamp(""), 0);
    assert_eq!(parse_timestamp("abc"), 0);
    assert_eq!(parse_timestamp("1:2:3:4"), 0);
    assert_eq!(parse_timestamp("01:xx"), 0);
    assert_eq!(parse_timestamp("-5"), 0);
  }

  #[test]
  fn detects_providers_case_insensitively() {
    assert_eq!(Provider::detect("https://app.VEO.co/matches/1"), Provider::Veo);
    assert_eq!(Provider::detect("https://www.YouTube.com/watch?v=a"), Provider::YouTubeFamily);
    assert_eq!(Provider::detect("https://youtu.be/a"), Provider::YouTubeFamily);
    assert_eq!(
      Provider::detect("https://drive.google.com/file/d/x/view"),
      Provider::YouTubeFamily
    );
    assert_eq!(Provider::detect("https://vimeo.com/1"), Provider::Unknown);
  }

  #[test]
  fn veo_takes_precedence() {
    // Contains both "veo" and "youtube"; the first rule wins.
    assert_eq!(
      build_clip_url("https://youtube.com/veo-highlights", "1:00"),
      "https://youtube.com/veo-highlights#t=1:00"
    );
  }

  #[test]
  fn empty_base_has_no_link() {
    assert_eq!(build_clip_url("", "01:00"), "");
  }

  #[test]
  fn veo_keeps_raw_timestamp() {
    assert_eq!(
      build_clip_url("https://veo.co/abc", "93:40"),
      "https://veo.co/abc#t=93:40"
    );
  }

  #[test]
  fn youtube_appends_seconds() {
    assert_eq!(
      build_clip_url("https://youtube.com/watch?v=xyz", "01:30"),
      "https://youtube.com/watch?v=xyz&t=90"
    );
    assert_eq!(
      build_clip_url("https://youtu.be/xyz", "75"),
      "https://youtu.be/xyz?t=75"
    );
  }

  #[test]
  fn youtube_zero_or_invalid_timestamp_leaves_url_bare() {
    assert_eq!(build_clip_url("https://youtu.be/xyz", "00:00:00"), "https://youtu.be/xyz");
    assert_eq!(build_clip_url("https://youtu.be/xyz", "soon"), "https://youtu.be/xyz");
  }

  #[test]
  fn unknown_provider_is_linked_bare() {
    assert_eq!(
      build_clip_url("https://example.com/video", "01:30"),
      "https://example.com/video"
    );
  }

  #[test]
  fn point_override_wins_when_not_blank() {
    assert_eq!(
      resolve_clip_url(
        Some("  https://youtu.be/point  "),
        Some("https://youtu.be/game"),
        Some(" 00:10 "),
      )
      .as_deref(),
      Some("https://youtu.be/point?t=10")
    );
    assert_eq!(
      resolve_clip_url(Some("   "), Some("https://youtu.be/game"), Some("00:10")).as_deref(),
      Some("https://youtu.be/game?t=10")
    );
  }

  #[test]
  fn no_footage_means_no_link() {
    assert_eq!(resolve_clip_url(None, None, Some("00:10")), None);
    assert_eq!(resolve_clip_url(Some(""), Some(""), None), None);
  }
}
