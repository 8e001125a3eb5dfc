//! Small utility helpers used across modules.

use std::time::{SystemTime, UNIX_EPOCH};

/// `part / whole` as a whole-number percentage, halves rounding up.
/// Returns 0 for an empty `whole`.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
  if whole == 0 {
    return 0;
  }
  let part = part.min(whole) as u64;
  let whole = whole as u64;
  ((part * 200 + whole) / (whole * 2)) as u8
}

/// Seconds since the Unix epoch; 0 if the clock is before it.
pub fn unix_seconds() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_secs())
    .unwrap_or(0)
}

/// Log-safe truncation for large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn percent_rounds_like_the_ui() {
    assert_eq!(rounded_percent(0, 0), 0);
    assert_eq!(rounded_percent(1, 3), 33);
    assert_eq!(rounded_percent(2, 3), 67);
    assert_eq!(rounded_percent(1, 8), 13); // 12.5
    assert_eq!(rounded_percent(3, 3), 100);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert!(trunc_for_log("ééééé", 2).starts_with("éé…"));
  }
}
