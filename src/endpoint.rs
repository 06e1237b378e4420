//! URL joining and the path templates of the endpoints this crate wraps.

use crate::error::{ApiError, ErrorDetails};

/// Joins `base` and `path` with exactly one `/` between them.
pub fn build_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Escapes `segment` so it parses back as exactly one path segment.
///
/// `/`, `\`, `?`, `#` and `%` are percent-encoded; spaces and non-ASCII are
/// left for the URL parser. Empty, `.` and `..` segments are rejected since
/// the parser drops or resolves them whatever their encoding.
pub fn encode_path_segment(segment: &str) -> Result<String, ApiError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ApiError::generic(ErrorDetails::new(format!(
            "Invalid path segment: {segment:?}"
        ))));
    }

    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '\\' => out.push_str("%5C"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            c => out.push(c),
        }
    }
    Ok(out)
}

pub fn search_player_path(membership_type: &str, display_name: &str) -> Result<String, ApiError> {
    Ok(format!(
        "/Destiny2/SearchDestinyPlayer/{membership_type}/{}",
        encode_path_segment(display_name)?
    ))
}

pub fn profile_path(membership_type: i32, membership_id: &str) -> Result<String, ApiError> {
    Ok(format!(
        "/Destiny2/{membership_type}/Profile/{}/",
        encode_path_segment(membership_id)?
    ))
}

pub fn activity_history_path(
    membership_type: i32,
    membership_id: &str,
    character_id: &str,
) -> Result<String, ApiError> {
    Ok(format!(
        "/Destiny2/{membership_type}/Account/{}/Character/{}/Stats/Activities/",
        encode_path_segment(membership_id)?,
        encode_path_segment(character_id)?
    ))
}
