//! Delimited-string field codecs
//!
//! The hosted store has no native list fields, so list-shaped data rides in
//! comma-delimited text columns. That encoding is a storage artifact, not a
//! domain concept: it happens only here, one function pair per field shape,
//! and the rest of the codebase works with real lists.

use pulse_core::RecordId;

/// Hard cap on encoded text columns in the hosted store. The real column is
/// 255; a few characters are left as headroom.
pub const MAX_FIELD_LEN: usize = 250;

const SEPARATOR: char = ',';

/// Encode an id list (participants, read-by) as comma-delimited text
pub fn encode_id_list(ids: &[RecordId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a comma-delimited id list
///
/// Whitespace around entries is tolerated; empty and non-numeric entries are
/// skipped, matching how the stored data actually looks after years of ad-hoc
/// writes.
pub fn decode_id_list(encoded: &str) -> Vec<RecordId> {
    encoded
        .split(SEPARATOR)
        .filter_map(|part| RecordId::parse(part).ok())
        .collect()
}

/// Encode an ordered media URL list into the bounded text column
///
/// Each URL is truncated to [`MAX_FIELD_LEN`] characters, and URLs are
/// appended only while the whole encoded string stays within the budget;
/// the remainder is dropped. Order is preserved.
pub fn encode_media_urls(urls: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut encoded_len = 0;

    for url in urls {
        let truncated = truncate_url(url);
        let candidate_len = if kept.is_empty() {
            truncated.len()
        } else {
            encoded_len + 1 + truncated.len()
        };
        if candidate_len > MAX_FIELD_LEN {
            break;
        }
        kept.push(truncated);
        encoded_len = candidate_len;
    }

    kept.join(",")
}

/// Decode a comma-delimited media URL list
pub fn decode_media_urls(encoded: &str) -> Vec<String> {
    encoded
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// First media URL, truncated for the legacy single-image column
pub fn primary_media_url(urls: &[String]) -> Option<String> {
    urls.first().map(|url| truncate_url(url).to_string())
}

fn truncate_url(url: &str) -> &str {
    match url.char_indices().nth(MAX_FIELD_LEN) {
        Some((index, _)) => &url[..index],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_list_round_trip() {
        let ids = vec![RecordId::new(3), RecordId::new(1), RecordId::new(7)];
        let decoded = decode_id_list(&encode_id_list(&ids));
        assert_eq!(decoded, ids);
    }

    #[test]
    fn test_id_list_round_trip_as_set() {
        // Order-independent set equality survives the encoding
        let ids: HashSet<RecordId> = [5, 2, 9].into_iter().map(RecordId::new).collect();
        let encoded = encode_id_list(&ids.iter().copied().collect::<Vec<_>>());
        let decoded: HashSet<RecordId> = decode_id_list(&encoded).into_iter().collect();
        assert_eq!(decoded, ids);
    }

    #[test]
    fn test_decode_id_list_tolerates_noise() {
        assert_eq!(
            decode_id_list(" 1 , 2 ,, junk ,3"),
            vec![RecordId::new(1), RecordId::new(2), RecordId::new(3)]
        );
        assert!(decode_id_list("").is_empty());
    }

    #[test]
    fn test_media_urls_round_trip() {
        let urls = vec![
            "https://cdn.example.com/a.png".to_string(),
            "https://cdn.example.com/b.png".to_string(),
        ];
        assert_eq!(decode_media_urls(&encode_media_urls(&urls)), urls);
    }

    #[test]
    fn test_media_url_truncated_to_field_budget() {
        let long = format!("https://cdn.example.com/{}", "x".repeat(400));
        let encoded = encode_media_urls(&[long]);
        assert_eq!(encoded.len(), MAX_FIELD_LEN);
    }

    #[test]
    fn test_media_urls_stop_at_field_budget() {
        // Each URL is 100 chars; the third would push the encoding past 250
        let url = format!("https://cdn.example.com/{}", "y".repeat(76));
        assert_eq!(url.len(), 100);
        let urls = vec![url.clone(), url.clone(), url.clone()];

        let encoded = encode_media_urls(&urls);
        assert!(encoded.len() <= MAX_FIELD_LEN);
        assert_eq!(decode_media_urls(&encoded).len(), 2);
    }

    #[test]
    fn test_primary_media_url() {
        let urls = vec!["https://cdn.example.com/a.png".to_string()];
        assert_eq!(primary_media_url(&urls), Some(urls[0].clone()));
        assert_eq!(primary_media_url(&[]), None);
    }

    #[test]
    fn test_empty_media_list_encodes_empty() {
        assert_eq!(encode_media_urls(&[]), "");
        assert!(decode_media_urls("").is_empty());
    }
}
