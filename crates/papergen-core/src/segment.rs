//! Splitting generated text into the labelled papers
//!
//! The upstream model is asked to label its two papers "1." and "2.". There
//! is no structured contract behind that, so the split is positional: start
//! three characters after the first `1`, then cut on every literal `2.`.
//! Output that does not follow the labelling yields odd segments; that is
//! not an error.

/// Characters skipped after the first `1` (the label and its separator)
pub const LABEL_OFFSET: usize = 3;

/// Marker that separates the first paper from the second
pub const SECOND_MARKER: &str = "2.";

/// Split accumulated output into segments.
///
/// - empty text: no segments
/// - no `1` anywhere: the whole text is the only segment
/// - otherwise: the text after the offset, split on [`SECOND_MARKER`]
///
/// Pieces are returned as cut, surrounding whitespace and empty pieces
/// included; trimming is up to whoever renders them.
pub fn segment(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let Some(first_label) = text.find('1') else {
        tracing::debug!("no \"1\" label in generated text, keeping it whole");
        return vec![text.to_string()];
    };

    let body: String = text[first_label..].chars().skip(LABEL_OFFSET).collect();

    body.split(SECOND_MARKER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_labelled_papers() {
        let segments = segment("1. Paper A text here 2. Paper B text here");
        assert_eq!(segments, vec!["Paper A text here ", " Paper B text here"]);
    }

    #[test]
    fn test_missing_second_marker_gives_one_entry() {
        let segments = segment("1. Only one paper was produced");
        assert_eq!(segments, vec!["Only one paper was produced"]);
    }

    #[test]
    fn test_whitespace_after_offset_is_still_one_entry() {
        assert_eq!(segment("1.  "), vec![" "]);
        assert_eq!(segment("1. "), vec![""]);
    }

    #[test]
    fn test_pieces_are_kept_as_cut() {
        assert_eq!(segment("1. A 2. "), vec!["A ", " "]);
    }

    #[test]
    fn test_leading_noise_before_first_label() {
        let segments = segment("Sure! Here they are:\n\n1. Alpha\n\n2. Beta");
        assert_eq!(segments, vec!["Alpha\n\n", " Beta"]);
    }

    #[test]
    fn test_no_label_returns_raw_text() {
        let segments = segment("  An unlabelled answer  ");
        assert_eq!(segments, vec!["  An unlabelled answer  "]);
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_offset_counts_characters() {
        // The offset must not land inside a multi-byte character
        let segments = segment("1.é Première 2. Seconde");
        assert_eq!(segments, vec![" Première ", " Seconde"]);
    }

    #[test]
    fn test_marker_inside_content_also_splits() {
        let segments = segment("1. Uses HTTP/2. Then more 2. Second");
        assert_eq!(segments, vec!["Uses HTTP/", " Then more ", " Second"]);
    }
}
