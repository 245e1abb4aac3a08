use crate::utils::constants::AREA_CLASS_PREFIX;

/// Reduce an area classification URI to its human readable label
///
/// Keeps the last path segment, drops the vocabulary prefix token and turns
/// the remaining hyphens into spaces, e.g.
/// `".../areaclassification-urban-traffic"` becomes `"urban traffic"`.
pub fn simplify_area_classification(raw: &str) -> String {
    let segment = raw.rsplit('/').next().unwrap_or(raw);
    segment.replace(AREA_CLASS_PREFIX, "").replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_vocabulary_uri() {
        let raw = "http://dd.eionet.europa.eu/vocabulary/aq/areaclassification/areaclassification-urban-traffic";
        assert_eq!(simplify_area_classification(raw), "urban traffic");
    }

    #[test]
    fn test_simplify_single_token() {
        let raw = "https://example.org/areaclassification-rural";
        assert_eq!(simplify_area_classification(raw), "rural");
    }

    #[test]
    fn test_simplify_without_slashes() {
        assert_eq!(
            simplify_area_classification("areaclassification-suburban"),
            "suburban"
        );
    }

    #[test]
    fn test_simplify_plain_label_passes_through() {
        assert_eq!(simplify_area_classification("urban"), "urban");
    }
}
