use crate::config::FilterConfig;
use crate::models::ChannelEntry;

/// Result of testing one entry against the keyword lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Hit an exclusion keyword; inclusion was not consulted
    Excluded,
    Included,
    /// No keyword of either list matched
    Unmatched,
}

/// Case-insensitive keyword filter over metadata line and stream URL.
///
/// Keywords are lower-cased once here; a hit in either field counts. Keywords
/// are plain substrings, so an empty keyword matches every entry.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include.iter().map(|k| k.as_ref().to_lowercase()).collect(),
            exclude: exclude.iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(&config.include, &config.exclude)
    }

    pub fn evaluate(&self, entry: &ChannelEntry) -> FilterDecision {
        let metadata = entry.metadata_line.to_lowercase();
        let url = entry.stream_url.to_lowercase();
        let hit = |keyword: &String| metadata.contains(keyword.as_str()) || url.contains(keyword.as_str());

        if self.exclude.iter().any(hit) {
            FilterDecision::Excluded
        } else if self.include.iter().any(hit) {
            FilterDecision::Included
        } else {
            FilterDecision::Unmatched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::include_hit("#EXTINF:-1,CCTV1", "http://x/1", &["CCTV"], &[], FilterDecision::Included)]
    #[case::exclusion_wins("#EXTINF:-1,CCTV-test", "http://x/1", &["CCTV"], &["test"], FilterDecision::Excluded)]
    #[case::case_insensitive("#EXTINF:-1,bbc world", "http://x/1", &["BBC"], &[], FilterDecision::Included)]
    #[case::hit_in_url_only("#EXTINF:-1,Channel 5", "http://fox.example/5", &["FOX"], &[], FilterDecision::Included)]
    #[case::exclusion_in_url("#EXTINF:-1,CNN", "http://ads.example/Test/cnn", &["CNN"], &["TEST"], FilterDecision::Excluded)]
    #[case::no_hit("#EXTINF:-1,Cooking", "http://x/cook", &["CCTV", "BBC"], &["广告"], FilterDecision::Unmatched)]
    #[case::cjk_keyword("#EXTINF:-1 group-title=\"新闻\",凤凰卫视", "http://x/2", &["新闻"], &["测试"], FilterDecision::Included)]
    #[case::cjk_exclusion("#EXTINF:-1,购物广告台", "http://x/3", &["台"], &["广告"], FilterDecision::Excluded)]
    #[case::empty_lists("#EXTINF:-1,CCTV1", "http://x/1", &[], &[], FilterDecision::Unmatched)]
    fn test_evaluate(
        #[case] metadata: &str,
        #[case] url: &str,
        #[case] include: &[&str],
        #[case] exclude: &[&str],
        #[case] expected: FilterDecision,
    ) {
        let filter = KeywordFilter::new(include, exclude);
        assert_eq!(filter.evaluate(&ChannelEntry::new(metadata, url)), expected);
    }

    #[test]
    fn test_keyword_spanning_fields_does_not_match() {
        // Fields are tested separately, never joined.
        let filter = KeywordFilter::new(&["1http"], &[]);
        assert_eq!(
            filter.evaluate(&ChannelEntry::new("#EXTINF:-1,CCTV1", "http://x/1")),
            FilterDecision::Unmatched
        );
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        let filter = KeywordFilter::new(&[""], &[]);
        assert_eq!(
            filter.evaluate(&ChannelEntry::new("#EXTINF:-1,Anything", "http://x/1")),
            FilterDecision::Included
        );
    }

    #[test]
    fn test_from_config() {
        let config = FilterConfig {
            include: vec!["CNN".to_string()],
            exclude: vec!["Backup".to_string()],
        };
        let filter = KeywordFilter::from_config(&config);
        assert_eq!(
            filter.evaluate(&ChannelEntry::new("#EXTINF:-1,CNN", "http://x/cnn")),
            FilterDecision::Included
        );
        assert_eq!(
            filter.evaluate(&ChannelEntry::new("#EXTINF:-1,CNN backup", "http://x/cnn")),
            FilterDecision::Excluded
        );
    }
}
