use super::RmiError;
use super::image::{DEFAULT_TAG, Image};
use std::fmt;

/// A user-supplied image reference.
///
/// `repo:tag` input only populates `repo` and `tag`. Input without a colon is
/// kept both as an ID prefix and as `repo` with the default tag, since users
/// type either form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub repo: String,
    pub tag: String,
    pub id: String,
}

impl Reference {
    pub fn parse(input: &str) -> Result<Self, RmiError> {
        if input.is_empty() {
            return Err(RmiError::InvalidReference(input.to_string()));
        }

        match input.split_once(':') {
            Some(("", _)) => Err(RmiError::InvalidReference(input.to_string())),
            Some((repo, tag)) => Ok(Self::repo_tag(repo, tag)),
            None => Ok(Self {
                repo: input.to_string(),
                tag: DEFAULT_TAG.to_string(),
                id: input.to_string(),
            }),
        }
    }

    pub fn repo_tag(repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            tag: tag.into(),
            id: String::new(),
        }
    }

    pub fn id_prefix(id: impl Into<String>) -> Self {
        Self {
            repo: String::new(),
            tag: String::new(),
            id: id.into(),
        }
    }

    /// True when the input carried no colon and both interpretations apply
    pub fn is_bare(&self) -> bool {
        !self.id.is_empty() && !self.repo.is_empty()
    }

    pub fn matches_id(&self, image: &Image) -> bool {
        !self.id.is_empty() && image.id.starts_with(&self.id)
    }

    pub fn matches_repo_tag(&self, image: &Image) -> bool {
        !self.repo.is_empty() && image.repo == self.repo && image.tag == self.tag
    }

    pub fn matches(&self, image: &Image) -> bool {
        self.matches_repo_tag(image) || self.matches_id(image)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {}, repo: {}, tag: {}", self.id, self.repo, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_and_tag() {
        let r = Reference::parse("nginx:1.25").unwrap();
        assert_eq!(r, Reference::repo_tag("nginx", "1.25"));
        assert!(!r.is_bare());
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let r = Reference::parse("a:b:c").unwrap();
        assert_eq!(r.repo, "a");
        assert_eq!(r.tag, "b:c");
    }

    #[test]
    fn test_parse_trailing_colon_keeps_empty_tag() {
        let r = Reference::parse("nginx:").unwrap();
        assert_eq!(r.repo, "nginx");
        assert_eq!(r.tag, "");
    }

    #[test]
    fn test_parse_bare_token_has_both_interpretations() {
        let r = Reference::parse("abc123").unwrap();
        assert_eq!(r.id, "abc123");
        assert_eq!(r.repo, "abc123");
        assert_eq!(r.tag, "latest");
        assert!(r.is_bare());
    }

    #[test]
    fn test_parse_rejects_leading_colon() {
        assert!(matches!(
            Reference::parse(":latest"),
            Err(RmiError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(
            Reference::parse(""),
            Err(RmiError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let img = Image::new("ABCDEF", "Nginx", "latest");
        assert!(!Reference::parse("nginx").unwrap().matches(&img));
        assert!(!Reference::parse("abc").unwrap().matches(&img));
        assert!(Reference::parse("ABC").unwrap().matches(&img));
    }

    #[test]
    fn test_id_prefix_never_matches_empty_query() {
        let r = Reference::repo_tag("nginx", "latest");
        assert!(!r.matches_id(&Image::new("abc", "other", "latest")));
    }
}
