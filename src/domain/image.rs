use std::fmt;

/// Tag assumed when a reference or an engine column omits it
pub const DEFAULT_TAG: &str = "latest";

/// An image as listed by the engine at snapshot time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: String,
    pub repo: String,
    pub tag: String,
}

impl Image {
    pub fn new(id: impl Into<String>, repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            repo: repo.into(),
            tag: tag.into(),
        }
    }

    /// Argument handed to the engine's remove-image command.
    ///
    /// The ID is preferred; `repo:tag` is only used for records without one.
    pub fn removal_target(&self) -> String {
        if self.id.is_empty() {
            format!("{}:{}", self.repo, self.tag)
        } else {
            self.id.clone()
        }
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {}, repo: {}, tag: {}", self.id, self.repo, self.tag)
    }
}

/// A container with its image reference resolved against the image snapshot.
///
/// Empty `image_repo`/`image_tag` mean the image column could not be attributed
/// to any known image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub image_repo: String,
    pub image_tag: String,
}

impl Container {
    pub fn new(
        id: impl Into<String>,
        image_repo: impl Into<String>,
        image_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image_repo: image_repo.into(),
            image_tag: image_tag.into(),
        }
    }

    pub fn unattributed(id: impl Into<String>) -> Self {
        Self::new(id, "", "")
    }

    pub fn is_attributed(&self) -> bool {
        !self.image_repo.is_empty() || !self.image_tag.is_empty()
    }

    pub fn uses(&self, image: &Image) -> bool {
        self.is_attributed() && self.image_repo == image.repo && self.image_tag == image.tag
    }
}

/// Which containers a listing query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerScope {
    All,
    Running,
}

impl fmt::Display for ContainerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Running => write!(f, "running"),
        }
    }
}
