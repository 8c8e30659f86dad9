use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRel {
    Alternate,
    SelfLink,
}

impl LinkRel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRel::Alternate => "alternate",
            LinkRel::SelfLink => "self",
        }
    }
}

impl std::fmt::Display for LinkRel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLink {
    pub href: String,
    pub rel: LinkRel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

/// The published feed for one source, rebuilt from scratch every run.
///
/// Entries are newest first and never more than the builder's cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub links: Vec<FeedLink>,
    pub language: String,
    pub entries: Vec<FeedEntry>,
    pub built_at: DateTime<Utc>,
}

impl FeedDocument {
    pub fn link(&self, rel: LinkRel) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
    }

    pub fn alternate_link(&self) -> Option<&str> {
        self.link(LinkRel::Alternate)
    }

    pub fn self_link(&self) -> Option<&str> {
        self.link(LinkRel::SelfLink)
    }
}
