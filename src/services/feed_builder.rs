use chrono::{DateTime, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, Guid, Item};
use md5::{Digest, Md5};

use crate::domain::{FeedDocument, FeedEntry, FeedLink, LinkRel, RawItem, SourceConfig};
use crate::errors::{WatcherError, WatcherResult};

/// Entries kept per feed, newest first.
pub const MAX_ENTRIES: usize = 60;
pub const FEED_LANGUAGE: &str = "zh-cn";

const GENERATOR: &str = concat!("standards-watcher/", env!("CARGO_PKG_VERSION"));

/// Stable id for an item: hex MD5 of URL followed by title.
///
/// Feeds are rebuilt from scratch each run, so readers rely on this staying
/// the same for the same logical item.
pub fn entry_id(url: &str, title: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct FeedBuilder {
    publish_base: String,
}

impl FeedBuilder {
    pub fn new(publish_base: impl Into<String>) -> Self {
        Self {
            publish_base: publish_base.into(),
        }
    }

    /// Public URL of the feed file for `name`.
    pub fn self_link(&self, name: &str) -> String {
        format!("{}/{}.xml", self.publish_base.trim_end_matches('/'), name)
    }

    pub fn build_for(&self, source: &SourceConfig, items: Vec<RawItem>) -> FeedDocument {
        self.build(&source.name, &source.title, &source.url, items)
    }

    pub fn build(&self, name: &str, title: &str, source_url: &str, items: Vec<RawItem>) -> FeedDocument {
        self.build_at(name, title, source_url, items, Utc::now())
    }

    pub fn build_at(
        &self,
        name: &str,
        title: &str,
        source_url: &str,
        mut items: Vec<RawItem>,
        built_at: DateTime<Utc>,
    ) -> FeedDocument {
        // Stable: equal timestamps keep extraction order.
        items.sort_by(|a, b| b.published.cmp(&a.published));
        items.truncate(MAX_ENTRIES);

        let entries = items
            .into_iter()
            .map(|item| FeedEntry {
                id: entry_id(&item.url, &item.title),
                title: item.title,
                link: item.url,
                published: item.published,
            })
            .collect();

        FeedDocument {
            id: source_url.to_string(),
            title: title.to_string(),
            links: vec![
                FeedLink {
                    href: source_url.to_string(),
                    rel: LinkRel::Alternate,
                },
                FeedLink {
                    href: self.self_link(name),
                    rel: LinkRel::SelfLink,
                },
            ],
            language: FEED_LANGUAGE.to_string(),
            entries,
            built_at,
        }
    }

    /// Serialize as pretty-printed RSS 2.0.
    pub fn render(&self, doc: &FeedDocument) -> WatcherResult<String> {
        let buf = to_channel(doc).pretty_write_to(Vec::new(), b' ', 2)?;
        String::from_utf8(buf).map_err(|e| WatcherError::FeedRender(e.to_string()))
    }
}

fn to_channel(doc: &FeedDocument) -> Channel {
    let mut channel = Channel::default();
    channel.set_title(doc.title.clone());
    channel.set_link(doc.alternate_link().unwrap_or(&doc.id).to_string());
    channel.set_description(doc.title.clone());
    channel.set_language(doc.language.clone());
    channel.set_generator(GENERATOR.to_string());
    channel.set_last_build_date(doc.built_at.to_rfc2822());

    if let Some(href) = doc.self_link() {
        let mut link = Link::default();
        link.set_href(href);
        link.set_rel(LinkRel::SelfLink.as_str());
        link.set_mime_type(Some("application/rss+xml".to_string()));

        let mut atom = AtomExtension::default();
        atom.set_links(vec![link]);
        channel.set_atom_ext(atom);
    }

    channel.set_items(doc.entries.iter().map(to_item).collect::<Vec<_>>());
    channel
}

fn to_item(entry: &FeedEntry) -> Item {
    let mut guid = Guid::default();
    guid.set_value(entry.id.clone());
    guid.set_permalink(false);

    let mut item = Item::default();
    item.set_title(entry.title.clone());
    item.set_link(entry.link.clone());
    item.set_guid(guid);
    item.set_pub_date(entry.published.to_rfc2822());
    item
}
