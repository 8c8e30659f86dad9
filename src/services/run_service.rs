use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::domain::{RawItem, SourceConfig};
use crate::errors::WatcherResult;
use crate::extract::extract_items;
use crate::services::feed_builder::FeedBuilder;
use crate::sources::PageFetcher;
use crate::storage::FeedStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Feed file replaced.
    Written {
        path: PathBuf,
        entries: usize,
        undated: usize,
    },
    /// Page fetched but nothing extracted; the previous file is left alone.
    Empty,
    /// Fetch, extraction setup or write failed; the previous file is left alone.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub outcome: SourceOutcome,
}

/// Per-source results of one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    pub fn outcome(&self, name: &str) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, SourceOutcome::Written { .. }))
    }

    pub fn empty(&self) -> usize {
        self.count(|o| matches!(o, SourceOutcome::Empty))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SourceOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&SourceOutcome) -> bool) -> usize {
        self.sources.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Fetch `source`'s listing page and extract its items.
pub fn collect<F: PageFetcher + ?Sized>(fetcher: &F, source: &SourceConfig) -> WatcherResult<Vec<RawItem>> {
    let html = fetcher.fetch(&source.url)?;
    extract_items(source, &html)
}

/// Drives fetch, extract, build and write for each source, one at a time.
pub struct RunService<F: PageFetcher, S: FeedStore> {
    fetcher: F,
    store: S,
    builder: FeedBuilder,
}

impl<F: PageFetcher, S: FeedStore> RunService<F, S> {
    pub fn new(fetcher: F, store: S, builder: FeedBuilder) -> Self {
        Self {
            fetcher,
            store,
            builder,
        }
    }

    /// Fetch and extract a source without building or writing anything.
    pub fn collect(&self, source: &SourceConfig) -> WatcherResult<Vec<RawItem>> {
        collect(&self.fetcher, source)
    }

    /// Process one source end to end.
    #[instrument(level = "info", skip_all, fields(source = %source.name))]
    pub fn process(&self, source: &SourceConfig) -> WatcherResult<SourceOutcome> {
        let items = self.collect(source)?;

        if items.is_empty() {
            return Ok(SourceOutcome::Empty);
        }

        let undated = items.iter().filter(|i| !i.dated).count();
        let doc = self.builder.build_for(source, items);
        let xml = self.builder.render(&doc)?;
        let path = self.store.write(&source.name, &xml)?;

        Ok(SourceOutcome::Written {
            path,
            entries: doc.entries.len(),
            undated,
        })
    }

    /// Process every source. A failing source is logged and skipped; it
    /// never stops the others.
    pub fn run<'a, I>(&self, sources: I) -> RunReport
    where
        I: IntoIterator<Item = &'a SourceConfig>,
    {
        let mut report = RunReport::default();

        for source in sources {
            let outcome = match self.process(source) {
                Ok(outcome) => outcome,
                Err(e) => SourceOutcome::Failed {
                    error: e.to_string(),
                },
            };

            log_outcome(&source.name, &outcome);
            report.sources.push(SourceReport {
                name: source.name.clone(),
                outcome,
            });
        }

        info!(
            written = report.written(),
            empty = report.empty(),
            failed = report.failed(),
            "Run complete"
        );

        report
    }
}

fn log_outcome(name: &str, outcome: &SourceOutcome) {
    match outcome {
        SourceOutcome::Written {
            path,
            entries,
            undated,
        } => {
            info!(source = %name, path = %path.display(), entries, undated, "Wrote feed");
        }
        SourceOutcome::Empty => {
            warn!(source = %name, "No items parsed");
        }
        SourceOutcome::Failed { error } => {
            error!(source = %name, %error, "Source failed");
        }
    }
}
