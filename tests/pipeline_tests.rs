use std::collections::HashMap;
use std::fs;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rss::Channel;
use standards_watcher::domain::SourceConfig;
use standards_watcher::errors::{WatcherError, WatcherResult};
use standards_watcher::services::{FeedBuilder, RunService, SourceOutcome, MAX_ENTRIES};
use standards_watcher::sources::PageFetcher;
use standards_watcher::storage::FsFeedStore;
use tempfile::TempDir;

/// Serves canned pages; unknown URLs answer 404.
struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.clone()))
                .collect(),
        }
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> WatcherResult<String> {
        self.pages.get(url).cloned().ok_or_else(|| WatcherError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

const CASC_URL: &str = "https://www.casc.org.cn/zzfb/";
const MOF_URL: &str = "https://kjs.mof.gov.cn/zhengcefabu/";

fn casc() -> SourceConfig {
    SourceConfig::new("casc-zzfb", CASC_URL, "https://www.casc.org.cn", "会计准则委员会｜准则发布")
}

fn mof() -> SourceConfig {
    SourceConfig::new("mof-kjs-zhengcefabu", MOF_URL, "https://kjs.mof.gov.cn", "财政部会计司｜政策发布")
}

fn listing(rows: &[(&str, &str, &str)]) -> String {
    let items: String = rows
        .iter()
        .map(|(href, title, date)| format!("<li><a href=\"{}\">{}</a><span>{}</span></li>", href, title, date))
        .collect();
    format!(
        "<html><body><div class=\"newslist\"><ul>{}</ul></div></body></html>",
        items
    )
}

fn run_once(dir: &TempDir, fetcher: StubFetcher, sources: &[SourceConfig]) -> standards_watcher::services::RunReport {
    let store = FsFeedStore::init(dir.path()).unwrap();
    let service = RunService::new(fetcher, store, FeedBuilder::new("https://feeds.example.org"));
    service.run(sources)
}

fn read_channel(dir: &TempDir, name: &str) -> Channel {
    let xml = fs::read_to_string(dir.path().join(format!("{}.xml", name))).unwrap();
    Channel::read_from(xml.as_bytes()).unwrap()
}

fn pub_date(item: &rss::Item) -> DateTime<Utc> {
    DateTime::parse_from_rfc2822(item.pub_date().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn test_failing_source_does_not_block_the_next() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = StubFetcher::new(&[(
        MOF_URL,
        listing(&[("./202403/t1.htm", "企业会计准则解释第17号", "2024-03-05")]),
    )]);

    let report = run_once(&temp_dir, fetcher, &[casc(), mof()]);

    assert!(matches!(report.outcome("casc-zzfb"), Some(SourceOutcome::Failed { .. })));
    assert!(matches!(report.outcome("mof-kjs-zhengcefabu"), Some(SourceOutcome::Written { .. })));
    assert!(!temp_dir.path().join("casc-zzfb.xml").exists());

    let channel = read_channel(&temp_dir, "mof-kjs-zhengcefabu");
    assert_eq!(channel.title(), "财政部会计司｜政策发布");
    assert_eq!(channel.items().len(), 1);
    assert_eq!(
        channel.items()[0].link(),
        Some("https://kjs.mof.gov.cn/./202403/t1.htm")
    );
}

#[test]
fn test_each_run_replaces_the_feed() {
    let temp_dir = TempDir::new().unwrap();

    let first = StubFetcher::new(&[(CASC_URL, listing(&[("/old.htm", "旧通知", "2023-01-01")]))]);
    run_once(&temp_dir, first, &[casc()]);

    let second = StubFetcher::new(&[(CASC_URL, listing(&[("/new.htm", "新通知", "2024-01-01")]))]);
    run_once(&temp_dir, second, &[casc()]);

    let channel = read_channel(&temp_dir, "casc-zzfb");
    let titles: Vec<&str> = channel.items().iter().filter_map(|i| i.title()).collect();
    assert_eq!(titles, vec!["新通知"]);
}

#[test]
fn test_empty_listing_keeps_previous_feed() {
    let temp_dir = TempDir::new().unwrap();

    let first = StubFetcher::new(&[(CASC_URL, listing(&[("/a.htm", "通知", "2024-01-01")]))]);
    run_once(&temp_dir, first, &[casc()]);

    let second = StubFetcher::new(&[(CASC_URL, "<html><body>维护中</body></html>".to_string())]);
    let report = run_once(&temp_dir, second, &[casc()]);

    assert_eq!(report.outcome("casc-zzfb"), Some(&SourceOutcome::Empty));
    assert_eq!(read_channel(&temp_dir, "casc-zzfb").items().len(), 1);
}

#[test]
fn test_caps_order_and_stable_guids_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    // 100 rows with shuffled-looking dates; only the first 80 are considered.
    let rows: Vec<(String, String, String)> = (0..100)
        .map(|n| {
            let day = start + Duration::days(((n * 37) % 100) as i64);
            (format!("/n/{}.htm", n), format!("条目{}", n), day.format("%Y年%m月%d日").to_string())
        })
        .collect();
    let borrowed: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|(h, t, d)| (h.as_str(), t.as_str(), d.as_str()))
        .collect();
    let html = listing(&borrowed);

    run_once(&temp_dir, StubFetcher::new(&[(CASC_URL, html.clone())]), &[casc()]);
    let first = read_channel(&temp_dir, "casc-zzfb");

    assert_eq!(first.items().len(), MAX_ENTRIES);

    let dates: Vec<DateTime<Utc>> = first.items().iter().map(pub_date).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]), "newest first");

    let considered: Vec<i64> = (0..80).map(|n| (n * 37) % 100).collect();
    let mut offsets = considered.clone();
    offsets.sort_unstable_by(|a, b| b.cmp(a));
    let newest = start + Duration::days(offsets[0]);
    assert_eq!(dates[0].date_naive(), newest);
    let oldest_kept = start + Duration::days(offsets[MAX_ENTRIES - 1]);
    assert_eq!(dates[MAX_ENTRIES - 1].date_naive(), oldest_kept);

    run_once(&temp_dir, StubFetcher::new(&[(CASC_URL, html)]), &[casc()]);
    let second = read_channel(&temp_dir, "casc-zzfb");

    let guids = |c: &Channel| -> Vec<String> {
        c.items()
            .iter()
            .map(|i| i.guid().unwrap().value().to_string())
            .collect()
    };
    assert_eq!(guids(&first), guids(&second));
}
