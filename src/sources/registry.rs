use std::collections::HashSet;
use std::path::Path;

use crate::domain::SourceConfig;
use crate::errors::{WatcherError, WatcherResult};
use crate::extract::PageExtractor;

/// The validated list of listing pages to watch, in processing order.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceConfig>) -> WatcherResult<Self> {
        let mut seen = HashSet::new();

        for source in &sources {
            source.validate()?;
            PageExtractor::new(&source.selectors)?;

            if !seen.insert(source.name.as_str()) {
                return Err(WatcherError::DuplicateSource(source.name.clone()));
            }
        }

        Ok(Self { sources })
    }

    /// The accounting-standard listings watched out of the box.
    pub fn builtin() -> Self {
        Self {
            sources: builtin_sources(),
        }
    }

    /// Parse a JSON array of sources.
    pub fn from_json(content: &str) -> WatcherResult<Self> {
        let sources: Vec<SourceConfig> = serde_json::from_str(content)?;
        Self::new(sources)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> WatcherResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from `path` when given, otherwise use the built-in list.
    pub fn load(path: Option<&Path>) -> WatcherResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn find(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Keep only the named sources, in registry order. Unknown names are errors.
    pub fn select(&self, names: &[String]) -> WatcherResult<Vec<&SourceConfig>> {
        if names.is_empty() {
            return Ok(self.sources.iter().collect());
        }

        if let Some(unknown) = names.iter().find(|n| self.find(n).is_none()) {
            return Err(WatcherError::SourceNotFound(unknown.clone()));
        }

        Ok(self
            .sources
            .iter()
            .filter(|s| names.contains(&s.name))
            .collect())
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            "casc-zzfb",
            "https://www.casc.org.cn/zzfb/",
            "https://www.casc.org.cn",
            "会计准则委员会｜准则发布",
        ),
        SourceConfig::new(
            "casc-gztz",
            "https://www.casc.org.cn/gztz/",
            "https://www.casc.org.cn",
            "会计准则委员会｜工作通知",
        ),
        SourceConfig::new(
            "mof-kjs-zhengcefabu",
            "https://kjs.mof.gov.cn/zhengcefabu/",
            "https://kjs.mof.gov.cn",
            "财政部会计司｜政策发布",
        ),
        SourceConfig::new(
            "mof-kjs-sswd",
            "https://kjs.mof.gov.cn/zt/kjzzss/sswd/",
            "https://kjs.mof.gov.cn",
            "财政部会计司｜实施问答（总页）",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectorRules;
    use std::io::Write;

    #[test]
    fn test_builtin_sources_are_valid() {
        let builtin = SourceRegistry::builtin();
        assert_eq!(builtin.len(), 4);

        let validated = SourceRegistry::new(builtin.sources().to_vec()).unwrap();
        assert_eq!(validated.len(), 4);
    }

    #[test]
    fn test_find_by_name() {
        let registry = SourceRegistry::builtin();

        let source = registry.find("mof-kjs-sswd").unwrap();
        assert_eq!(source.url, "https://kjs.mof.gov.cn/zt/kjzzss/sswd/");
        assert!(registry.find("nope").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let a = SourceConfig::new("dup", "https://a.com/", "https://a.com", "A");
        let b = SourceConfig::new("dup", "https://b.com/", "https://b.com", "B");

        let err = SourceRegistry::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, WatcherError::DuplicateSource(name) if name == "dup"));
    }

    #[test]
    fn test_bad_selector_rejected() {
        let source = SourceConfig::new("x", "https://x.com/", "https://x.com", "X").with_selectors(
            SelectorRules {
                date: vec!["span".to_string(), "em[".to_string()],
                ..SelectorRules::default()
            },
        );

        let err = SourceRegistry::new(vec![source]).unwrap_err();
        assert!(matches!(err, WatcherError::InvalidSelector { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "name": "casc-zzfb",
                "url": "https://www.casc.org.cn/zzfb/",
                "base_url": "https://www.casc.org.cn",
                "title": "准则发布",
                "selectors": { "item": "ul.list li", "title": "a", "date": ["span.date", "em"] }
            }
        ]"#;

        let registry = SourceRegistry::from_json(json).unwrap();
        let source = registry.find("casc-zzfb").unwrap();
        assert_eq!(source.selectors.item, "ul.list li");
        assert_eq!(source.selectors.date, vec!["span.date", "em"]);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = SourceRegistry::from_json("{ not json").unwrap_err();
        assert!(matches!(err, WatcherError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"a","url":"https://a.com/l/","base_url":"https://a.com","title":"A"}}]"#
        )
        .unwrap();

        let registry = SourceRegistry::load(Some(file.path())).unwrap();
        assert_eq!(registry.len(), 1);

        let registry = SourceRegistry::load(None).unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_select_keeps_registry_order() {
        let registry = SourceRegistry::builtin();

        let picked = registry
            .select(&["mof-kjs-sswd".to_string(), "casc-zzfb".to_string()])
            .unwrap();
        let names: Vec<&str> = picked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["casc-zzfb", "mof-kjs-sswd"]);

        assert_eq!(registry.select(&[]).unwrap().len(), 4);
    }

    #[test]
    fn test_select_unknown_name() {
        let registry = SourceRegistry::builtin();

        let err = registry.select(&["missing".to_string()]).unwrap_err();
        assert!(matches!(err, WatcherError::SourceNotFound(name) if name == "missing"));
    }
}
