//! Statistics report catalog of the stable API
//!
//! Every report is a GET on `stat/<path>.json` with the counter id and a date
//! range. Reports differ only in which optional parameters they accept; that
//! difference is captured by [`ReportShape`] so one request builder serves
//! the whole catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use yametrika_domain::Cursor;

use crate::params::Params;

/// Optional parameters a report accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportShape {
    pub goal_id: bool,
    pub mirror_id: bool,
    pub se_id: bool,
    pub group: bool,
    pub table_mode: bool,
    pub per_page: bool,
    /// `sort` and `reverse`
    pub sort: bool,
    /// Report is paginated and can resume from a `links.next` cursor
    pub paged: bool,
}

const GOAL: ReportShape = ReportShape {
    goal_id: true,
    mirror_id: false,
    se_id: false,
    group: false,
    table_mode: false,
    per_page: false,
    sort: false,
    paged: false,
};

const GOAL_SORTED: ReportShape = ReportShape { sort: true, ..GOAL };

const TABLE: ReportShape = ReportShape {
    goal_id: true,
    mirror_id: false,
    se_id: false,
    group: false,
    table_mode: true,
    per_page: true,
    sort: true,
    paged: true,
};

/// Statistics reports of the stable API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatReport {
    TrafficSummary,
    TrafficDeepness,
    TrafficHourly,
    TrafficLoad,
    SourcesSummary,
    SourcesSites,
    SourcesSearchEngines,
    SourcesPhrases,
    SourcesMarketing,
    SourcesDirectSummary,
    SourcesDirectPlatforms,
    SourcesDirectRegions,
    SourcesTags,
    ContentPopular,
    ContentEntrance,
    ContentExit,
    ContentTitles,
    ContentUrlParam,
    Geo,
    DemographyAgeGender,
    DemographyStructure,
    TechBrowsers,
    TechOs,
    TechDisplay,
    TechMobile,
    TechFlash,
    TechSilverlight,
    TechDotnet,
    TechJava,
    TechCookies,
    TechJavascript,
}

impl StatReport {
    /// All reports in catalog order
    pub const ALL: [StatReport; 31] = [
        Self::TrafficSummary,
        Self::TrafficDeepness,
        Self::TrafficHourly,
        Self::TrafficLoad,
        Self::SourcesSummary,
        Self::SourcesSites,
        Self::SourcesSearchEngines,
        Self::SourcesPhrases,
        Self::SourcesMarketing,
        Self::SourcesDirectSummary,
        Self::SourcesDirectPlatforms,
        Self::SourcesDirectRegions,
        Self::SourcesTags,
        Self::ContentPopular,
        Self::ContentEntrance,
        Self::ContentExit,
        Self::ContentTitles,
        Self::ContentUrlParam,
        Self::Geo,
        Self::DemographyAgeGender,
        Self::DemographyStructure,
        Self::TechBrowsers,
        Self::TechOs,
        Self::TechDisplay,
        Self::TechMobile,
        Self::TechFlash,
        Self::TechSilverlight,
        Self::TechDotnet,
        Self::TechJava,
        Self::TechCookies,
        Self::TechJavascript,
    ];

    /// Resource path without host and `.json` suffix
    pub fn path(self) -> &'static str {
        match self {
            Self::TrafficSummary => "stat/traffic/summary",
            Self::TrafficDeepness => "stat/traffic/deepness",
            Self::TrafficHourly => "stat/traffic/hourly",
            Self::TrafficLoad => "stat/traffic/load",
            Self::SourcesSummary => "stat/sources/summary",
            Self::SourcesSites => "stat/sources/sites",
            Self::SourcesSearchEngines => "stat/sources/search_engines",
            Self::SourcesPhrases => "stat/sources/phrases",
            Self::SourcesMarketing => "stat/sources/marketing",
            Self::SourcesDirectSummary => "stat/sources/direct/summary",
            Self::SourcesDirectPlatforms => "stat/sources/direct/platforms",
            Self::SourcesDirectRegions => "stat/sources/direct/regions",
            Self::SourcesTags => "stat/sources/tags",
            Self::ContentPopular => "stat/content/popular",
            Self::ContentEntrance => "stat/content/entrance",
            Self::ContentExit => "stat/content/exit",
            Self::ContentTitles => "stat/content/titles",
            Self::ContentUrlParam => "stat/content/url_param",
            Self::Geo => "stat/geo",
            Self::DemographyAgeGender => "stat/demography/age_gender",
            Self::DemographyStructure => "stat/demography/structure",
            Self::TechBrowsers => "stat/tech/browsers",
            Self::TechOs => "stat/tech/os",
            Self::TechDisplay => "stat/tech/display",
            Self::TechMobile => "stat/tech/mobile",
            Self::TechFlash => "stat/tech/flash",
            Self::TechSilverlight => "stat/tech/silverlight",
            Self::TechDotnet => "stat/tech/dotnet",
            Self::TechJava => "stat/tech/java",
            Self::TechCookies => "stat/tech/cookies",
            Self::TechJavascript => "stat/tech/javascript",
        }
    }

    /// Optional parameters accepted by the report
    pub fn shape(self) -> ReportShape {
        match self {
            Self::TrafficSummary => ReportShape { group: true, per_page: true, paged: true, ..GOAL },
            Self::TrafficLoad => ReportShape {
                goal_id: false,
                group: true,
                per_page: true,
                paged: true,
                ..GOAL
            },
            Self::TrafficDeepness
            | Self::TrafficHourly
            | Self::DemographyAgeGender
            | Self::DemographyStructure => GOAL,
            Self::SourcesSummary | Self::TechJava | Self::TechCookies | Self::TechJavascript => {
                GOAL_SORTED
            }
            Self::SourcesPhrases => ReportShape { se_id: true, table_mode: false, ..TABLE },
            Self::SourcesDirectPlatforms => ReportShape { table_mode: false, ..TABLE },
            Self::ContentPopular | Self::ContentExit => {
                ReportShape { goal_id: false, mirror_id: true, ..TABLE }
            }
            Self::ContentEntrance => ReportShape { mirror_id: true, ..TABLE },
            Self::ContentTitles => ReportShape { goal_id: false, table_mode: false, ..TABLE },
            Self::ContentUrlParam => ReportShape { goal_id: false, ..TABLE },
            Self::SourcesSites
            | Self::SourcesSearchEngines
            | Self::SourcesMarketing
            | Self::SourcesDirectSummary
            | Self::SourcesDirectRegions
            | Self::SourcesTags
            | Self::Geo
            | Self::TechBrowsers
            | Self::TechOs
            | Self::TechDisplay
            | Self::TechMobile
            | Self::TechFlash
            | Self::TechSilverlight
            | Self::TechDotnet => TABLE,
        }
    }
}

/// Parameters of one statistics request
///
/// Defaults follow the service: daily grouping, 100 rows per page, plain
/// tables sorted by visits in descending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatQuery {
    pub counter_id: i64,
    /// Start date, `YYYYMMDD`; empty lets the service pick
    pub date1: String,
    /// End date, `YYYYMMDD`
    pub date2: String,
    pub goal_id: Option<i64>,
    pub mirror_id: String,
    pub se_id: Option<i64>,
    pub group: String,
    pub table_mode: String,
    pub per_page: u32,
    pub sort: String,
    pub reverse: bool,
    /// `links.next` of an earlier page; replaces all other parameters
    pub resume: Option<Cursor>,
}

impl Default for StatQuery {
    fn default() -> Self {
        Self {
            counter_id: 0,
            date1: String::new(),
            date2: String::new(),
            goal_id: None,
            mirror_id: String::new(),
            se_id: None,
            group: "day".to_string(),
            table_mode: "plain".to_string(),
            per_page: 100,
            sort: "visits".to_string(),
            reverse: true,
            resume: None,
        }
    }
}

impl StatQuery {
    pub fn new(counter_id: i64) -> Self {
        Self { counter_id, ..Self::default() }
    }

    #[must_use]
    pub fn dates(mut self, date1: impl Into<String>, date2: impl Into<String>) -> Self {
        self.date1 = date1.into();
        self.date2 = date2.into();
        self
    }

    #[must_use]
    pub fn goal(mut self, goal_id: i64) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    #[must_use]
    pub fn resume_from(mut self, cursor: impl Into<Cursor>) -> Self {
        self.resume = Some(cursor.into());
        self
    }

    /// Query parameters for `report`, restricted to what it accepts
    pub fn to_params(&self, report: StatReport) -> Params {
        let shape = report.shape();
        let mut params = Params::new();
        params.insert("id".into(), Value::from(self.counter_id));
        if shape.mirror_id {
            params.insert("mirror_id".into(), Value::from(self.mirror_id.as_str()));
        }
        params.insert("date1".into(), Value::from(self.date1.as_str()));
        params.insert("date2".into(), Value::from(self.date2.as_str()));
        if shape.group {
            params.insert("group".into(), Value::from(self.group.as_str()));
        }
        if shape.table_mode {
            params.insert("table_mode".into(), Value::from(self.table_mode.as_str()));
        }
        if shape.per_page {
            params.insert("per_page".into(), Value::from(self.per_page));
        }
        if shape.sort {
            params.insert("sort".into(), Value::from(self.sort.as_str()));
            params.insert("reverse".into(), Value::from(u8::from(self.reverse)));
        }
        if let (true, Some(goal_id)) = (shape.goal_id, self.goal_id) {
            params.insert("goal_id".into(), Value::from(goal_id));
        }
        if let (true, Some(se_id)) = (shape.se_id, self.se_id) {
            params.insert("se_id".into(), Value::from(se_id));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::params::encode_query;

    #[test]
    fn test_catalog_paths_are_unique() {
        let paths: HashSet<_> = StatReport::ALL.iter().map(|r| r.path()).collect();
        assert_eq!(paths.len(), StatReport::ALL.len());
        assert!(StatReport::ALL.iter().all(|r| r.path().starts_with("stat/")));
    }

    #[test]
    fn test_paged_reports() {
        let unpaged: Vec<_> = StatReport::ALL.iter().filter(|r| !r.shape().paged).copied().collect();
        assert_eq!(
            unpaged,
            vec![
                StatReport::TrafficDeepness,
                StatReport::TrafficHourly,
                StatReport::SourcesSummary,
                StatReport::DemographyAgeGender,
                StatReport::DemographyStructure,
                StatReport::TechJava,
                StatReport::TechCookies,
                StatReport::TechJavascript,
            ]
        );
    }

    #[test]
    fn test_table_report_defaults() {
        let query = StatQuery::new(42).dates("20240101", "20240131");
        assert_eq!(
            encode_query(&query.to_params(StatReport::Geo)),
            "id=42&date1=20240101&date2=20240131&table_mode=plain&per_page=100&sort=visits&reverse=1"
        );
    }

    #[test]
    fn test_goal_only_sent_when_set_and_accepted() {
        let query = StatQuery::new(1).goal(9);
        assert_eq!(query.to_params(StatReport::TrafficHourly).get("goal_id"), Some(&Value::from(9)));
        assert!(query.to_params(StatReport::TrafficLoad).get("goal_id").is_none());
        assert!(StatQuery::new(1).to_params(StatReport::TrafficHourly).get("goal_id").is_none());
    }

    #[test]
    fn test_mirror_sent_even_when_empty() {
        let params = StatQuery::new(1).to_params(StatReport::ContentPopular);
        assert_eq!(params.get("mirror_id"), Some(&Value::from("")));
        assert!(StatQuery::new(1).to_params(StatReport::Geo).get("mirror_id").is_none());
    }

    #[test]
    fn test_phrases_accept_search_engine() {
        let query = StatQuery { se_id: Some(2), ..StatQuery::new(1) };
        let params = query.to_params(StatReport::SourcesPhrases);
        assert_eq!(params.get("se_id"), Some(&Value::from(2)));
        assert!(params.get("table_mode").is_none());
        assert!(query.to_params(StatReport::Geo).get("se_id").is_none());
    }

    #[test]
    fn test_traffic_summary_groups() {
        let query = StatQuery { group: "week".into(), reverse: false, ..StatQuery::new(5) };
        assert_eq!(
            encode_query(&query.to_params(StatReport::TrafficSummary)),
            "id=5&date1=&date2=&group=week&per_page=100"
        );
    }
}
