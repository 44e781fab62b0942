//! Statistics reports of the stable API

use tracing::debug;
use yametrika_core::params::Params;
use yametrika_core::{StatQuery, StatReport, Transport};
use yametrika_domain::{ApiObject, MetrikaError, Result};

use super::client::Metrika;
use crate::api::RequestSpec;

impl<T: Transport> Metrika<T> {
    /// Fetch one page of a statistics report
    ///
    /// With `query.resume` set, the request targets the report with the
    /// cursor's query and carries no other parameter. Reports are never
    /// walked automatically; use [`Metrika::stat_next`] to page manually.
    ///
    /// # Errors
    /// Returns `MetrikaError::Config` when a resume cursor is given for a
    /// report that is not paginated.
    pub async fn stat(&mut self, report: StatReport, query: &StatQuery) -> Result<ApiObject> {
        let base = self.url(report.path());
        let spec = match &query.resume {
            Some(cursor) => {
                if !report.shape().paged {
                    return Err(MetrikaError::Config(format!(
                        "report {} does not accept a resume cursor",
                        report.path()
                    )));
                }
                debug!(report = report.path(), "resuming report from cursor");
                RequestSpec::get(format!("{base}?{}", cursor.query_fragment())).params(Params::new())
            }
            None => RequestSpec::get(base).params(query.to_params(report)),
        };
        self.pipeline.execute(spec).await
    }

    /// Page following `previous`, or `None` when it was the last one
    pub async fn stat_next(&mut self, report: StatReport, previous: &ApiObject) -> Result<Option<ApiObject>> {
        let Some(cursor) = previous.next_cursor() else {
            return Ok(None);
        };
        let query = StatQuery { resume: Some(cursor), ..StatQuery::default() };
        self.stat(report, &query).await.map(Some)
    }
}
