//! Per-article pageviews.

use pageviews_core::{
    Granularity, InputError, PerArticlePageViewRequest, Source, Table, TimeRange, ValidityWindows,
    ensure_not_before,
};
use pageviews_fetch::{Endpoint, Params, items_table};
use tracing::{debug, instrument};

use crate::context::RequestContext;
use crate::error::PageViewError;

const OPERATION: &str = "per-article pageviews";

/// Turns a plain title into a single encoded path segment.
///
/// Spaces become underscores; everything outside the unreserved set is
/// percent-encoded, `/` included.
pub fn normalize_article(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_")).into_owned()
}

#[instrument(skip(ctx, windows), fields(project = ctx.project))]
pub(crate) async fn per_article(
    ctx: RequestContext<'_>,
    windows: &ValidityWindows,
    request: &PerArticlePageViewRequest,
) -> Result<Table, PageViewError> {
    let range = TimeRange::parse(&request.start_time, &request.end_time, true)?;
    ensure_not_before(range.start, windows.pageviews_start)?;

    if request.access.is_mobile_composite() {
        return Err(InputError::UnsupportedAccess {
            operation: OPERATION,
            access: request.access,
        }
        .into());
    }
    if request.granularity == Granularity::Hourly {
        return Err(InputError::UnsupportedGranularity {
            operation: OPERATION,
            granularity: request.granularity,
        }
        .into());
    }

    let params = Params::new()
        .with("project", ctx.project)
        .with("access", request.access.token(Source::Current)?)
        .with("agent", request.agent.token())
        .with("article", normalize_article(&request.article))
        .with("granularity", request.granularity.token())
        .with("start", range.start_param())
        .with("end", range.end_param());

    let body = ctx.fetch(Endpoint::PerArticle, &params).await?;
    let table = items_table(&body)?;
    debug!(rows = table.len(), "Per-article rows");
    Ok(table)
}
