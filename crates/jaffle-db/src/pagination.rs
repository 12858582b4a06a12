//! Offset pagination over a single table.
//!
//! A page is addressed by a 1-based page number and a page size. Each call
//! to [`paginate`] issues two statements sharing the same `WHERE` clause:
//! a `COUNT(*)` that sizes the collection and a `LIMIT`/`OFFSET` select
//! that fetches the rows. Rows are ordered by [`Resource::SORT`], so
//! walking every page visits each row exactly once.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::DbError;
use crate::query;
use crate::resource::Resource;

// ---------------------------------------------------------------------------
// Page addressing
// ---------------------------------------------------------------------------

/// A requested page: 1-based number plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Maximum rows on the page.
    pub page_size: u32,
}

impl PageRequest {
    /// Create a page request.
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Number of rows skipped before this page: `(page - 1) * page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidPage`] for page 0 or a zero page size.
    pub fn offset(&self) -> Result<u64, DbError> {
        if self.page_size == 0 {
            return Err(DbError::InvalidPage(String::from(
                "page_size must be at least 1",
            )));
        }
        let preceding = self
            .page
            .checked_sub(1)
            .ok_or_else(|| DbError::InvalidPage(String::from("page must be at least 1")))?;
        // u32 * u32 always fits in u64.
        Ok(u64::from(preceding).saturating_mul(u64::from(self.page_size)))
    }

    /// Whether rows remain after this page in a collection of
    /// `total_count` rows, i.e. `offset + page_size < total_count`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidPage`] if the request has no valid offset.
    pub fn has_next(&self, total_count: i64) -> Result<bool, DbError> {
        let end = self
            .offset()?
            .saturating_add(u64::from(self.page_size));
        let total = u64::try_from(total_count).unwrap_or(0);
        Ok(end < total)
    }
}

/// One page of rows plus what the caller needs to link onward.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows on this page, at most `page_size` of them.
    pub rows: Vec<T>,
    /// Rows matching the filter across all pages.
    pub total_count: i64,
    /// Whether a following page has rows.
    pub has_next: bool,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>=`
    Gte,
    /// `<=`
    Lte,
}

impl Comparison {
    /// SQL spelling of the operator.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// A value bound into a filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Calendar date, encoded as `YYYY-MM-DD`.
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    expr: &'static str,
    op: Comparison,
    value: FilterValue,
}

/// Conditions combined with `AND` into one `WHERE` clause.
///
/// Expressions are static SQL; only values are bound. An empty filter
/// emits no `WHERE` at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Create an empty filter.
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Add the condition `expr op value`.
    #[must_use]
    pub fn and(mut self, expr: &'static str, op: Comparison, value: FilterValue) -> Self {
        self.conditions.push(Condition { expr, op, value });
        self
    }

    /// Add the condition only when `value` is present.
    #[must_use]
    pub fn and_opt(self, expr: &'static str, op: Comparison, value: Option<FilterValue>) -> Self {
        match value {
            Some(value) => self.and(expr, op, value),
            None => self,
        }
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` WHERE ...` to `query`, or nothing for an empty filter.
    pub fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            query
                .push(condition.expr)
                .push(" ")
                .push(condition.op.as_sql())
                .push(" ");
            match &condition.value {
                FilterValue::Date(date) => query.push_bind(*date),
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Fetch one page of `R` matching `filter`.
///
/// A page past the end yields no rows and `has_next == false`.
///
/// # Errors
///
/// Returns [`DbError::InvalidPage`] for an unaddressable page and
/// [`DbError::Query`] if either statement fails.
pub async fn paginate<R: Resource>(
    conn: &mut SqliteConnection,
    request: PageRequest,
    filter: &Filter,
) -> Result<Page<R>, DbError> {
    let offset = i64::try_from(request.offset()?)
        .map_err(|e| DbError::InvalidPage(format!("offset out of range: {e}")))?;

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
    count.push(R::TABLE);
    filter.push_where(&mut count);
    let total_count = query::fetch_count(conn, count).await?;

    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM ");
    select.push(R::TABLE);
    filter.push_where(&mut select);
    select
        .push(" ORDER BY ")
        .push(R::SORT)
        .push(" LIMIT ")
        .push_bind(i64::from(request.page_size))
        .push(" OFFSET ")
        .push_bind(offset);
    let rows = query::fetch_list::<R>(conn, select).await?;

    let has_next = request.has_next(total_count)?;

    tracing::debug!(
        table = R::TABLE,
        page = request.page,
        page_size = request.page_size,
        total_count,
        returned = rows.len(),
        has_next,
        "Fetched page"
    );

    Ok(Page {
        rows,
        total_count,
        has_next,
    })
}
