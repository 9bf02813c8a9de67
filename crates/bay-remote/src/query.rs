//! Request builders rendered to the query layer's URL parameter syntax.

use std::fmt::Write as _;

/// Row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { column: String, value: String },
    In { column: String, values: Vec<String> },
    IsNull { column: String },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn is_in<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
        }
    }

    /// `(column, operator.value)` pair.
    #[must_use]
    pub fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq { column, value } => (column.clone(), format!("eq.{value}")),
            Self::In { column, values } => {
                let list = values.iter().map(|v| quote_list_item(v)).collect::<Vec<_>>();
                (column.clone(), format!("in.({})", list.join(",")))
            }
            Self::IsNull { column } => (column.clone(), "is.null".to_string()),
        }
    }
}

// Reserved characters inside `in.(...)` lists must be double-quoted.
fn quote_list_item(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Render filters as an encoded query string (no leading `?`).
#[must_use]
pub fn encode_filters(filters: &[Filter]) -> String {
    let mut out = String::new();
    for filter in filters {
        let (column, value) = filter.to_param();
        push_param(&mut out, &column, &value);
    }
    out
}

fn push_param(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    let _ = write!(
        out,
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    );
}

/// A read against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub select: String,
    pub filters: Vec<Filter>,
    /// `(column, descending)`.
    pub order: Option<(String, bool)>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn select(mut self, projection: impl Into<String>) -> Self {
        self.select = projection.into();
        self
    }

    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    #[must_use]
    pub fn is_in<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::is_in(column, values));
        self
    }

    #[must_use]
    pub fn is_null(mut self, column: impl Into<String>) -> Self {
        self.filters.push(Filter::is_null(column));
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn order(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order = Some((column.into(), descending));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Encoded query string (no leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        push_param(&mut out, "select", &compact_projection(&self.select));
        for filter in &self.filters {
            let (column, value) = filter.to_param();
            push_param(&mut out, &column, &value);
        }
        if let Some((column, descending)) = &self.order {
            let direction = if *descending { "desc" } else { "asc" };
            push_param(&mut out, "order", &format!("{column}.{direction}"));
        }
        if let Some(limit) = self.limit {
            push_param(&mut out, "limit", &limit.to_string());
        }
        out
    }
}

// The query layer rejects whitespace inside embedded projections.
fn compact_projection(select: &str) -> String {
    select.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_every_clause() {
        let query = SelectQuery::new("job_parts")
            .select("id, job_id, vendor:vendors(id,name)")
            .eq("job_id", "job-1")
            .is_null("deleted_at")
            .order("created_at", false)
            .limit(10);
        assert_eq!(
            query.to_query_string(),
            "select=id%2Cjob_id%2Cvendor%3Avendors%28id%2Cname%29\
             &job_id=eq.job-1&deleted_at=is.null&order=created_at.asc&limit=10"
        );
    }

    #[test]
    fn defaults_to_star() {
        assert_eq!(SelectQuery::new("jobs").to_query_string(), "select=%2A");
    }

    #[test]
    fn in_list_quotes_reserved_values() {
        let filter = Filter::is_in("status", ["open", "on hold", "a,b"]);
        assert_eq!(
            filter.to_param(),
            (
                "status".to_string(),
                r#"in.(open,"on hold","a,b")"#.to_string()
            )
        );
    }

    #[test]
    fn descending_order() {
        let query = SelectQuery::new("user_profiles")
            .eq("email", "a@b.co")
            .order("updated_at", true)
            .limit(1);
        assert_eq!(
            query.to_query_string(),
            "select=%2A&email=eq.a%40b.co&order=updated_at.desc&limit=1"
        );
    }

    #[test]
    fn encodes_bare_filters() {
        let filters = [Filter::eq("job_id", "j 1")];
        assert_eq!(encode_filters(&filters), "job_id=eq.j%201");
    }
}
