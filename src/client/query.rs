use std::fmt;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active sort: a field together with its direction. There is no order
/// without a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }
}

/// Parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// 1-based page number; `None` requests the whole collection.
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn unpaged() -> Self {
        Self::default()
    }

    /// Empty search text means no search.
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Query-string pairs: `_page`, `_limit`, `q`, `_sort`, `_order`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(page) = self.page {
            params.push(("_page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("_limit", limit.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("q", search.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("_sort", sort.field.clone()));
            params.push(("_order", sort.order.as_str().to_string()));
        }
        params
    }
}
