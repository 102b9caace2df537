//! Find requests: a filter expression plus the paging, ordering and
//! projection options a collection's `find` accepts.
//!
//! This module only shapes documents. Executing them belongs to a
//! [`Finder`] implementation supplied by the caller.

use crate::{
    error::QueryError,
    filter::{Expression, FieldName, QueryDocument},
};
use log::debug;
use serde_json::Value as JsonValue;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire value: `1` ascending, `-1` descending.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

///
/// Projection
///
/// Field selection for returned documents. Inclusion and exclusion never
/// mix within one projection.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Projection {
    Include(Vec<FieldName>),
    Exclude(Vec<FieldName>),
}

impl Projection {
    pub fn include<I, S>(fields: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        field_names(fields).map(Self::Include)
    }

    pub fn exclude<I, S>(fields: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        field_names(fields).map(Self::Exclude)
    }

    /// `{ field: 1, ... }` for inclusion, `{ field: 0, ... }` for exclusion.
    #[must_use]
    pub fn to_document(&self) -> QueryDocument {
        let (fields, flag) = match self {
            Self::Include(fields) => (fields, 1),
            Self::Exclude(fields) => (fields, 0),
        };

        fields
            .iter()
            .map(|field| (field.to_string(), JsonValue::from(flag)))
            .collect()
    }
}

fn field_names<I, S>(fields: I) -> Result<Vec<FieldName>, QueryError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(FieldName::new).collect()
}

///
/// Finder
///
/// Boundary to the collection that executes a find. Both documents are
/// passed through unchanged.
///

pub trait Finder {
    type Cursor;
    type Error;

    fn find(
        &self,
        filter: &QueryDocument,
        options: &QueryDocument,
    ) -> Result<Self::Cursor, Self::Error>;
}

///
/// FindRequest
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindRequest {
    filter: Expression,
    skip: u64,
    limit: u64,
    sort: Vec<(FieldName, SortDirection)>,
    projection: Option<Projection>,
}

impl FindRequest {
    #[must_use]
    pub fn new(filter: Expression) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &Expression {
        &self.filter
    }

    /// Number of matching documents to skip; `0` skips none.
    #[must_use]
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Maximum number of documents to return; `0` means no limit.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Append a sort key. Sorting by a field again replaces its direction
    /// and keeps its original position.
    pub fn sort_by(
        mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<Self, QueryError> {
        let field = FieldName::new(field)?;

        match self.sort.iter_mut().find(|(existing, _)| *existing == field) {
            Some(entry) => entry.1 = direction,
            None => self.sort.push((field, direction)),
        }

        Ok(self)
    }

    #[must_use]
    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    #[must_use]
    pub fn filter_document(&self) -> QueryDocument {
        self.filter.to_query_document()
    }

    /// Options document; defaults are omitted so an unconfigured request
    /// produces `{}`.
    #[must_use]
    pub fn options_document(&self) -> QueryDocument {
        let mut doc = QueryDocument::new();

        if self.skip > 0 {
            doc.insert("skip".to_string(), JsonValue::from(self.skip));
        }
        if self.limit > 0 {
            doc.insert("limit".to_string(), JsonValue::from(self.limit));
        }
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|(field, dir)| (field.to_string(), JsonValue::from(dir.as_i32())))
                .collect();
            doc.insert("sort".to_string(), JsonValue::Object(sort));
        }
        if let Some(projection) = &self.projection {
            doc.insert(
                "projection".to_string(),
                JsonValue::Object(projection.to_document()),
            );
        }

        doc
    }

    /// Hand the filter and options documents to `finder`.
    pub fn run<F: Finder>(&self, finder: &F) -> Result<F::Cursor, F::Error> {
        let filter = self.filter_document();
        let options = self.options_document();
        debug!(
            "find filter={} options={}",
            JsonValue::Object(filter.clone()),
            JsonValue::Object(options.clone())
        );

        finder.find(&filter, &options)
    }
}

///
/// TESTS
///
