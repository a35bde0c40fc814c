//! Search filters and the canonical query sent to the search endpoint.
//!
//! [`Filters`] is what the user typed: every field optional, any of them
//! possibly empty. [`Query`] is the canonical form: blank filters dropped,
//! location defaulted, page size and page number injected. Building a query
//! never fails.

use serde::{Deserialize, Serialize};

/// Region searched when the user leaves the location blank.
pub const DEFAULT_LOCATION: &str = "10001";

/// Number of results requested per page.
pub const PAGE_SIZE: u32 = 24;

/// Raw filter values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub animal_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl Filters {
    /// Filters restricted to a single animal type, everything else blank.
    #[must_use]
    pub fn for_animal(animal: AnimalType) -> Self {
        Self {
            animal_type: Some(animal.as_str().to_string()),
            ..Self::default()
        }
    }
}

/// Animal types the search endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalType {
    Dog,
    Cat,
}

impl AnimalType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }

    /// Case-insensitive parse. `None` for blank or unrecognised input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dog" | "dogs" => Some(Self::Dog),
            "cat" | "cats" => Some(Self::Cat),
            _ => None,
        }
    }
}

/// Browse shortcuts offered next to the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    All,
    Dogs,
    Cats,
}

impl Category {
    /// The animal filter this category applies, `None` meaning every type.
    #[must_use]
    pub const fn animal(self) -> Option<AnimalType> {
        match self {
            Self::All => None,
            Self::Dogs => Some(AnimalType::Dog),
            Self::Cats => Some(AnimalType::Cat),
        }
    }

    /// Filters that a category selection searches with.
    #[must_use]
    pub fn filters(self) -> Filters {
        self.animal().map_or_else(Filters::default, Filters::for_animal)
    }
}

/// Canonical, server-bound search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub animal_type: Option<AnimalType>,
    pub location: String,
    pub age: Option<String>,
    pub size: Option<String>,
    pub per_page: u32,
    pub page: u32,
}

impl Query {
    /// Returns a copy of this query pointing at `page`.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query-string parameters in wire order. Absent filters are omitted.
    ///
    /// # Example
    ///
    /// ```
    /// use petscout::domain::{build_query, Filters};
    ///
    /// let query = build_query(&Filters {
    ///     animal_type: Some("dog".into()),
    ///     location: Some(String::new()),
    ///     ..Filters::default()
    /// });
    /// let params = query.to_params();
    /// assert_eq!(params[0], ("animal_type", "dog".to_string()));
    /// assert_eq!(params[1], ("location", "10001".to_string()));
    /// assert_eq!(params.len(), 4);
    /// ```
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        if let Some(animal) = self.animal_type {
            params.push(("animal_type", animal.as_str().to_string()));
        }
        params.push(("location", self.location.clone()));
        if let Some(age) = &self.age {
            params.push(("age", age.clone()));
        }
        if let Some(size) = &self.size {
            params.push(("size", size.clone()));
        }
        params.push(("per_page", self.per_page.to_string()));
        params.push(("page", self.page.to_string()));
        params
    }
}

/// Converts raw filters into canonical queries.
///
/// The default location and page size come from configuration; [`build_query`]
/// uses [`DEFAULT_LOCATION`] and [`PAGE_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    default_location: String,
    per_page: u32,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            per_page: PAGE_SIZE,
        }
    }
}

impl QueryBuilder {
    /// A zero page size is bumped to 1 and a blank default location falls
    /// back to [`DEFAULT_LOCATION`].
    #[must_use]
    pub fn new(default_location: impl Into<String>, per_page: u32) -> Self {
        let default_location = default_location.into();
        let default_location = if default_location.trim().is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            default_location.trim().to_string()
        };
        Self {
            default_location,
            per_page: per_page.max(1),
        }
    }

    #[must_use]
    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn build(&self, filters: &Filters) -> Query {
        let animal_type = non_blank(filters.animal_type.as_ref()).and_then(|raw| {
            let parsed = AnimalType::parse(&raw);
            if parsed.is_none() {
                tracing::warn!(animal_type = %raw, "unrecognised animal type, searching all types");
            }
            parsed
        });

        Query {
            animal_type,
            location: non_blank(filters.location.as_ref())
                .unwrap_or_else(|| self.default_location.clone()),
            age: non_blank(filters.age.as_ref()),
            size: non_blank(filters.size.as_ref()),
            per_page: self.per_page,
            page: 1,
        }
    }
}

/// Builds a query with the default location and page size.
#[must_use]
pub fn build_query(filters: &Filters) -> Query {
    QueryBuilder::default().build(filters)
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(animal: Option<&str>, location: Option<&str>) -> Filters {
        Filters {
            animal_type: animal.map(String::from),
            location: location.map(String::from),
            ..Filters::default()
        }
    }

    #[test]
    fn dog_with_blank_location_uses_defaults() {
        let query = build_query(&filters(Some("dog"), Some("")));

        assert_eq!(
            query,
            Query {
                animal_type: Some(AnimalType::Dog),
                location: "10001".to_string(),
                age: None,
                size: None,
                per_page: 24,
                page: 1,
            }
        );
    }

    #[test]
    fn empty_or_absent_animal_type_is_omitted() {
        for animal in [None, Some(""), Some("   ")] {
            let query = build_query(&filters(animal, Some("Boston")));
            assert_eq!(query.animal_type, None);
            assert!(query.to_params().iter().all(|(k, _)| *k != "animal_type"));
        }
    }

    #[test]
    fn absent_or_blank_location_falls_back() {
        for location in [None, Some(""), Some("  \t")] {
            let query = build_query(&filters(None, location));
            assert_eq!(query.location, DEFAULT_LOCATION);
        }
    }

    #[test]
    fn empty_age_and_size_are_never_sent() {
        let query = build_query(&Filters {
            age: Some(String::new()),
            size: Some(" ".into()),
            ..Filters::default()
        });
        let keys: Vec<_> = query.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["location", "per_page", "page"]);
    }

    #[test]
    fn all_filters_are_trimmed_and_ordered() {
        let query = build_query(&Filters {
            animal_type: Some("Cat".into()),
            location: Some(" 94103 ".into()),
            age: Some("Young".into()),
            size: Some("small".into()),
        });

        assert_eq!(
            query.to_params(),
            vec![
                ("animal_type", "cat".to_string()),
                ("location", "94103".to_string()),
                ("age", "Young".to_string()),
                ("size", "small".to_string()),
                ("per_page", "24".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_animal_type_searches_everything() {
        let query = build_query(&filters(Some("parrot"), None));
        assert_eq!(query.animal_type, None);
    }

    #[test]
    fn with_page_only_changes_the_page() {
        let query = build_query(&filters(Some("dog"), None));
        let third = query.with_page(3);
        assert_eq!(third.page, 3);
        assert_eq!(third.animal_type, query.animal_type);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn configured_builder_overrides_defaults() {
        let builder = QueryBuilder::new("Chicago", 0);
        let query = builder.build(&Filters::default());
        assert_eq!(query.location, "Chicago");
        assert_eq!(query.per_page, 1);

        let blank = QueryBuilder::new("  ", 10);
        assert_eq!(blank.default_location(), DEFAULT_LOCATION);
    }

    #[test]
    fn categories_map_to_animal_filters() {
        assert_eq!(Category::All.filters(), Filters::default());
        assert_eq!(
            build_query(&Category::Cats.filters()).animal_type,
            Some(AnimalType::Cat)
        );
    }
}
