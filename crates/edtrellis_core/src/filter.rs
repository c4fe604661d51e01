/// Category options offered by the category select.
pub const CATEGORIES: &[&str] = &[
    "Technology",
    "Education",
    "Healthcare",
    "Finance",
    "Marketing",
    "Design",
    "Sales",
    "Engineering",
    "Other",
];

/// Job type options offered by the job type select.
pub const JOB_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Internship", "Remote"];

/// One of the four filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Search,
    Location,
    Category,
    JobType,
}

impl FilterField {
    /// Display order of filters and chips.
    pub const ALL: [FilterField; 4] = [
        FilterField::Search,
        FilterField::Location,
        FilterField::Category,
        FilterField::JobType,
    ];

    pub fn query_key(self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::Location => "location",
            FilterField::Category => "category",
            FilterField::JobType => "type",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.query_key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Search => "Search",
            FilterField::Location => "Location",
            FilterField::Category => "Category",
            FilterField::JobType => "Job type",
        }
    }
}

/// Free-text filter fields (draft stage, commit on submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Search,
    Location,
}

impl From<TextField> for FilterField {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Search => FilterField::Search,
            TextField::Location => FilterField::Location,
        }
    }
}

/// Select-type filter fields (commit on change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Category,
    JobType,
}

impl CategoricalField {
    pub fn options(self) -> &'static [&'static str] {
        match self {
            CategoricalField::Category => CATEGORIES,
            CategoricalField::JobType => JOB_TYPES,
        }
    }

    /// Case-sensitive match against the select options. Values outside the
    /// list are still accepted as filters.
    pub fn is_known_option(self, value: &str) -> bool {
        self.options().contains(&value)
    }
}

impl From<CategoricalField> for FilterField {
    fn from(field: CategoricalField) -> Self {
        match field {
            CategoricalField::Category => FilterField::Category,
            CategoricalField::JobType => FilterField::JobType,
        }
    }
}

/// Filter values. An empty string means the filter is not applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    pub search: String,
    pub location: String,
    pub category: String,
    pub job_type: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Location => &self.location,
            FilterField::Category => &self.category,
            FilterField::JobType => &self.job_type,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            FilterField::Search => self.search = value,
            FilterField::Location => self.location = value,
            FilterField::Category => self.category = value,
            FilterField::JobType => self.job_type = value,
        }
        self
    }

    /// Trims the free-text fields. Applied at commit time only.
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.search);
        trim_in_place(&mut self.location);
        self
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    /// Non-empty fields in display order.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// In-progress text edits, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftBuffer {
    pub search: String,
    pub location: String,
}

impl DraftBuffer {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Search => &self.search,
            TextField::Location => &self.location,
        }
    }

    pub(crate) fn set(&mut self, field: TextField, value: String) {
        match field {
            TextField::Search => self.search = value,
            TextField::Location => self.location = value,
        }
    }

    pub(crate) fn from_filters(filters: &FilterState) -> Self {
        Self {
            search: filters.search.clone(),
            location: filters.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keys_map_back_to_fields() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_query_key(field.query_key()), Some(field));
        }
        assert_eq!(FilterField::from_query_key("job_type"), None);
        assert_eq!(FilterField::JobType.query_key(), "type");
    }

    #[test]
    fn normalized_trims_only_text_fields() {
        let state = FilterState {
            search: "  react  ".into(),
            location: "\tRemote\n".into(),
            category: " Technology ".into(),
            job_type: String::new(),
        }
        .normalized();

        assert_eq!(state.search, "react");
        assert_eq!(state.location, "Remote");
        assert_eq!(state.category, " Technology ");
    }

    #[test]
    fn active_skips_empty_fields_in_order() {
        let state = FilterState::new()
            .with(FilterField::JobType, "Remote")
            .with(FilterField::Search, "rust");
        let active: Vec<_> = state.active().collect();
        assert_eq!(
            active,
            vec![(FilterField::Search, "rust"), (FilterField::JobType, "Remote")]
        );
        assert!(!state.is_empty());
        assert!(FilterState::new().is_empty());
    }

    #[test]
    fn categorical_options_are_known() {
        assert!(CategoricalField::Category.is_known_option("Technology"));
        assert!(CategoricalField::JobType.is_known_option("Remote"));
        assert!(!CategoricalField::JobType.is_known_option("remote"));
    }
}
