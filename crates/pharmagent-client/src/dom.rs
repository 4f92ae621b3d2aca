//! Page contract: the element ids the search page provides, the form state and the submit event.

use pharmagent_common::SearchQuery;

pub const SEARCH_FORM_ID: &str = "searchForm";
pub const MOLECULE_NAME_ID: &str = "moleculeName";
pub const DISEASE_AREA_ID: &str = "diseaseArea";
pub const RESULTS_ID: &str = "results";

/// Current values of the search form's two inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    molecule_name: String,
    disease_area: String,
}

impl SearchForm {
    pub fn new(molecule_name: impl Into<String>, disease_area: impl Into<String>) -> Self {
        Self {
            molecule_name: molecule_name.into(),
            disease_area: disease_area.into(),
        }
    }

    /// Value of the input with the given element id.
    pub fn field(&self, id: &str) -> Option<&str> {
        match id {
            MOLECULE_NAME_ID => Some(&self.molecule_name),
            DISEASE_AREA_ID => Some(&self.disease_area),
            _ => None,
        }
    }

    /// Returns false when the form has no input with that id.
    pub fn set_field(&mut self, id: &str, value: impl Into<String>) -> bool {
        match id {
            MOLECULE_NAME_ID => self.molecule_name = value.into(),
            DISEASE_AREA_ID => self.disease_area = value.into(),
            _ => return false,
        }
        true
    }

    /// Snapshot of the inputs at submit time. Values are sent untouched.
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.molecule_name.clone(), self.disease_area.clone())
    }
}

/// A submission of the search form.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the browser's full-page form navigation.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
