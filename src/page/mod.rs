use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::UploadError;

pub mod form;
pub mod results;

pub use form::{FormInput, UploadForm};
pub use results::{ResultNode, ResultRow, ResultsContainer};

pub type Shared<T> = Arc<Mutex<T>>;

/// Locks a page element. A panic while another holder had the lock does not
/// make the element unusable, so poisoning is ignored.
pub fn lock<T>(element: &Shared<T>) -> MutexGuard<'_, T> {
    element.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
pub enum Element {
    Form(Shared<UploadForm>),
    Results(Shared<ResultsContainer>),
}

impl Element {
    fn kind(&self) -> &'static str {
        match self {
            Element::Form(_) => "form",
            Element::Results(_) => "results container",
        }
    }
}

/// The elements of one upload page, addressed by identifier.
#[derive(Debug, Default)]
pub struct Page {
    elements: HashMap<String, Element>,
}

/// A submit event as delivered to the handler. Its default action is a full
/// page navigation to the form's action URL.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_form(&mut self, form: UploadForm) -> Shared<UploadForm> {
        let id = form.id().to_string();
        let shared = Arc::new(Mutex::new(form));
        self.elements.insert(id, Element::Form(shared.clone()));
        shared
    }

    pub fn insert_results(&mut self, container: ResultsContainer) -> Shared<ResultsContainer> {
        let id = container.id().to_string();
        let shared = Arc::new(Mutex::new(container));
        self.elements.insert(id, Element::Results(shared.clone()));
        shared
    }

    #[cfg(test)]
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn form(&self, id: &str) -> Result<Shared<UploadForm>, UploadError> {
        match self.elements.get(id) {
            Some(Element::Form(form)) => Ok(form.clone()),
            Some(other) => Err(UploadError::MissingElement(format!(
                "'{}' is a {}, expected a form",
                id,
                other.kind()
            ))),
            None => Err(UploadError::MissingElement(format!(
                "no form with id '{}'",
                id
            ))),
        }
    }

    pub fn results(&self, id: &str) -> Result<Shared<ResultsContainer>, UploadError> {
        match self.elements.get(id) {
            Some(Element::Results(container)) => Ok(container.clone()),
            Some(other) => Err(UploadError::MissingElement(format!(
                "'{}' is a {}, expected a results container",
                id,
                other.kind()
            ))),
            None => Err(UploadError::MissingElement(format!(
                "no results container with id '{}'",
                id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_elements_by_id() {
        let mut page = Page::new();
        page.insert_form(UploadForm::new("upload-form"));
        page.insert_results(ResultsContainer::new("results"));

        assert_eq!(lock(&page.form("upload-form").unwrap()).id(), "upload-form");
        assert_eq!(lock(&page.results("results").unwrap()).id(), "results");
    }

    #[test]
    fn missing_element_names_the_id() {
        let page = Page::new();
        let err = page.results("results").unwrap_err();
        assert!(matches!(err, UploadError::MissingElement(_)));
        assert!(err.to_string().contains("'results'"));
    }

    #[test]
    fn wrong_kind_is_reported_as_missing() {
        let mut page = Page::new();
        page.insert_results(ResultsContainer::new("upload-form"));
        let err = page.form("upload-form").unwrap_err();
        assert!(err.to_string().contains("expected a form"));
    }

    #[test]
    fn handles_share_the_same_element() {
        let mut page = Page::new();
        let handle = page.insert_results(ResultsContainer::new("results"));
        lock(&handle).show_error("boom");
        assert_eq!(lock(&page.results("results").unwrap()).nodes().len(), 1);
    }

    #[test]
    fn submit_event_starts_with_default_action() {
        let mut event = SubmitEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
