use crate::model::ColorRuleResult;
use std::collections::BTreeMap;
use std::fmt;

type Observer = Box<dyn FnMut(&str, &ColorRuleResult)>;

/// Latest verdict per rule test for the current session.
///
/// A result is replaced as one unit; there is no merge of partial results.
#[derive(Default)]
pub struct ResultStore {
    results: BTreeMap<String, ColorRuleResult>,
    observers: Vec<Observer>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, test_id: &str) -> Option<&ColorRuleResult> {
        self.results.get(test_id)
    }

    pub fn set(&mut self, test_id: &str, result: ColorRuleResult) {
        self.results.insert(test_id.to_string(), result);
        for observer in &mut self.observers {
            observer(test_id, &result);
        }
    }

    pub fn clear(&mut self, test_id: &str) -> Option<ColorRuleResult> {
        self.results.remove(test_id)
    }

    /// Registers a callback invoked after every `set`.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&str, &ColorRuleResult) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultStore")
            .field("results", &self.results)
            .field("observers", &self.observers.len())
            .finish()
    }
}
