//! Option data for the combobox.
//!
//! The option list belongs to the shell. The controller reads it through the
//! [`ComboboxModel`] trait and never mutates it; replacing the list goes
//! through [`ComboboxController::set_model`](crate::ComboboxController::set_model).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an option, unique within its list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    /// A numeric identifier.
    Number(i64),
    /// A string identifier.
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A selectable option.
///
/// `payload` is opaque to the core: typically the image or icon the shell
/// renders next to the name.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboOption<P = ()> {
    /// Identity reported in selection notifications.
    pub id: OptionId,
    /// Display name; also the type-ahead search key.
    pub name: String,
    /// Display payload, never inspected by the core.
    pub payload: P,
}

impl ComboOption<()> {
    /// Create an option without a payload.
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: (),
        }
    }
}

impl<P> ComboOption<P> {
    /// Create an option carrying a display payload.
    pub fn with_payload(id: impl Into<OptionId>, name: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload,
        }
    }
}

/// Read-only access to the option list.
///
/// Implement this trait to back the combobox with a custom data source.
pub trait ComboboxModel: Send + Sync {
    /// Get the number of options.
    fn row_count(&self) -> usize;

    /// Get the identity of the option at `index`.
    ///
    /// Returns `None` if the index is out of bounds.
    fn option_id(&self, index: usize) -> Option<OptionId>;

    /// Get the name of the option at `index`.
    ///
    /// Returns `None` if the index is out of bounds.
    fn name(&self, index: usize) -> Option<String>;

    /// Whether the model has no options.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Find the index of the option with the given identity.
    fn find_id(&self, id: &OptionId) -> Option<usize> {
        (0..self.row_count()).find(|&i| self.option_id(i).as_ref() == Some(id))
    }

    /// Indices of options whose name starts with `prefix`, case-insensitively,
    /// in list order.
    fn filter_prefix(&self, prefix: &str) -> Vec<usize> {
        let prefix = prefix.to_lowercase();
        (0..self.row_count())
            .filter(|&i| {
                self.name(i)
                    .is_some_and(|name| name.to_lowercase().starts_with(&prefix))
            })
            .collect()
    }
}

/// A model backed by a vector of options.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionList<P = ()> {
    options: Vec<ComboOption<P>>,
}

impl<P> OptionList<P> {
    /// Create a model with the given options.
    pub fn new(options: Vec<ComboOption<P>>) -> Self {
        Self { options }
    }

    /// Create an empty model.
    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Get a reference to the options.
    pub fn options(&self) -> &[ComboOption<P>] {
        &self.options
    }

    /// Get the option at `index`.
    pub fn get(&self, index: usize) -> Option<&ComboOption<P>> {
        self.options.get(index)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl OptionList<()> {
    /// Create a model from names alone; ids are the zero-based positions.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| ComboOption::new(i as i64, name))
                .collect(),
        )
    }
}

impl<P> Default for OptionList<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> From<Vec<ComboOption<P>>> for OptionList<P> {
    fn from(options: Vec<ComboOption<P>>) -> Self {
        Self::new(options)
    }
}

impl<P: Send + Sync> ComboboxModel for OptionList<P> {
    fn row_count(&self) -> usize {
        self.options.len()
    }

    fn option_id(&self, index: usize) -> Option<OptionId> {
        self.options.get(index).map(|o| o.id.clone())
    }

    fn name(&self, index: usize) -> Option<String> {
        self.options.get(index).map(|o| o.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_list_access() {
        let model = OptionList::new(vec![
            ComboOption::new("x1", "ONE"),
            ComboOption::new(2, "TWO"),
        ]);

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.name(0), Some("ONE".to_string()));
        assert_eq!(model.option_id(1), Some(OptionId::Number(2)));
        assert_eq!(model.name(2), None);
        assert!(!ComboboxModel::is_empty(&model));
    }

    #[test]
    fn test_find_id() {
        let model = OptionList::new(vec![
            ComboOption::new("a", "Alpha"),
            ComboOption::new("b", "Beta"),
        ]);
        assert_eq!(model.find_id(&OptionId::from("b")), Some(1));
        assert_eq!(model.find_id(&OptionId::from("z")), None);
    }

    #[test]
    fn test_filter_prefix_is_case_insensitive() {
        let model = OptionList::from_names(["Apple", "application", "Banana", "APRICOT"]);
        assert_eq!(model.filter_prefix("app"), vec![0, 1]);
        assert_eq!(model.filter_prefix("AP"), vec![0, 1, 3]);
        assert!(model.filter_prefix("xyz").is_empty());
    }

    #[test]
    fn test_payload_is_carried_untouched() {
        let flag = ComboOption::with_payload("1", "Italy", vec![0u8, 1, 2]);
        let model = OptionList::new(vec![flag]);
        assert_eq!(model.get(0).map(|o| o.payload.len()), Some(3));
    }

    #[test]
    fn test_option_id_display() {
        assert_eq!(OptionId::from(7).to_string(), "7");
        assert_eq!(OptionId::from("x2").to_string(), "x2");
    }
}
