use serde::{Serialize, Deserialize};

use std::collections::HashSet;

use crate::error::{Id3Error, Result};


/// A discrete attribute.
/// The position of a value in `values` is its domain value index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub(crate) name: Option<String>,
    pub(crate) values: Vec<String>,
}


impl Attribute {
    /// Returns the name of this attribute, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }


    /// Returns the ordered domain of this attribute.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values[..]
    }


    /// Returns the number of values in the domain.
    #[inline]
    pub fn domain_size(&self) -> usize {
        self.values.len()
    }
}


/// The class set and the attribute domains a tree is built over.
/// Positions are the canonical indices used by the training table.
///
/// # Example
///
/// ```
/// use id3tree::Schema;
///
/// let schema = Schema::new(
///         ["no", "yes"],
///         vec![vec!["sunny", "rainy"], vec!["hot", "cold"]],
///     )
///     .unwrap()
///     .attribute_names(["outlook", "temperature"])
///     .unwrap();
/// assert_eq!(schema.n_attributes(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    classes: Vec<String>,
    attributes: Vec<Attribute>,
}


impl Schema {
    /// Construct a new schema without attribute names.
    pub fn new<C, S, D, V>(classes: C, domains: D) -> Result<Self>
        where C: IntoIterator<Item = S>,
              S: Into<String>,
              D: IntoIterator<Item = V>,
              V: IntoIterator<Item = S>,
    {
        let classes = classes.into_iter()
            .map(Into::into)
            .collect::<Vec<String>>();
        let attributes = domains.into_iter()
            .map(|values| {
                let values = values.into_iter()
                    .map(Into::into)
                    .collect::<Vec<String>>();
                Attribute { name: None, values }
            })
            .collect::<Vec<_>>();

        if classes.is_empty() { return Err(Id3Error::NoClass); }
        if attributes.is_empty() { return Err(Id3Error::NoAttribute); }

        let mut seen = HashSet::new();
        for label in classes.iter() {
            if !seen.insert(label.as_str()) {
                let label = label.clone();
                return Err(Id3Error::DuplicateClass { label });
            }
        }

        for (attribute, attr) in attributes.iter().enumerate() {
            if attr.values.is_empty() {
                return Err(Id3Error::EmptyDomain { attribute });
            }
            let mut seen = HashSet::new();
            for value in attr.values.iter() {
                if !seen.insert(value.as_str()) {
                    let value = value.clone();
                    return Err(Id3Error::DuplicateValue { attribute, value });
                }
            }
        }

        Ok(Self { classes, attributes })
    }


    /// Attach a name to each attribute, in attribute order.
    /// The names are only needed by the XML export.
    pub fn attribute_names<N, S>(mut self, names: N) -> Result<Self>
        where N: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let names = names.into_iter()
            .map(Into::into)
            .collect::<Vec<String>>();

        let expected = self.attributes.len();
        let got = names.len();
        if expected != got {
            return Err(Id3Error::NameCount { expected, got });
        }

        self.attributes.iter_mut()
            .zip(names)
            .for_each(|(attr, name)| { attr.name = Some(name); });

        Ok(self)
    }


    /// The car evaluation schema of the UCI repository.
    pub fn car() -> Self {
        let classes = ["unacc", "acc", "good", "vgood"];
        let domains = vec![
            vec!["vhigh", "high", "med", "low"],
            vec!["vhigh", "high", "med", "low"],
            vec!["2", "3", "4", "5more"],
            vec!["2", "4", "more"],
            vec!["small", "med", "big"],
            vec!["low", "med", "high"],
        ];
        let names = [
            "buying", "maint", "doors", "persons", "lug_boot", "safety"
        ];

        Self::new(classes, domains)
            .and_then(|schema| schema.attribute_names(names))
            .expect("The car schema is well-formed")
    }


    /// Returns the class labels.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes[..]
    }


    /// Returns the attributes.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }


    /// Returns the number of attributes.
    #[inline]
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }


    /// Returns the domain size of the given attribute.
    #[inline]
    pub fn domain_size(&self, attribute: usize) -> usize {
        self.attributes[attribute].domain_size()
    }


    /// Returns `true` if every attribute has a name.
    #[inline]
    pub fn has_names(&self) -> bool {
        self.attributes.iter().all(|attr| attr.name.is_some())
    }


    /// Returns the index of the class labeled `label`.
    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }


    /// Returns the domain value index of `value` for `attribute`.
    pub fn value_index(&self, attribute: usize, value: &str)
        -> Option<usize>
    {
        self.attributes.get(attribute)?
            .values
            .iter()
            .position(|v| v == value)
    }
}
