use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Attributes carried by an open tag.
///
/// Plain `name=value` pairs keep their insertion order, which decides the order attributes are
/// written back when cleaning up bbcode. Setting an existing name replaces the value in place.
///
/// Tokens parsed from html additionally hold the inline style as a flat property map and the
/// class list, both empty for bbcode tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    values: Vec<(String, String)>,

    /// Inline css properties, `font-weight: bold` is stored as `("font-weight", "bold")`.
    style: Vec<(String, String)>,

    class: Vec<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(k, _)| k == name)
    }

    /// Set attribute `name` to `value`, return the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.values.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.values.iter().position(|(k, _)| k == name)?;
        Some(self.values.remove(pos).1)
    }

    /// All plain attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The unnamed value, `[tag=value]`.
    pub fn default_value(&self) -> Option<&str> {
        self.get(crate::DEFAULT_ATTR)
    }

    /// Get inline css property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_style(&self) -> bool {
        !self.style.is_empty()
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(k, _)| *k == property) {
            Some((_, v)) => *v = value,
            None => self.style.push((property, value)),
        }
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn classes(&self) -> &[String] {
        self.class.as_slice()
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.class.contains(&class) {
            self.class.push(class);
        }
    }

    /// Check no plain attribute, style or class is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.style.is_empty() && self.class.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

struct StyleMap<'a>(&'a [(String, String)]);

impl Serialize for StyleMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Serialized as a flat map. Parsed `style` and `class` replace the raw attributes of the same
/// name when not empty.
impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in self.values.iter() {
            if (k == "style" && !self.style.is_empty()) || (k == "class" && !self.class.is_empty()) {
                continue;
            }
            map.serialize_entry(k, v)?;
        }
        if !self.style.is_empty() {
            map.serialize_entry("style", &StyleMap(&self.style))?;
        }
        if !self.class.is_empty() {
            map.serialize_entry("class", &self.class)?;
        }
        map.end()
    }
}
