//! The JSON schema document served by the directory backend.

use indexmap::IndexMap;

use crate::registry::SchemaElement;

/// Raw schema as served by the backend.
///
/// Maps are keyed by lower-cased name (syntaxes by oid). Document order of
/// `attributes` is kept and becomes the natural order of the attribute
/// registry.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeSchema>,
    #[serde(rename = "objectClasses", default)]
    pub object_classes: IndexMap<String, ObjectClassSchema>,
    #[serde(default)]
    pub syntaxes: IndexMap<String, Syntax>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSchema {
    #[serde(default)]
    pub oid: String,
    /// Display name, usually the first of `names`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "desc", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub obsolete: bool,
    /// Superior attribute types. Only the first entry is used.
    #[serde(default, deserialize_with = "deserialize_superiors")]
    pub sup: Vec<String>,

    // Matching rules and syntax are inherited from the superior when absent.
    // `null` and a missing key both mean absent.
    #[serde(default)]
    pub equality: Option<String>,
    #[serde(default)]
    pub ordering: Option<String>,
    #[serde(rename = "substr", default)]
    pub substring: Option<String>,
    #[serde(default)]
    pub syntax: Option<String>,

    #[serde(default)]
    pub single_value: bool,
    #[serde(default)]
    pub no_user_mod: bool,
    #[serde(default)]
    pub usage: Option<String>,
}

impl AttributeSchema {
    pub fn new(oid: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            oid: oid.into(),
            name: Some(name.clone()),
            names: vec![name],
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.names.push(alias.into());
        self
    }

    pub fn with_sup(mut self, sup: impl Into<String>) -> Self {
        self.sup = vec![sup.into()];
        self
    }

    pub fn with_equality(mut self, rule: impl Into<String>) -> Self {
        self.equality = Some(rule.into());
        self
    }

    pub fn with_syntax(mut self, oid: impl Into<String>) -> Self {
        self.syntax = Some(oid.into());
        self
    }
}

impl SchemaElement for AttributeSchema {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn canonical_name(&self) -> &str {
        canonical_name(&self.name, &self.names, &self.oid)
    }

    fn superior_name(&self) -> Option<&str> {
        self.sup.first().map(|s| s.as_str())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClassKind {
    Structural,
    Abstract,
    Auxiliary,
}

impl Default for ObjectClassKind {
    fn default() -> Self {
        Self::Structural
    }
}

impl ObjectClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Abstract => "abstract",
            Self::Auxiliary => "auxiliary",
        }
    }
}

impl std::fmt::Display for ObjectClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectClassSchema {
    #[serde(default)]
    pub oid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "desc", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub obsolete: bool,
    #[serde(default, deserialize_with = "deserialize_superiors")]
    pub sup: Vec<String>,
    #[serde(default)]
    pub kind: ObjectClassKind,
    #[serde(default)]
    pub must: Vec<String>,
    #[serde(default)]
    pub may: Vec<String>,
}

impl ObjectClassSchema {
    pub fn new(oid: impl Into<String>, name: impl Into<String>, kind: ObjectClassKind) -> Self {
        let name = name.into();
        Self {
            oid: oid.into(),
            name: Some(name.clone()),
            names: vec![name],
            kind,
            ..Default::default()
        }
    }

    pub fn with_sup(mut self, sup: impl Into<String>) -> Self {
        self.sup = vec![sup.into()];
        self
    }

    pub fn with_must(mut self, attr: impl Into<String>) -> Self {
        self.must.push(attr.into());
        self
    }

    pub fn with_may(mut self, attr: impl Into<String>) -> Self {
        self.may.push(attr.into());
        self
    }
}

impl SchemaElement for ObjectClassSchema {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn canonical_name(&self) -> &str {
        canonical_name(&self.name, &self.names, &self.oid)
    }

    fn superior_name(&self) -> Option<&str> {
        self.sup.first().map(|s| s.as_str())
    }
}

/// An LDAP syntax definition.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Syntax {
    #[serde(default)]
    pub oid: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub not_human_readable: bool,
}

impl Syntax {
    #[inline]
    pub fn is_human_readable(&self) -> bool {
        !self.not_human_readable
    }
}

impl std::fmt::Display for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

fn canonical_name<'a>(name: &'a Option<String>, names: &'a [String], oid: &'a str) -> &'a str {
    name.as_deref()
        .filter(|n| !n.is_empty())
        .or_else(|| names.first().map(|n| n.as_str()))
        .unwrap_or(oid)
}

/// Accepts `"sup": ["a", ...]`, `"sup": "a"` and `"sup": null`.
fn deserialize_superiors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;

    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(formatter, "a superior name or a list of superior names")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(vec![v])
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }
    }

    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_attribute_deser_null_and_missing_fields() {
        let attr = serde_json::from_str::<AttributeSchema>(
            r#"{
            "oid": "2.5.4.4",
            "name": "sn",
            "names": ["sn", "surname"],
            "desc": null,
            "sup": ["name"],
            "equality": null,
            "single_value": false,
            "usage": "userApplications"
        }"#,
        )
        .unwrap();
        assert_eq!(
            attr,
            AttributeSchema {
                oid: "2.5.4.4".into(),
                name: Some("sn".into()),
                names: vec!["sn".into(), "surname".into()],
                sup: vec!["name".into()],
                usage: Some("userApplications".into()),
                ..Default::default()
            }
        );
        assert_eq!(attr.superior_name(), Some("name"));
    }

    #[test]
    fn test_empty_equality_is_present() {
        let attr =
            serde_json::from_str::<AttributeSchema>(r#"{"oid": "1", "equality": ""}"#).unwrap();
        assert_eq!(attr.equality, Some(String::new()));
    }

    #[test]
    fn test_superior_shapes() {
        let oc = serde_json::from_str::<ObjectClassSchema>(
            r#"{"oid": "1", "names": ["a"], "sup": "top", "kind": "auxiliary"}"#,
        )
        .unwrap();
        assert_eq!(oc.sup, vec!["top".to_string()]);
        assert_eq!(oc.kind, ObjectClassKind::Auxiliary);

        let oc = serde_json::from_str::<ObjectClassSchema>(
            r#"{"oid": "1", "names": ["a"], "sup": null}"#,
        )
        .unwrap();
        assert!(oc.sup.is_empty());
        assert_eq!(oc.kind, ObjectClassKind::Structural);
    }

    #[test]
    fn test_canonical_name_fallbacks() {
        let mut attr = AttributeSchema::new("2.5.4.3", "cn").with_alias("commonName");
        assert_eq!(attr.canonical_name(), "cn");
        attr.name = None;
        attr.names = vec!["commonName".into()];
        assert_eq!(attr.canonical_name(), "commonName");
        attr.names.clear();
        assert_eq!(attr.canonical_name(), "2.5.4.3");
    }
}
