use crate::{
    data::{GeneralizedTime, NormalizedValue},
    name::Dn,
};

use super::Schema;

/// Equality matching rules with a dedicated normalization.
///
/// See: https://ldap.com/matching-rules/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchingRule {
    DistinguishedName,
    CaseIgnore,
    CaseIgnoreIA5,
    Integer,
    NumericString,
    GeneralizedTime,
    OctetString,
}

impl MatchingRule {
    pub const ALL: [Self; 7] = [
        Self::DistinguishedName,
        Self::CaseIgnore,
        Self::CaseIgnoreIA5,
        Self::Integer,
        Self::NumericString,
        Self::GeneralizedTime,
        Self::OctetString,
    ];

    /// Look up a rule by its schema name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "distinguishedNameMatch" => Some(Self::DistinguishedName),
            "caseIgnoreMatch" => Some(Self::CaseIgnore),
            "caseIgnoreIA5Match" => Some(Self::CaseIgnoreIA5),
            "integerMatch" => Some(Self::Integer),
            "numericStringMatch" => Some(Self::NumericString),
            "generalizedTimeMatch" => Some(Self::GeneralizedTime),
            "octetStringMatch" => Some(Self::OctetString),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DistinguishedName => "distinguishedNameMatch",
            Self::CaseIgnore => "caseIgnoreMatch",
            Self::CaseIgnoreIA5 => "caseIgnoreIA5Match",
            Self::Integer => "integerMatch",
            Self::NumericString => "numericStringMatch",
            Self::GeneralizedTime => "generalizedTimeMatch",
            Self::OctetString => "octetStringMatch",
        }
    }

    /// Normalize a raw value.
    ///
    /// Distinguished names are parsed against `schema` and re-rendered.
    /// Time values that do not parse are kept verbatim.
    pub fn normalize(&self, schema: &Schema, value: &str) -> NormalizedValue {
        match self {
            Self::DistinguishedName => NormalizedValue::Dn(Dn::parse(schema, value).to_string()),
            Self::CaseIgnore | Self::CaseIgnoreIA5 => NormalizedValue::Text(value.to_lowercase()),
            Self::Integer | Self::NumericString => NormalizedValue::number(value),
            Self::GeneralizedTime => match GeneralizedTime::parse(value) {
                Ok(t) => NormalizedValue::Time(t),
                Err(error) => {
                    tracing::debug!(%error, "keeping unparsable time value verbatim");
                    NormalizedValue::Text(value.to_string())
                }
            },
            Self::OctetString => NormalizedValue::Text(value.to_string()),
        }
    }

    pub fn matches(&self, schema: &Schema, a: &str, b: &str) -> bool {
        self.normalize(schema, a) == self.normalize(schema, b)
    }
}

impl std::fmt::Display for MatchingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize with an optional rule name, falling back to the identity.
pub fn normalize_with(schema: &Schema, rule: Option<&str>, value: &str) -> NormalizedValue {
    match rule.and_then(MatchingRule::from_name) {
        Some(rule) => rule.normalize(schema, value),
        None => NormalizedValue::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_roundtrip() {
        for rule in MatchingRule::ALL {
            assert_eq!(MatchingRule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(MatchingRule::from_name("caseExactMatch"), None);
        assert_eq!(MatchingRule::from_name("CASEIGNOREMATCH"), None);
    }

    #[test]
    fn test_normalize_without_schema_elements() {
        let schema = Schema::default();
        assert!(MatchingRule::CaseIgnore.matches(&schema, "Foo", "fOO"));
        assert!(!MatchingRule::OctetString.matches(&schema, "Foo", "fOO"));
        assert!(MatchingRule::Integer.matches(&schema, "0042", "42"));
        assert!(!MatchingRule::Integer.matches(&schema, "x", "x"));
        assert!(MatchingRule::GeneralizedTime.matches(
            &schema,
            "20230101120000Z",
            "20230101130000+0100"
        ));
        assert_eq!(
            normalize_with(&schema, Some("unknownMatch"), "MiXeD"),
            NormalizedValue::Text("MiXeD".into())
        );
        assert_eq!(
            normalize_with(&schema, None, "MiXeD"),
            NormalizedValue::Text("MiXeD".into())
        );
    }
}
