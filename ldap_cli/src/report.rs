//! Plain text rendering of schema elements and names.

use std::fmt::Write;

use ldap_schema::{schema::ClassField, AttributeType, Dn, ObjectClass};

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn join(items: &[impl AsRef<str>]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn describe_attr(attr: &AttributeType<'_>) -> String {
    let superiors = attr.superiors().map(|s| s.name()).collect::<Vec<_>>();
    let syntax = match attr.display_syntax() {
        Some(syntax) => format!("{} ({})", syntax.description, syntax.oid),
        None => "-".to_string(),
    };
    let binary = match attr.is_binary() {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };

    let mut out = String::new();
    writeln!(&mut out, "name:        {}", attr.name()).unwrap();
    writeln!(&mut out, "oid:         {}", attr.oid()).unwrap();
    writeln!(&mut out, "aliases:     {}", join(attr.names())).unwrap();
    writeln!(&mut out, "superiors:   {}", join(&superiors)).unwrap();
    writeln!(&mut out, "equality:    {}", or_none(attr.equality())).unwrap();
    writeln!(&mut out, "ordering:    {}", or_none(attr.ordering())).unwrap();
    writeln!(&mut out, "substring:   {}", or_none(attr.substring())).unwrap();
    writeln!(&mut out, "syntax:      {}", syntax).unwrap();
    writeln!(&mut out, "binary:      {}", binary).unwrap();
    if attr.is_single_valued() {
        writeln!(&mut out, "single-valued").unwrap();
    }
    if attr.is_operational() {
        writeln!(&mut out, "operational").unwrap();
    }
    if attr.is_read_only() {
        writeln!(&mut out, "read-only").unwrap();
    }
    out
}

pub fn describe_oc(oc: &ObjectClass<'_>) -> String {
    let superiors = oc.superiors().map(|s| s.name()).collect::<Vec<_>>();

    let mut out = String::new();
    writeln!(&mut out, "name:        {}", oc.name()).unwrap();
    writeln!(&mut out, "oid:         {}", oc.oid()).unwrap();
    writeln!(&mut out, "kind:        {}", oc.kind()).unwrap();
    writeln!(&mut out, "superiors:   {}", join(&superiors)).unwrap();
    writeln!(&mut out, "must:        {}", join(&oc.collect(ClassField::Must))).unwrap();
    writeln!(&mut out, "may:         {}", join(&oc.collect(ClassField::May))).unwrap();
    writeln!(&mut out, "rdn:         {}", join(&oc.rdn_candidates())).unwrap();
    out
}

pub fn describe_dn(dn: &Dn<'_>, stop_at: Option<&Dn<'_>>) -> String {
    let mut out = String::new();
    writeln!(&mut out, "dn:          {}", dn).unwrap();
    writeln!(&mut out, "level:       {}", dn.level()).unwrap();
    for parent in dn.parents(stop_at) {
        writeln!(&mut out, "parent:      {}", parent).unwrap();
    }
    for rdn in std::iter::once(dn).chain(dn.ancestors()).map(|d| d.rdn()) {
        if !rdn.is_resolved() {
            writeln!(&mut out, "unresolved:  {}", rdn.attr_name()).unwrap();
        }
    }
    out
}

pub fn describe_match(a: &Dn<'_>, b: &Dn<'_>) -> String {
    let mut out = String::new();
    writeln!(&mut out, "matches:     {}", a.matches(b)).unwrap();
    writeln!(&mut out, "subordinate: {}", a.is_subordinate(b)).unwrap();
    out
}

#[cfg(test)]
mod tests {
    use ldap_schema::{
        schema::{AttributeSchema, ObjectClassKind, ObjectClassSchema, SchemaDocument, Syntax},
        Schema,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn schema() -> Schema {
        let mut doc = SchemaDocument::default();
        for attr in [
            AttributeSchema::new("2.5.4.41", "name")
                .with_equality("caseIgnoreMatch")
                .with_syntax("1.3.6.1.4.1.1466.115.121.1.15{32768}"),
            AttributeSchema::new("2.5.4.3", "cn")
                .with_alias("commonName")
                .with_sup("name"),
            AttributeSchema::new("0.9.2342.19200300.100.1.25", "dc")
                .with_alias("domainComponent")
                .with_equality("caseIgnoreIA5Match"),
            AttributeSchema::new("2.5.4.0", "objectClass"),
        ] {
            doc.attributes.insert(attr.names[0].to_lowercase(), attr);
        }
        for oc in [
            ObjectClassSchema::new("2.5.6.0", "top", ObjectClassKind::Abstract)
                .with_must("objectClass"),
            ObjectClassSchema::new(
                "0.9.2342.19200300.100.4.13",
                "domain",
                ObjectClassKind::Structural,
            )
            .with_sup("top")
            .with_must("dc")
            .with_may("cn"),
        ] {
            doc.object_classes.insert(oc.names[0].to_lowercase(), oc);
        }
        doc.syntaxes.insert(
            "1.3.6.1.4.1.1466.115.121.1.15".to_string(),
            Syntax {
                oid: "1.3.6.1.4.1.1466.115.121.1.15".to_string(),
                description: "Directory String".to_string(),
                not_human_readable: false,
            },
        );
        Schema::new(doc)
    }

    #[test]
    fn test_describe_attr() {
        let schema = schema();
        let out = describe_attr(&schema.attr("commonName").unwrap());
        assert_eq!(
            out,
            "name:        cn
oid:         2.5.4.3
aliases:     cn, commonName
superiors:   name
equality:    caseIgnoreMatch
ordering:    -
substring:   -
syntax:      Directory String (1.3.6.1.4.1.1466.115.121.1.15)
binary:      no
"
        );
    }

    #[test]
    fn test_describe_oc() {
        let schema = schema();
        let out = describe_oc(&schema.oc("domain").unwrap());
        assert_eq!(
            out,
            "name:        domain
oid:         0.9.2342.19200300.100.4.13
kind:        structural
superiors:   top
must:        dc, objectClass
may:         cn
rdn:         dc
"
        );
    }

    #[test]
    fn test_describe_dn() {
        let schema = schema();
        let dn = schema.dn("CN=Admin,DC=Example,dc=com");
        let out = describe_dn(&dn, None);
        assert_eq!(
            out,
            "dn:          cn=admin,dc=example,dc=com
level:       2
parent:      dc=example,dc=com
parent:      dc=com
"
        );

        let dn = schema.dn("uid=x,dc=com");
        let out = describe_dn(&dn, None);
        assert!(out.ends_with("unresolved:  uid\n"), "{}", out);
    }

    #[test]
    fn test_describe_match() {
        let schema = schema();
        let a = schema.dn("cn=x,dc=com");
        let b = schema.dn("domainComponent=COM");
        assert_eq!(
            describe_match(&a, &b),
            "matches:     false\nsubordinate: true\n"
        );
    }
}
