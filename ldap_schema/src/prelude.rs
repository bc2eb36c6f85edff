pub use crate::{
    data::{parse_generalized_time, NormalizedValue},
    name::{Dn, Rdn},
    schema::{
        AttributeField, AttributeType, ClassField, MatchingRule, ObjectClass, ObjectClassKind,
        Schema, SchemaDocument, Syntax,
    },
    AnyError,
};
