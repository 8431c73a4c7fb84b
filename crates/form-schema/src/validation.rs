//! Structural validation of field descriptor trees

use crate::field::{FieldDescriptor, FieldKind, PrimitiveType};
use crate::{Error, Result};
use std::collections::HashSet;

/// Validate `descriptor` and everything below it.
///
/// `container` names the enclosing context for error messages.
pub fn check_descriptor(descriptor: &FieldDescriptor, container: &str) -> Result<()> {
    match &descriptor.kind {
        FieldKind::Primitive(p) => check_enum_default(&descriptor.id, &p.ty, &p.default),
        FieldKind::FixedCollection(f) => {
            if f.labels.is_empty() {
                return Err(Error::EmptyFixedList {
                    id: descriptor.id.clone(),
                });
            }
            check_descriptor(&f.item, &describe(descriptor))
        }
        FieldKind::DynamicCollection(c) => check_descriptor(&c.item, &describe(descriptor)),
        FieldKind::Record(r) => {
            let scope = if descriptor.id.is_empty() {
                container.to_string()
            } else {
                describe(descriptor)
            };
            let mut seen = HashSet::new();
            for field in &r.fields {
                if field.id.is_empty() {
                    return Err(Error::MissingFieldId { container: scope });
                }
                if !seen.insert(field.id.as_str()) {
                    return Err(Error::DuplicateFieldId {
                        id: field.id.clone(),
                        container: scope,
                    });
                }
                check_descriptor(field, &scope)?;
            }
            Ok(())
        }
    }
}

fn check_enum_default(id: &str, ty: &PrimitiveType, default: &serde_json::Value) -> Result<()> {
    let PrimitiveType::Enum { options } = ty else {
        return Ok(());
    };
    if options.is_empty() {
        return Ok(());
    }
    let value = match default {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if ty.has_option(&value) {
        Ok(())
    } else {
        Err(Error::InvalidEnumDefault {
            id: id.to_string(),
            value,
        })
    }
}

fn describe(descriptor: &FieldDescriptor) -> String {
    if descriptor.id.is_empty() {
        format!("{} item", descriptor.kind_name())
    } else {
        format!("'{}'", descriptor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::EnumOption;
    use serde_json::json;

    fn int(id: &str) -> FieldDescriptor {
        FieldDescriptor::primitive(id, PrimitiveType::Integer, None)
    }

    #[test]
    fn test_duplicate_sibling_ids_rejected() {
        let root = FieldDescriptor::record("", vec![int("tempo"), int("tempo")]);
        let err = check_descriptor(&root, "schema root").unwrap_err();
        assert!(matches!(err, Error::DuplicateFieldId { ref id, .. } if id == "tempo"));
    }

    #[test]
    fn test_same_id_in_different_records_allowed() {
        let root = FieldDescriptor::record(
            "",
            vec![
                FieldDescriptor::record("a", vec![int("name")]),
                FieldDescriptor::record("b", vec![int("name")]),
            ],
        );
        assert!(check_descriptor(&root, "schema root").is_ok());
    }

    #[test]
    fn test_missing_id_in_record_rejected() {
        let root = FieldDescriptor::record("", vec![int("")]);
        assert!(matches!(
            check_descriptor(&root, "schema root"),
            Err(Error::MissingFieldId { .. })
        ));
    }

    #[test]
    fn test_fixed_list_needs_labels() {
        let field = FieldDescriptor::fixed_collection("w", int(""), Vec::new(), None);
        assert!(matches!(
            check_descriptor(&field, "schema root"),
            Err(Error::EmptyFixedList { .. })
        ));
    }

    #[test]
    fn test_enum_default_must_be_an_option() {
        let ty = PrimitiveType::Enum {
            options: vec![EnumOption {
                value: "forward".into(),
                label: None,
            }],
        };
        let field = FieldDescriptor::primitive("dir", ty, Some(json!("sideways")));
        assert!(matches!(
            check_descriptor(&field, "schema root"),
            Err(Error::InvalidEnumDefault { .. })
        ));
    }
}
