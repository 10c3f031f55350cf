use crate::document::{ObjectOrReference, SchemaDef};

/// Properties in emission order.
///
/// With an ordering hint, hinted names come first (names that are not properties are
/// skipped) and the remaining properties follow in declaration order. Without one,
/// declaration order is kept.
pub(crate) fn ordered_properties(schema: &SchemaDef) -> Vec<(&str, &ObjectOrReference<SchemaDef>)> {
  let Some(order) = schema.property_order.as_deref() else {
    return schema
      .properties
      .iter()
      .map(|(name, prop)| (name.as_str(), prop))
      .collect();
  };

  let mut ordered: Vec<(&str, &ObjectOrReference<SchemaDef>)> = Vec::with_capacity(schema.properties.len());
  for name in order {
    if let Some((name, prop)) = schema.properties.get_key_value(name)
      && !ordered.iter().any(|(seen, _)| *seen == name.as_str())
    {
      ordered.push((name.as_str(), prop));
    }
  }
  for (name, prop) in &schema.properties {
    if !order.contains(name) {
      ordered.push((name.as_str(), prop));
    }
  }
  ordered
}

pub(crate) fn is_required(schema: &SchemaDef, property: &str) -> bool {
  schema.required.iter().any(|name| name == property)
}
