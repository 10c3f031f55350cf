/// Prefix of references to reusable components.
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// Extracts the component name from a `$ref` path into the given components section.
///
/// `#/components/schemas/Pet` with section `schemas` yields `Pet`. JSON Pointer escapes
/// (`~1` for `/`, `~0` for `~`) are decoded. Returns `None` for external references and
/// for pointers into a different section.
pub fn parse_component_ref(ref_path: &str, section: &str) -> Option<String> {
  let name = ref_path
    .strip_prefix(COMPONENTS_PREFIX)?
    .strip_prefix(section)?
    .strip_prefix('/')?;

  if name.is_empty() || name.contains('/') {
    return None;
  }

  Some(unescape_pointer_segment(name))
}

/// Extracts the schema name from a `$ref` path.
///
/// Besides `#/components/schemas/Name`, any other in-document pointer resolves to its last
/// segment (`#/definitions/Name` yields `Name`) and is then looked up among the component
/// schemas.
pub fn parse_schema_ref(ref_path: &str) -> Option<String> {
  if let Some(name) = parse_component_ref(ref_path, "schemas") {
    return Some(name);
  }

  let pointer = ref_path.strip_prefix("#/")?;
  pointer
    .rsplit('/')
    .next()
    .filter(|segment| !segment.is_empty())
    .map(unescape_pointer_segment)
}

fn unescape_pointer_segment(segment: &str) -> String {
  segment.replace("~1", "/").replace("~0", "~")
}
