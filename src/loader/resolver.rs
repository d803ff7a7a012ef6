use crate::error::{CompileError, Result};
use crate::models::{CanonicalSpec, SchemaNode};
use serde_json::Value;

/// Outcome of following a node's reference chain
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// A literal node, plus the pointers followed to reach it (outermost first)
    Literal { node: &'a Value, via: Vec<String> },
    /// The chain re-entered a pointer already on the current path
    Cycle { pointer: String },
}

/// Resolves same-document `#/a/b/c` pointers against one spec
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    spec: &'a CanonicalSpec,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(spec: &'a CanonicalSpec) -> Self {
        Self { spec }
    }

    /// Look up one pointer
    pub fn lookup(&self, pointer: &str) -> Result<&'a Value> {
        let unresolvable = || CompileError::UnresolvableReference {
            pointer: pointer.to_string(),
        };

        let path = pointer.strip_prefix('#').ok_or_else(unresolvable)?;
        if path.is_empty() {
            return Ok(self.spec.root());
        }
        let path = path.strip_prefix('/').ok_or_else(unresolvable)?;

        let mut current = self.spec.root();
        for segment in path.split('/') {
            let key = segment.replace("~1", "/").replace("~0", "~");
            current = match current {
                Value::Object(map) => map.get(&key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(unresolvable)?;
        }
        Ok(current)
    }

    /// Follow chained references from `node` until a literal node is reached.
    ///
    /// `path` holds the pointers already being expanded by the caller. Hitting
    /// one of them (or one seen earlier in this chain) yields
    /// [`Resolution::Cycle`]; a pointer that names no node is an error.
    pub fn follow(&self, node: &'a Value, path: &[String]) -> Result<Resolution<'a>> {
        let mut current = node;
        let mut via: Vec<String> = Vec::new();

        while let SchemaNode::Reference(pointer) = SchemaNode::classify(current) {
            if path.iter().chain(via.iter()).any(|seen| seen == pointer) {
                tracing::trace!("reference cycle at {}", pointer);
                return Ok(Resolution::Cycle {
                    pointer: pointer.to_string(),
                });
            }
            current = self.lookup(pointer)?;
            via.push(pointer.to_string());
        }

        Ok(Resolution::Literal { node: current, via })
    }

    /// Follow a reference chain where a cycle is itself an error, e.g. for
    /// `requestBody` objects that must end in a literal mapping.
    pub fn resolve(&self, node: &'a Value) -> Result<(&'a Value, Vec<String>)> {
        match self.follow(node, &[])? {
            Resolution::Literal { node, via } => Ok((node, via)),
            Resolution::Cycle { pointer } => Err(CompileError::ReferenceCycle { pointer }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> CanonicalSpec {
        CanonicalSpec::new(json!({
            "openapi": "3.0.0",
            "paths": {},
            "components": {
                "schemas": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
                    "Alias": { "$ref": "#/components/schemas/Pet" },
                    "AliasOfAlias": { "$ref": "#/components/schemas/Alias" },
                    "Loop": { "$ref": "#/components/schemas/Loop" },
                    "a/b": { "type": "string" },
                    "List": { "allOf": [ { "type": "integer" } ] }
                }
            }
        }))
    }

    #[test]
    fn test_lookup_nested_pointer() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let node = resolver
            .lookup("#/components/schemas/Pet/properties/name")
            .unwrap();
        assert_eq!(node, &json!({ "type": "string" }));
    }

    #[test]
    fn test_lookup_escaped_segment_and_index() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        assert_eq!(
            resolver.lookup("#/components/schemas/a~1b").unwrap(),
            &json!({ "type": "string" })
        );
        assert_eq!(
            resolver.lookup("#/components/schemas/List/allOf/0").unwrap(),
            &json!({ "type": "integer" })
        );
    }

    #[test]
    fn test_lookup_missing_segment() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let err = resolver.lookup("#/components/schemas/Missing").unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnresolvableReference { ref pointer } if pointer == "#/components/schemas/Missing"
        ));
    }

    #[test]
    fn test_lookup_rejects_external_pointer() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        assert!(resolver.lookup("other.yaml#/Pet").is_err());
        assert!(resolver.lookup("#Pet").is_err());
    }

    #[test]
    fn test_follow_chained_references() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let marker = json!({ "$ref": "#/components/schemas/AliasOfAlias" });

        let Resolution::Literal { node, via } = resolver.follow(&marker, &[]).unwrap() else {
            panic!("expected literal");
        };
        assert_eq!(node["type"], "object");
        assert_eq!(
            via,
            vec![
                "#/components/schemas/AliasOfAlias",
                "#/components/schemas/Alias",
                "#/components/schemas/Pet",
            ]
        );
    }

    #[test]
    fn test_follow_literal_is_identity() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let literal = json!({ "type": "boolean" });
        assert_eq!(
            resolver.follow(&literal, &[]).unwrap(),
            Resolution::Literal {
                node: &literal,
                via: vec![]
            }
        );
    }

    #[test]
    fn test_follow_self_reference_is_cycle() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let marker = json!({ "$ref": "#/components/schemas/Loop" });
        assert!(matches!(
            resolver.follow(&marker, &[]).unwrap(),
            Resolution::Cycle { .. }
        ));
    }

    #[test]
    fn test_follow_pointer_on_path_is_cycle() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let marker = json!({ "$ref": "#/components/schemas/Pet" });
        let path = vec!["#/components/schemas/Pet".to_string()];
        assert_eq!(
            resolver.follow(&marker, &path).unwrap(),
            Resolution::Cycle {
                pointer: "#/components/schemas/Pet".to_string()
            }
        );
    }

    #[test]
    fn test_follow_same_pointer_on_sibling_path_is_not_cycle() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let marker = json!({ "$ref": "#/components/schemas/Pet" });
        let path = vec!["#/components/schemas/Owner".to_string()];
        assert!(matches!(
            resolver.follow(&marker, &path).unwrap(),
            Resolution::Literal { .. }
        ));
    }

    #[test]
    fn test_resolve_cycle_is_error() {
        let spec = spec();
        let resolver = ReferenceResolver::new(&spec);
        let marker = json!({ "$ref": "#/components/schemas/Loop" });
        let err = resolver.resolve(&marker).unwrap_err();
        assert!(matches!(
            err,
            CompileError::ReferenceCycle { ref pointer } if pointer == "#/components/schemas/Loop"
        ));
        assert!(!err.to_string().contains("does not point"));
    }
}
