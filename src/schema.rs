use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::classify::{classify, FieldKind, InferenceOptions};

/// Parsed env file: insertion ordered, unique keys.
pub type EnvMapping = IndexMap<String, String>;

static JS_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub kind: FieldKind,
}

/// Ordered list of fields rendered as a `z.object({ ... })` literal.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, key: impl Into<String>, kind: FieldKind) {
        self.fields.push(FieldDescriptor {
            key: key.into(),
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn finish(self) -> String {
        if self.fields.is_empty() {
            return "z.object({})".to_string();
        }

        let mut out = String::from("z.object({\n");
        for f in &self.fields {
            out.push_str("  ");
            out.push_str(&object_key(&f.key));
            out.push_str(": ");
            out.push_str(f.kind.validator());
            out.push_str(",\n");
        }
        out.push_str("})");
        out
    }
}

/// Classify every entry, keeping the mapping's order.
pub fn describe_fields(env: &EnvMapping, opts: &InferenceOptions) -> SchemaBuilder {
    let mut builder = SchemaBuilder::new();
    for (key, value) in env {
        builder.push(key.as_str(), classify(value, opts));
    }
    builder
}

pub fn generate_schema(env: &EnvMapping, opts: &InferenceOptions) -> String {
    describe_fields(env, opts).finish()
}

// Env keys are usually identifiers, but dotenv accepts `my-key` and `a.b` too.
fn object_key(key: &str) -> String {
    if JS_IDENT.is_match(key) {
        key.to_string()
    } else {
        serde_json::to_string(key).expect("string keys always serialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> EnvMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_preserves_insertion_order() {
        let env = mapping(&[("B", "1"), ("A", ""), ("C", "x")]);
        let out = generate_schema(&env, &InferenceOptions::default());

        let b = out.find("B:").unwrap();
        let a = out.find("A:").unwrap();
        let c = out.find("C:").unwrap();
        assert!(b < a && a < c, "order changed: {out}");
    }

    #[test]
    fn test_two_field_order() {
        let env = mapping(&[("A", "1"), ("B", "")]);
        let out = generate_schema(&env, &InferenceOptions::default());
        assert_eq!(
            out,
            "z.object({\n  A: z.coerce.number(),\n  B: z.string().optional(),\n})"
        );
    }

    #[test]
    fn test_mixed_mapping() {
        let env = mapping(&[
            ("PORT", "3000"),
            ("API_URL", "https://example.com"),
            ("NAME", ""),
            ("DEBUG", "true"),
        ]);
        let out = generate_schema(&env, &InferenceOptions::default());
        let expected = concat!(
            "z.object({\n",
            "  PORT: z.coerce.number(),\n",
            "  API_URL: z.string().url(),\n",
            "  NAME: z.string().optional(),\n",
            "  DEBUG: z.string(),\n",
            "})",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_mapping() {
        let out = generate_schema(&EnvMapping::new(), &InferenceOptions::default());
        assert_eq!(out, "z.object({})");
    }

    #[test]
    fn test_idempotent() {
        let env = mapping(&[("X", "1"), ("Y", "http://a.b"), ("Z", "")]);
        let opts = InferenceOptions::default();
        assert_eq!(generate_schema(&env, &opts), generate_schema(&env, &opts));
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let env = mapping(&[("my-key", "v"), ("1ST", "v"), ("OK_1", "v")]);
        let out = generate_schema(&env, &InferenceOptions::default());
        assert!(out.contains("  \"my-key\": z.string(),\n"));
        assert!(out.contains("  \"1ST\": z.string(),\n"));
        assert!(out.contains("  OK_1: z.string(),\n"));
    }

    #[test]
    fn test_quoted_keys_are_escaped() {
        let mut b = SchemaBuilder::new();
        b.push(r#"a"b\c"#, FieldKind::PlainString);
        assert_eq!(b.finish(), "z.object({\n  \"a\\\"b\\\\c\": z.string(),\n})");
    }

    #[test]
    fn test_describe_fields() {
        let env = mapping(&[("PORT", "8080"), ("HOST", "")]);
        let opts = InferenceOptions {
            infer_numbers: false,
        };
        let b = describe_fields(&env, &opts);
        assert_eq!(b.len(), 2);
        assert_eq!(
            b.fields(),
            &[
                FieldDescriptor {
                    key: "PORT".to_string(),
                    kind: FieldKind::PlainString,
                },
                FieldDescriptor {
                    key: "HOST".to_string(),
                    kind: FieldKind::OptionalString,
                },
            ]
        );
    }
}
