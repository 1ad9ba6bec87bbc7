//! Grammar-specific rewrites that converge Hermes and Esprima trees.
//!
//! Both parsers emit ESTree, but Hermes splits literals into typed kinds,
//! wraps programs in a `File` node, and always carries `directive` on
//! expression statements, while Esprima nests template element strings and
//! keeps a redundant `value` on regex literals. Each grammar rewrites one node
//! at a time; the comparator applies it to every node it visits.

use ast_diff_core::{compare_owned, AstNode, Fields, Grammar, Suppression, Verdict};

use crate::kind::NodeKind;
use crate::rules::{SuppressionRules, ESPRIMA_RULES, HERMES_RULES};

/// The only directive prologue both parsers agree to report.
pub const USE_STRICT: &str = "use strict";

/// Candidate grammar: Hermes `-dump-ast` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct HermesGrammar;

/// Reference grammar: Esprima `.tree.json` fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsprimaGrammar;

impl HermesGrammar {
    pub fn rules(&self) -> &'static SuppressionRules {
        &HERMES_RULES
    }
}

impl EsprimaGrammar {
    pub fn rules(&self) -> &'static SuppressionRules {
        &ESPRIMA_RULES
    }
}

impl Suppression for HermesGrammar {
    fn suppresses(&self, kind: Option<&str>, field: &str) -> bool {
        self.rules().suppresses(kind, field)
    }
}

impl Suppression for EsprimaGrammar {
    fn suppresses(&self, kind: Option<&str>, field: &str) -> bool {
        self.rules().suppresses(kind, field)
    }
}

impl Grammar for HermesGrammar {
    fn normalize_node(&self, node: AstNode) -> AstNode {
        let AstNode::Object(mut fields) = node else {
            return node;
        };
        let Some(mut kind) = fields.kind().map(ToOwned::to_owned) else {
            return AstNode::Object(fields);
        };

        match kind.parse::<NodeKind>().ok() {
            Some(NodeKind::Empty) => return AstNode::null(),
            Some(NodeKind::File) => match fields.remove("program") {
                Some(AstNode::Object(program)) => {
                    fields = program;
                    kind = fields.kind().unwrap_or_default().to_owned();
                }
                Some(other) => return other,
                None => {}
            },
            _ => {}
        }

        match kind.parse::<NodeKind>().ok() {
            Some(NodeKind::ExpressionStatement) => {
                if is_use_strict_literal(fields.get("expression")) {
                    fields.insert("directive", AstNode::string(USE_STRICT));
                } else {
                    fields.remove("directive");
                }
            }
            Some(literal) if literal.is_hermes_literal() => converge_literal(&mut fields, literal),
            _ => {}
        }

        AstNode::Object(fields)
    }
}

impl Grammar for EsprimaGrammar {
    fn normalize_node(&self, node: AstNode) -> AstNode {
        let AstNode::Object(mut fields) = node else {
            return node;
        };

        match NodeKind::from_kind(fields.kind()) {
            Some(NodeKind::ExpressionStatement) => {
                // Esprima records every string expression statement as a directive.
                let keep = fields
                    .get("directive")
                    .map_or(true, |directive| directive.as_str() == Some(USE_STRICT));
                if !keep {
                    fields.remove("directive");
                }
            }
            Some(NodeKind::Literal) if fields.contains_key("regex") => {
                fields.remove("value");
            }
            Some(NodeKind::TemplateLiteral) => {
                if let Some(AstNode::Array(quasis)) = fields.get_mut("quasis") {
                    quasis.iter_mut().for_each(hoist_template_value);
                }
            }
            _ => {}
        }

        AstNode::Object(fields)
    }
}

/// Compare a Hermes tree against an Esprima tree, consuming both.
pub fn compare_to_esprima(hermes: AstNode, esprima: AstNode) -> Verdict {
    compare_owned(hermes, esprima, &HermesGrammar, &EsprimaGrammar)
}

/// The statement's expression is the string `"use strict"`.
///
/// Accepts the already-converged `Literal` form so that normalizing a
/// normalized tree changes nothing.
fn is_use_strict_literal(expression: Option<&AstNode>) -> bool {
    let Some(expression) = expression else {
        return false;
    };
    matches!(
        NodeKind::from_kind(expression.kind()),
        Some(NodeKind::StringLiteral | NodeKind::Literal)
    ) && expression.get("value").and_then(AstNode::as_str) == Some(USE_STRICT)
}

fn converge_literal(fields: &mut Fields, kind: NodeKind) {
    match kind {
        NodeKind::NullLiteral => {
            fields.insert("value", AstNode::null());
        }
        NodeKind::RegExpLiteral => {
            let pattern = fields.remove("pattern").unwrap_or_else(AstNode::null);
            let flags = fields.remove("flags").unwrap_or_else(AstNode::null);
            fields.insert(
                "regex",
                AstNode::object([("pattern", pattern), ("flags", flags)]),
            );
        }
        _ => {}
    }
    fields.set_kind(NodeKind::Literal.as_str());
}

/// Move `value.cooked` and `value.raw` up onto the template element.
fn hoist_template_value(quasi: &mut AstNode) {
    let Some(element) = quasi.as_object_mut() else {
        return;
    };
    if !matches!(element.get("value"), Some(AstNode::Object(_))) {
        return;
    }
    let Some(AstNode::Object(mut value)) = element.remove("value") else {
        return;
    };
    element.insert("cooked", value.remove("cooked").unwrap_or_else(AstNode::null));
    element.insert("raw", value.remove("raw").unwrap_or_else(AstNode::null));
}

#[cfg(test)]
mod tests {
    use ast_diff_core::{normalize, AstNode, Grammar, MismatchKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{compare_to_esprima, EsprimaGrammar, HermesGrammar};

    fn tree(value: serde_json::Value) -> AstNode {
        AstNode::from(value)
    }

    #[test]
    fn null_literal_converges_on_literal() {
        let hermes = tree(json!({"type": "NullLiteral"}));
        assert_eq!(
            HermesGrammar.normalize_node(hermes.clone()),
            tree(json!({"type": "Literal", "value": null}))
        );
        let esprima = tree(json!({"type": "Literal", "value": null}));
        assert!(compare_to_esprima(hermes, esprima).is_equal());
    }

    #[test]
    fn regexp_literal_merges_pattern_and_flags() {
        let hermes = tree(json!({"type": "RegExpLiteral", "pattern": "a+", "flags": "g"}));
        assert_eq!(
            HermesGrammar.normalize_node(hermes),
            tree(json!({"type": "Literal", "regex": {"pattern": "a+", "flags": "g"}}))
        );
    }

    #[test]
    fn esprima_regex_literal_drops_value() {
        let esprima = tree(json!({
            "type": "Literal",
            "value": {},
            "raw": "/a+/g",
            "regex": {"pattern": "a+", "flags": "g"}
        }));
        assert_eq!(
            EsprimaGrammar.normalize_node(esprima),
            tree(json!({"type": "Literal", "raw": "/a+/g", "regex": {"pattern": "a+", "flags": "g"}}))
        );
    }

    #[test]
    fn file_wrapper_and_empty_statements_are_removed() {
        let hermes = tree(json!({
            "type": "File",
            "program": {"type": "Program", "body": [{"type": "Empty"}]}
        }));
        assert_eq!(
            normalize(hermes, &HermesGrammar),
            tree(json!({"type": "Program", "body": [null]}))
        );
    }

    #[test]
    fn use_strict_directive_is_synthesized_on_hermes_side() {
        let hermes = tree(json!({
            "type": "ExpressionStatement",
            "expression": {"type": "StringLiteral", "value": "use strict"},
            "directive": null
        }));
        let esprima = tree(json!({
            "type": "ExpressionStatement",
            "expression": {"type": "Literal", "value": "use strict", "raw": "'use strict'"},
            "directive": "use strict"
        }));
        assert!(compare_to_esprima(hermes, esprima).is_equal());
    }

    #[test]
    fn other_directives_are_dropped_on_both_sides() {
        let hermes = tree(json!({
            "type": "ExpressionStatement",
            "expression": {"type": "StringLiteral", "value": "use asm"},
            "directive": null
        }));
        let esprima = tree(json!({
            "type": "ExpressionStatement",
            "expression": {"type": "Literal", "value": "use asm", "raw": "'use asm'"},
            "directive": "use asm"
        }));
        assert_eq!(
            HermesGrammar.normalize_node(hermes.clone()).get("directive"),
            None
        );
        assert!(compare_to_esprima(hermes, esprima).is_equal());
    }

    #[test]
    fn template_elements_are_flattened() {
        let esprima = tree(json!({
            "type": "TemplateLiteral",
            "quasis": [
                {"type": "TemplateElement", "value": {"cooked": "a", "raw": "a"}, "tail": true}
            ],
            "expressions": []
        }));
        let hermes = tree(json!({
            "type": "TemplateLiteral",
            "quasis": [
                {"type": "TemplateElement", "tail": true, "cooked": "a", "raw": "a"}
            ],
            "expressions": []
        }));

        assert_eq!(
            EsprimaGrammar.normalize_node(esprima.clone()),
            tree(json!({
                "type": "TemplateLiteral",
                "quasis": [{"type": "TemplateElement", "tail": true, "cooked": "a", "raw": "a"}],
                "expressions": []
            }))
        );
        assert!(compare_to_esprima(hermes, esprima).is_equal());
    }

    #[test]
    fn normalization_is_idempotent_for_both_grammars() {
        let hermes = tree(json!({
            "type": "File",
            "program": {
                "type": "Program",
                "body": [
                    {
                        "type": "ExpressionStatement",
                        "expression": {"type": "StringLiteral", "value": "use strict"},
                        "directive": null
                    },
                    {"type": "Empty"},
                    {
                        "type": "ExpressionStatement",
                        "expression": {"type": "RegExpLiteral", "pattern": "x", "flags": ""},
                        "directive": null
                    }
                ]
            }
        }));
        let once = normalize(hermes, &HermesGrammar);
        assert_eq!(normalize(once.clone(), &HermesGrammar), once);

        let esprima = tree(json!({
            "type": "TemplateLiteral",
            "quasis": [{"type": "TemplateElement", "value": {"cooked": "b", "raw": "b"}}],
            "expressions": []
        }));
        let once = normalize(esprima, &EsprimaGrammar);
        assert_eq!(normalize(once.clone(), &EsprimaGrammar), once);
    }

    #[test]
    fn suppressed_fields_are_ignored_per_grammar() {
        let hermes = tree(json!({
            "type": "Program",
            "body": [{
                "type": "FunctionDeclaration",
                "id": {"type": "Identifier", "name": "f", "typeAnnotation": null},
                "params": [],
                "body": {"type": "BlockStatement", "body": []},
                "generator": false,
                "returnType": null
            }]
        }));
        let esprima = tree(json!({
            "type": "Program",
            "body": [{
                "type": "FunctionDeclaration",
                "id": {"type": "Identifier", "name": "f", "range": [9, 10]},
                "params": [],
                "body": {"type": "BlockStatement", "body": []},
                "generator": false,
                "expression": false,
                "async": false,
                "range": [0, 15]
            }],
            "sourceType": "script",
            "range": [0, 15]
        }));
        assert!(compare_to_esprima(hermes, esprima).is_equal());
    }

    #[test]
    fn unsuppressed_extra_hermes_field_is_count_mismatch() {
        let hermes = tree(json!({"type": "Identifier", "name": "x", "optional": false}));
        let esprima = tree(json!({"type": "Identifier", "name": "x"}));
        let verdict = compare_to_esprima(hermes, esprima);
        assert!(matches!(
            verdict.mismatch().map(|m| &m.kind),
            Some(MismatchKind::FieldCountMismatch { expected: 2, found: 3, .. })
        ));
    }
}
