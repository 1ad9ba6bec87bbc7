use crate::diff::grammar::{Grammar, PlainGrammar};
use crate::diff::result::{Mismatch, MismatchKind, PathSegment, Verdict};
use crate::tree::{AstNode, Fields};

/// Compare two trees that share one schema: no rewrites, no suppressed fields.
pub fn compare(candidate: &AstNode, reference: &AstNode) -> Verdict {
    compare_with(candidate, reference, &PlainGrammar, &PlainGrammar)
}

/// Compare a candidate tree against a reference tree under their grammars.
///
/// Every visited node is first normalized by its own grammar. Required fields
/// come from the reference: each reference field not suppressed by
/// `reference_grammar` must exist in the candidate and match recursively.
/// Extra fields are detected on the candidate: after the reference fields are
/// checked, the candidate's field count minus the fields `candidate_grammar`
/// suppresses must equal the number of reference fields checked. Arrays
/// compare positionally and scalars by exact value. The first divergence ends
/// the comparison.
pub fn compare_with(
    candidate: &AstNode,
    reference: &AstNode,
    candidate_grammar: &dyn Grammar,
    reference_grammar: &dyn Grammar,
) -> Verdict {
    compare_owned(
        candidate.clone(),
        reference.clone(),
        candidate_grammar,
        reference_grammar,
    )
}

/// [`compare_with`] for callers that own both trees and no longer need them.
///
/// Nodes are normalized in place as they are visited, so no copy is made.
pub fn compare_owned(
    candidate: AstNode,
    reference: AstNode,
    candidate_grammar: &dyn Grammar,
    reference_grammar: &dyn Grammar,
) -> Verdict {
    let mut ctx = CompareContext {
        candidate: candidate_grammar,
        reference: reference_grammar,
        path: Vec::new(),
    };
    match ctx.compare_node(candidate, reference) {
        Ok(()) => Verdict::Equal,
        Err(mismatch) => Verdict::Unequal(mismatch),
    }
}

struct CompareContext<'a> {
    candidate: &'a dyn Grammar,
    reference: &'a dyn Grammar,
    path: Vec<PathSegment>,
}

impl CompareContext<'_> {
    fn compare_node(&mut self, candidate: AstNode, reference: AstNode) -> Result<(), Mismatch> {
        let candidate = self.candidate.normalize_node(candidate);
        let reference = self.reference.normalize_node(reference);

        match (candidate, reference) {
            (AstNode::Object(candidate), AstNode::Object(reference)) => {
                self.compare_objects(candidate, reference)
            }
            (AstNode::Array(candidate), AstNode::Array(reference)) => {
                self.compare_arrays(candidate, reference)
            }
            (AstNode::Scalar(candidate), AstNode::Scalar(reference)) => {
                if candidate.shape() != reference.shape() {
                    return Err(self.mismatch(MismatchKind::TypeMismatch {
                        expected: reference.shape(),
                        found: candidate.shape(),
                    }));
                }
                if candidate != reference {
                    return Err(self.mismatch(MismatchKind::ValueMismatch {
                        expected: reference,
                        found: candidate,
                    }));
                }
                Ok(())
            }
            (candidate, reference) => Err(self.mismatch(MismatchKind::TypeMismatch {
                expected: reference.shape(),
                found: candidate.shape(),
            })),
        }
    }

    fn compare_objects(&mut self, mut candidate: Fields, reference: Fields) -> Result<(), Mismatch> {
        let candidate_kind = candidate.kind().map(ToOwned::to_owned);
        let reference_kind = reference.kind().map(ToOwned::to_owned);

        let candidate_len = candidate.len();
        let candidate_suppressed = candidate
            .keys()
            .filter(|key| self.candidate.suppresses(candidate_kind.as_deref(), key))
            .count();

        let mut expected = 0;
        for (key, reference_value) in reference {
            if self.reference.suppresses(reference_kind.as_deref(), &key) {
                continue;
            }
            let Some(candidate_value) = candidate.remove(&key) else {
                return Err(self.mismatch(MismatchKind::MissingField {
                    node_kind: candidate_kind,
                    field: key,
                }));
            };
            expected += 1;

            self.path.push(PathSegment::Field(key));
            self.compare_node(candidate_value, reference_value)?;
            self.path.pop();
        }

        let found = candidate_len - candidate_suppressed;
        if found != expected {
            return Err(self.mismatch(MismatchKind::FieldCountMismatch {
                node_kind: candidate_kind,
                expected,
                found,
            }));
        }
        Ok(())
    }

    fn compare_arrays(
        &mut self,
        candidate: Vec<AstNode>,
        reference: Vec<AstNode>,
    ) -> Result<(), Mismatch> {
        if candidate.len() != reference.len() {
            return Err(self.mismatch(MismatchKind::LengthMismatch {
                expected: reference.len(),
                found: candidate.len(),
            }));
        }

        for (idx, (candidate_item, reference_item)) in
            candidate.into_iter().zip(reference).enumerate()
        {
            self.path.push(PathSegment::Index(idx));
            self.compare_node(candidate_item, reference_item)?;
            self.path.pop();
        }
        Ok(())
    }

    fn mismatch(&self, kind: MismatchKind) -> Mismatch {
        Mismatch {
            path: self.path.clone(),
            kind,
        }
    }
}
