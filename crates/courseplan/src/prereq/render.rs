//! Natural-language rendering of prerequisite trees.
//!
//! Every node renders into its text plus the connective that joins the text
//! at its top level. The parent wraps a child in parentheses only when that
//! connective differs from its own, so `or(and(A, B), C)` reads
//! `(A and B) or C` while `and(and(A, B), C)` reads `A and B and C`.

use super::types::{Operator, PrerequisiteClause};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn of(operator: &Operator) -> Option<Self> {
        match operator {
            Operator::And => Some(Connective::And),
            Operator::Or => Some(Connective::Or),
            Operator::Unrecognized(_) => None,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Connective::And => " and ",
            Connective::Or => " or ",
        }
    }
}

#[derive(Debug)]
struct Rendered {
    text: String,
    /// Top-level connective of `text`; `None` for a lone course id
    group: Option<Connective>,
}

impl Rendered {
    fn empty() -> Self {
        Self {
            text: String::new(),
            group: None,
        }
    }

    fn into_operand_of(self, parent: Connective) -> String {
        match self.group {
            Some(group) if group != parent => format!("({})", self.text),
            _ => self.text,
        }
    }
}

/// Renders a prerequisite tree as display text, e.g. `"(CS 1331 and
/// CS 1332) or CS 2340"`.
///
/// Course ids are emitted verbatim. Groups with an unrecognized operator and
/// empty groups contribute nothing, and a group left with a single operand
/// renders as that operand.
pub fn serialize(clause: &PrerequisiteClause) -> String {
    render(clause).text
}

fn render(clause: &PrerequisiteClause) -> Rendered {
    match clause {
        PrerequisiteClause::Leaf(course) => Rendered {
            text: course.id.clone(),
            group: None,
        },
        PrerequisiteClause::Compound { operator, children } => {
            let Some(connective) = Connective::of(operator) else {
                warn!(
                    "Skipping prerequisite group with unrecognized operator {:?} ({} sub-clauses)",
                    operator.as_str(),
                    children.len()
                );
                return Rendered::empty();
            };

            let mut operands: Vec<Rendered> = children
                .iter()
                .map(render)
                .filter(|r| !r.text.is_empty())
                .collect();

            match operands.len() {
                0 => Rendered::empty(),
                1 => operands.swap_remove(0),
                _ => Rendered {
                    text: operands
                        .into_iter()
                        .map(|r| r.into_operand_of(connective))
                        .collect::<Vec<_>>()
                        .join(connective.separator()),
                    group: Some(connective),
                },
            }
        }
    }
}

impl fmt::Display for PrerequisiteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
