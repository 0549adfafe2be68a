//! Tree analysis: depth, leaves, flattening, satisfaction and validation.

use super::error::ClauseError;
use super::types::{CourseRef, Operator, PrerequisiteClause};
use std::collections::HashSet;

impl PrerequisiteClause {
    /// Returns the depth of this tree.
    ///
    /// - Leaf nodes have depth 1
    /// - Groups have depth = 1 + max(child depths)
    pub fn depth(&self) -> usize {
        match self {
            PrerequisiteClause::Leaf(_) => 1,
            PrerequisiteClause::Compound { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Returns the number of course references in this tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            PrerequisiteClause::Leaf(_) => 1,
            PrerequisiteClause::Compound { children, .. } => {
                children.iter().map(|c| c.leaf_count()).sum()
            }
        }
    }

    /// Visits every course reference in pre-order.
    pub fn visit_leaves<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(&'a CourseRef),
    {
        match self {
            PrerequisiteClause::Leaf(course) => visitor(course),
            PrerequisiteClause::Compound { children, .. } => {
                for child in children {
                    child.visit_leaves(visitor);
                }
            }
        }
    }

    /// Returns all referenced course ids in pre-order, duplicates included.
    pub fn course_ids(&self) -> Vec<&str> {
        let mut ids = Vec::with_capacity(self.leaf_count());
        self.visit_leaves(&mut |course| ids.push(course.id.as_str()));
        ids
    }

    /// Merges nested groups that share their parent's operator.
    ///
    /// For example, `and(and(A, B), C)` becomes `and(A, B, C)`. Groups with
    /// an unrecognized operator are left as they are.
    pub fn flatten(&self) -> PrerequisiteClause {
        match self {
            PrerequisiteClause::Leaf(course) => PrerequisiteClause::Leaf(course.clone()),
            PrerequisiteClause::Compound { operator, children } => {
                let mut flat = Vec::with_capacity(children.len());
                for child in children {
                    match child.flatten() {
                        PrerequisiteClause::Compound {
                            operator: nested_operator,
                            children: mut nested,
                        } if operator.is_recognized() && nested_operator == *operator => {
                            flat.append(&mut nested);
                        }
                        other => flat.push(other),
                    }
                }
                PrerequisiteClause::Compound {
                    operator: operator.clone(),
                    children: flat,
                }
            }
        }
    }

    /// Returns true if the completed courses satisfy this requirement.
    ///
    /// Groups that render to nothing (empty, or with an unrecognized
    /// operator) impose no requirement and are skipped by their parent.
    pub fn is_satisfied_by(&self, completed: &HashSet<String>) -> bool {
        self.is_satisfied_with(|id| completed.contains(id))
    }

    /// Like [`is_satisfied_by`](Self::is_satisfied_by) with a custom
    /// predicate deciding whether a course id has been completed.
    pub fn is_satisfied_with<F>(&self, taken: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.evaluate(&taken).unwrap_or(true)
    }

    /// `None` means the node imposes no requirement.
    fn evaluate<F>(&self, taken: &F) -> Option<bool>
    where
        F: Fn(&str) -> bool,
    {
        match self {
            PrerequisiteClause::Leaf(course) if course.id.is_empty() => None,
            PrerequisiteClause::Leaf(course) => Some(taken(&course.id)),
            PrerequisiteClause::Compound { operator, children } => {
                let mut results = children.iter().filter_map(|c| c.evaluate(taken)).peekable();
                results.peek()?;
                match operator {
                    Operator::And => Some(results.all(|ok| ok)),
                    Operator::Or => Some(results.any(|ok| ok)),
                    Operator::Unrecognized(_) => None,
                }
            }
        }
    }

    /// Checks the tree for malformations that [`serialize`](super::serialize)
    /// silently omits.
    ///
    /// Returns the first problem found in pre-order.
    pub fn validate(&self) -> Result<(), ClauseError> {
        self.validate_at(&mut String::from("$"))
    }

    fn validate_at(&self, path: &mut String) -> Result<(), ClauseError> {
        match self {
            PrerequisiteClause::Leaf(course) => {
                if course.id.trim().is_empty() {
                    return Err(ClauseError::EmptyCourseId { path: path.clone() });
                }
                Ok(())
            }
            PrerequisiteClause::Compound { operator, children } => {
                if let Operator::Unrecognized(tag) = operator {
                    return Err(ClauseError::UnrecognizedOperator {
                        operator: tag.clone(),
                        path: path.clone(),
                    });
                }
                if children.is_empty() {
                    return Err(ClauseError::EmptyCompound { path: path.clone() });
                }
                for (i, child) in children.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{i}]"));
                    child.validate_at(path)?;
                    path.truncate(len);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prereq::PrerequisiteClause as C;

    fn sample() -> C {
        // (A and (B or C)) or D
        C::or(vec![
            C::and(vec![C::leaf("A"), C::or(vec![C::leaf("B"), C::leaf("C")])]),
            C::leaf("D"),
        ])
    }

    fn completed(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_depth_and_leaf_count() {
        assert_eq!(C::leaf("A").depth(), 1);
        assert_eq!(sample().depth(), 4);
        assert_eq!(sample().leaf_count(), 4);
        assert_eq!(C::and(vec![]).depth(), 1);
        assert_eq!(C::and(vec![]).leaf_count(), 0);
    }

    #[test]
    fn test_course_ids_preorder() {
        assert_eq!(sample().course_ids(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_flatten() {
        let nested = C::and(vec![
            C::and(vec![C::leaf("A"), C::and(vec![C::leaf("B")])]),
            C::or(vec![C::leaf("C"), C::or(vec![C::leaf("D"), C::leaf("E")])]),
        ]);
        let flat = nested.flatten();

        assert_eq!(flat.children().map(<[_]>::len), Some(3));
        assert_eq!(flat.depth(), 3);
        assert_eq!(flat.to_string(), nested.to_string());
        assert_eq!(flat.to_string(), "A and B and (C or D or E)");
    }

    #[test]
    fn test_flatten_keeps_unrecognized_groups() {
        let xor = Operator::Unrecognized("xor".into());
        let tree = C::compound(
            xor.clone(),
            vec![C::compound(xor, vec![C::leaf("A")])],
        );
        assert_eq!(tree.flatten(), tree);
    }

    #[test]
    fn test_is_satisfied_by() {
        let tree = sample();
        assert!(tree.is_satisfied_by(&completed(&["D"])));
        assert!(tree.is_satisfied_by(&completed(&["A", "C"])));
        assert!(!tree.is_satisfied_by(&completed(&["A"])));
        assert!(!tree.is_satisfied_by(&completed(&["B", "C"])));
        assert!(!tree.is_satisfied_by(&HashSet::new()));
    }

    #[test]
    fn test_is_satisfied_skips_empty_and_unknown_groups() {
        let tree = C::and(vec![
            C::leaf("A"),
            C::compound(Operator::Unrecognized("xor".into()), vec![C::leaf("Z")]),
            C::or(vec![]),
        ]);
        assert!(tree.is_satisfied_by(&completed(&["A"])));
        assert!(C::or(vec![]).is_satisfied_by(&HashSet::new()));
    }

    #[test]
    fn test_is_satisfied_with_predicate() {
        let tree = C::and(vec![C::leaf("MATH 1551"), C::leaf("MATH 1552")]);
        assert!(tree.is_satisfied_with(|id| id.starts_with("MATH")));
        assert!(!tree.is_satisfied_with(|id| id.ends_with("1551")));
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_path() {
        let tree = C::or(vec![
            C::leaf("A"),
            C::and(vec![C::leaf("B"), C::compound(Operator::from("nor"), vec![])]),
        ]);
        let err = tree.validate().unwrap_err();
        assert_eq!(
            err,
            ClauseError::UnrecognizedOperator {
                operator: "nor".into(),
                path: "$[1][1]".into(),
            }
        );
        assert_eq!(err.path(), "$[1][1]");
    }

    #[test]
    fn test_validate_empty_group_and_blank_id() {
        assert_eq!(
            C::and(vec![]).validate(),
            Err(ClauseError::EmptyCompound { path: "$".into() })
        );
        assert_eq!(
            C::and(vec![C::leaf("A"), C::leaf("  ")]).validate(),
            Err(ClauseError::EmptyCourseId { path: "$[1]".into() })
        );
    }
}
