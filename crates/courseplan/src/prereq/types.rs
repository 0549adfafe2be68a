/// Types for prerequisite requirement trees
use serde::de::{self, value::MapAccessDeserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single required course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: String, // e.g., "CS 1331", "MATH 1552"
}

impl CourseRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Logical operator of a compound clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Every sub-clause must be satisfied
    And,
    /// At least one sub-clause must be satisfied
    Or,
    /// Operator tag the catalog produced but this crate does not know
    Unrecognized(String),
}

impl Operator {
    /// Returns the catalog tag for this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Operator::Unrecognized(_))
    }
}

impl From<&str> for Operator {
    fn from(tag: &str) -> Self {
        match tag {
            "and" => Operator::And,
            "or" => Operator::Or,
            other => Operator::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node of a prerequisite tree: one course, or an AND/OR group of sub-clauses.
///
/// On the wire a leaf is `{"id": "CS 1331"}` and a group is an array whose
/// first element is the operator tag: `["or", {"id": "A"}, ["and", ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrerequisiteClause {
    Leaf(CourseRef),
    Compound {
        operator: Operator,
        children: Vec<PrerequisiteClause>,
    },
}

impl PrerequisiteClause {
    pub fn leaf(id: impl Into<String>) -> Self {
        PrerequisiteClause::Leaf(CourseRef::new(id))
    }

    /// Creates an AND group.
    pub fn and(children: Vec<PrerequisiteClause>) -> Self {
        Self::compound(Operator::And, children)
    }

    /// Creates an OR group.
    pub fn or(children: Vec<PrerequisiteClause>) -> Self {
        Self::compound(Operator::Or, children)
    }

    pub fn compound(operator: Operator, children: Vec<PrerequisiteClause>) -> Self {
        PrerequisiteClause::Compound { operator, children }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PrerequisiteClause::Leaf(_))
    }

    /// Returns the sub-clauses if this is a compound group.
    pub fn children(&self) -> Option<&[PrerequisiteClause]> {
        match self {
            PrerequisiteClause::Leaf(_) => None,
            PrerequisiteClause::Compound { children, .. } => Some(children),
        }
    }

    /// Returns the operator if this is a compound group.
    pub fn operator(&self) -> Option<&Operator> {
        match self {
            PrerequisiteClause::Leaf(_) => None,
            PrerequisiteClause::Compound { operator, .. } => Some(operator),
        }
    }
}

impl From<CourseRef> for PrerequisiteClause {
    fn from(course: CourseRef) -> Self {
        PrerequisiteClause::Leaf(course)
    }
}

impl Serialize for PrerequisiteClause {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PrerequisiteClause::Leaf(course) => course.serialize(serializer),
            PrerequisiteClause::Compound { operator, children } => {
                let mut seq = serializer.serialize_seq(Some(children.len() + 1))?;
                seq.serialize_element(operator.as_str())?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PrerequisiteClause {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ClauseVisitor)
    }
}

struct ClauseVisitor;

impl<'de> Visitor<'de> for ClauseVisitor {
    type Value = PrerequisiteClause;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a course object or an [operator, ...clauses] array")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let course = CourseRef::deserialize(MapAccessDeserializer::new(map))?;
        Ok(PrerequisiteClause::Leaf(course))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let mut children = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(child) = seq.next_element::<PrerequisiteClause>()? {
            children.push(child);
        }

        Ok(PrerequisiteClause::Compound {
            operator: Operator::from(tag.as_str()),
            children,
        })
    }
}
