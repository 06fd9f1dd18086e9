use std::{error, fmt};

/// The location of a node inside a query tree, relative to the [`Query`](crate::ast::Query).
///
/// Paths are tracked while a tree is visited and are attached to validation errors, e.g.
/// `selectionSet.0.arguments.1` is the second argument of the query's first field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment)
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }
}

/// Error returned when a string can't be converted to a [Path].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePathError(pub String);

impl fmt::Display for ParsePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid path segment {}", self.0)
    }
}

impl error::Error for ParsePathError {}

impl TryFrom<&str> for Path {
    type Error = ParsePathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let segments = value
            .split('.')
            .map(PathSegment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.segments
                .iter()
                .map(|segment| segment.to_string())
                .collect::<Vec<_>>()
                .join(".")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Index(usize),

    Arguments,
    SelectionSet,
    Value,
}

impl TryFrom<&str> for PathSegment {
    type Error = ParsePathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<usize>() {
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => match value {
                "arguments" => Ok(PathSegment::Arguments),
                "selectionSet" => Ok(PathSegment::SelectionSet),
                "value" => Ok(PathSegment::Value),
                _ => Err(ParsePathError(value.to_string())),
            },
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Arguments => f.write_str("arguments"),
            PathSegment::SelectionSet => f.write_str("selectionSet"),
            PathSegment::Value => f.write_str("value"),
        }
    }
}
