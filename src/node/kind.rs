use std::fmt;

/// Discriminant of a [`Node`](super::Node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Map,
    List,
    String,
    Integer,
    Bytes,
    Link,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Map => "map",
            Kind::List => "list",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Bytes => "bytes",
            Kind::Link => "link",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
