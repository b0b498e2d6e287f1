use core::fmt;

/// Borrowed location of a value inside a schema, rendered only when an
/// error needs it.
#[derive(Debug, Clone, Copy)]
pub enum FieldPath<'a> {
    /// Root value named after its type (may be empty).
    Root(&'a str),
    /// Named field or variant below a parent.
    Field(&'a FieldPath<'a>, &'a str),
    /// Element slot below a parent collection.
    Index(&'a FieldPath<'a>, usize),
    /// Element schema of a collection, independent of any slot.
    Element(&'a FieldPath<'a>),
}

impl<'a> FieldPath<'a> {
    /// Creates a root path.
    pub const fn root(name: &'a str) -> Self {
        FieldPath::Root(name)
    }

    /// Descends into a named child.
    pub fn field<'b>(&'b self, name: &'b str) -> FieldPath<'b> {
        FieldPath::Field(self, name)
    }

    /// Descends into an element slot.
    pub fn index(&self, index: usize) -> FieldPath<'_> {
        FieldPath::Index(self, index)
    }

    /// Descends into the element schema of a collection.
    pub fn element(&self) -> FieldPath<'_> {
        FieldPath::Element(self)
    }

    /// Renders the dotted representation carried by error values.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn is_empty(&self) -> bool {
        matches!(self, FieldPath::Root(name) if name.is_empty())
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Root(name) => f.write_str(name),
            FieldPath::Field(parent, name) if parent.is_empty() => f.write_str(name),
            FieldPath::Field(parent, name) => write!(f, "{parent}.{name}"),
            FieldPath::Index(parent, index) => write!(f, "{parent}[{index}]"),
            FieldPath::Element(parent) => write!(f, "{parent}[]"),
        }
    }
}
