//! Human readable rendering of descriptor trees.
//!
//! One line per node, children indented by two spaces:
//!
//! ```text
//! Payment: struct Payment [24 bytes, 192 bits]
//!   amount: Long [8 bytes, 64 bits]
//!   memo: text UTF-8 (capacity 8) [12 bytes, 96 bits]
//!   side: enum Side (Buy, Sell) [4 bytes, 32 bits]
//! ```
//!
//! Union variants also show their wire tag, e.g.
//! `Cash: struct Cash (tag 0x00000010) [15 bytes, 120 bits]`.

use core::fmt;

use super::types::{Descriptor, DescriptorKind};

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorKind::Primitive(primitive) => write!(f, "{primitive}"),
            DescriptorKind::Struct { type_name } => write!(f, "struct {type_name}"),
            DescriptorKind::List => f.write_str("list"),
            DescriptorKind::Array => f.write_str("array"),
            DescriptorKind::Text(charset) => write!(f, "text {charset}"),
            DescriptorKind::Optional => f.write_str("optional"),
            DescriptorKind::Enum { type_name, variants } => {
                write!(f, "enum {type_name} ({})", variants.join(", "))
            }
            DescriptorKind::Union { family } => write!(f, "union {family}"),
        }
    }
}

impl Descriptor {
    /// Renders the tree report.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}: {}", "", self.name, self.kind, indent = depth * 2)?;
        if let Some(tag) = self.tag {
            write!(f, " (tag 0x{tag:08x})")?;
        }
        if let Some(capacity) = self.capacity {
            write!(f, " (capacity {capacity})")?;
        }
        write!(f, " [{} bytes, {} bits]", self.byte_size, self.bit_size)?;
        for child in &self.children {
            writeln!(f)?;
            child.fmt_node(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, 0)
    }
}
