//! Structural description of command payloads.
//!
//! A [`Shape`] says how a payload decomposes into codec primitives: either a
//! fixed list of named fields or a single repeated element. Composite chain
//! values (headers, transactions, bodies, receipts) are opaque records here;
//! their inner layout belongs to `eth-core`.
//!
//! [`Shape::validate`] walks raw RLP against the shape without building any
//! values, so a non-conforming payload is rejected with a message naming
//! the offending field before typed decoding starts.

use std::fmt;

use alloy_rlp::Header;

/// Kind of a single value inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Big-endian unsigned integer without leading zeros.
    UnsignedInt,
    /// Integer 0 or 1.
    Boolean,
    /// Arbitrary byte string.
    Binary,
    /// 32-byte byte string.
    Hash,
    /// 32-byte hash or an unsigned integer that fits 64 bits.
    HashOrNumber,
    /// Block header record.
    Header,
    /// Transaction record.
    Transaction,
    /// Block body record (transactions, ommers).
    BlockBody,
    /// Receipt record.
    Receipt,
    /// Homogeneous list of any length.
    List(&'static ValueKind),
    /// Fixed-length heterogeneous list.
    Tuple(&'static [ValueKind]),
}

/// A named field of a [`Shape::Fields`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: &'static str,
    /// Field kind.
    pub kind: ValueKind,
}

impl Field {
    /// Create a field descriptor.
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind }
    }
}

/// Structure of a command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Ordered list of named fields.
    Fields(&'static [Field]),
    /// List of any length whose elements all have one kind.
    Repeated(ValueKind),
}

impl Shape {
    /// Field names in wire order; empty for repeated shapes.
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            Shape::Fields(fields) => fields.iter().map(|f| f.name).collect(),
            Shape::Repeated(_) => Vec::new(),
        }
    }

    /// Whether the payload is a single repeated element list.
    pub fn is_repeated(&self) -> bool {
        matches!(self, Shape::Repeated(_))
    }

    /// Check that `payload` is exactly one RLP list conforming to this shape.
    ///
    /// Returns the number of top-level elements.
    pub fn validate(&self, payload: &[u8]) -> Result<usize, String> {
        let mut buf = payload;
        let item = next_item(&mut buf)?;
        if !buf.is_empty() {
            return Err(format!("{} trailing bytes after payload", buf.len()));
        }
        if !item.list {
            return Err("expected list payload, got string".to_string());
        }

        match self {
            Shape::Fields(fields) => {
                check_elements(item.payload, fields.len(), |i| {
                    (fields[i].kind, Some(fields[i].name))
                })?;
                Ok(fields.len())
            }
            Shape::Repeated(kind) => check_repeated(item.payload, kind),
        }
    }
}

/// One RLP item split off the front of a buffer.
struct Item<'a> {
    list: bool,
    payload: &'a [u8],
}

fn next_item<'a>(buf: &mut &'a [u8]) -> Result<Item<'a>, String> {
    let header = Header::decode(buf).map_err(|e| e.to_string())?;
    let data: &'a [u8] = *buf;
    if data.len() < header.payload_length {
        return Err(format!(
            "item declares {} bytes, {} available",
            header.payload_length,
            data.len()
        ));
    }
    let (payload, rest) = data.split_at(header.payload_length);
    *buf = rest;
    Ok(Item {
        list: header.list,
        payload,
    })
}

fn check_repeated(mut items: &[u8], kind: &ValueKind) -> Result<usize, String> {
    let mut count = 0;
    while !items.is_empty() {
        kind.check(&mut items)
            .map_err(|e| format!("element {}: {}", count, e))?;
        count += 1;
    }
    Ok(count)
}

fn check_elements(
    mut items: &[u8],
    count: usize,
    element: impl Fn(usize) -> (ValueKind, Option<&'static str>),
) -> Result<(), String> {
    for index in 0..count {
        let (kind, name) = element(index);
        let label = || match name {
            Some(name) => name.to_string(),
            None => format!("element {}", index),
        };
        if items.is_empty() {
            return Err(format!("missing {}", label()));
        }
        kind.check(&mut items)
            .map_err(|e| format!("{}: {}", label(), e))?;
    }
    if !items.is_empty() {
        return Err(format!("expected {} elements, found more", count));
    }
    Ok(())
}

impl ValueKind {
    fn check(&self, buf: &mut &[u8]) -> Result<(), String> {
        let item = next_item(buf)?;
        match self {
            ValueKind::UnsignedInt => {
                let bytes = self.expect_string(&item)?;
                if bytes.len() > 32 {
                    return Err(format!("integer of {} bytes exceeds 256 bits", bytes.len()));
                }
                if bytes.first() == Some(&0) {
                    return Err("integer has leading zero".to_string());
                }
                Ok(())
            }
            ValueKind::Boolean => {
                let bytes = self.expect_string(&item)?;
                if matches!(bytes, [] | [1]) {
                    Ok(())
                } else {
                    Err("boolean must be 0 or 1".to_string())
                }
            }
            ValueKind::Binary => self.expect_string(&item).map(|_| ()),
            ValueKind::Hash => {
                let bytes = self.expect_string(&item)?;
                if bytes.len() != 32 {
                    return Err(format!("expected 32-byte hash, got {} bytes", bytes.len()));
                }
                Ok(())
            }
            ValueKind::HashOrNumber => {
                let bytes = self.expect_string(&item)?;
                match bytes.len() {
                    32 => Ok(()),
                    n if n > 8 => Err(format!("{} bytes is neither a hash nor a block number", n)),
                    _ if bytes.first() == Some(&0) => {
                        Err("block number has leading zero".to_string())
                    }
                    _ => Ok(()),
                }
            }
            ValueKind::Header
            | ValueKind::Transaction
            | ValueKind::BlockBody
            | ValueKind::Receipt => self.expect_list(&item).map(|_| ()),
            ValueKind::List(inner) => {
                let items = self.expect_list(&item)?;
                check_repeated(items, inner).map(|_| ())
            }
            ValueKind::Tuple(kinds) => {
                let items = self.expect_list(&item)?;
                check_elements(items, kinds.len(), |i| (kinds[i], None))
            }
        }
    }

    fn expect_string<'a>(&self, item: &Item<'a>) -> Result<&'a [u8], String> {
        if item.list {
            return Err(format!("expected {}, got list", self));
        }
        Ok(item.payload)
    }

    fn expect_list<'a>(&self, item: &Item<'a>) -> Result<&'a [u8], String> {
        if !item.list {
            return Err(format!("expected {}, got string", self));
        }
        Ok(item.payload)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::UnsignedInt => write!(f, "uint"),
            ValueKind::Boolean => write!(f, "bool"),
            ValueKind::Binary => write!(f, "bytes"),
            ValueKind::Hash => write!(f, "hash"),
            ValueKind::HashOrNumber => write!(f, "hash|number"),
            ValueKind::Header => write!(f, "header"),
            ValueKind::Transaction => write!(f, "transaction"),
            ValueKind::BlockBody => write!(f, "body"),
            ValueKind::Receipt => write!(f, "receipt"),
            ValueKind::List(inner) => write!(f, "[{}]", inner),
            ValueKind::Tuple(kinds) => {
                write!(f, "(")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Fields(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.kind)?;
                }
                write!(f, ")")
            }
            Shape::Repeated(kind) => write!(f, "[{}]", kind),
        }
    }
}
