//! Shared fixtures for the fuzzfill integration tests and benches.
//!
//! The record types here cover the shapes the provider fills: nested
//! records, private fields, self-referential links, collections and fixed
//! arrays. Input helpers build deterministic buffers so every test reads
//! the same bytes on every run.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasherDefault, DefaultHasher};

use fuzzfill::{Complex, Fill, FillError, TypeProvider};

/// The canonical regression buffer: 256 bytes counting down from 0xFF.
#[must_use]
pub fn descending() -> Vec<u8> {
    (0..=255u8).rev().collect()
}

/// `seed` followed by `len` bytes of a simple repeating pattern.
#[must_use]
pub fn seeded(seed: u64, len: usize) -> Vec<u8> {
    let mut data = seed.to_be_bytes().to_vec();
    data.extend((0..len).map(|i| (i.wrapping_mul(31) % 251) as u8));
    data
}

#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Leaf {
    pub value: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Branch {
    pub tag: u8,
    pub leaf: Leaf,
}

#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Tree {
    pub id: u32,
    pub branch: Branch,
}

/// A self-referential list; terminates through the pointer nil bias.
#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Node {
    pub value: u8,
    pub next: Option<Box<Node>>,
}

impl Drop for Node {
    // Unlink iteratively so dropping a long chain does not recurse.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Node {
    /// Number of nodes reachable from here, this one included.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut current = self.next.as_deref();
        while let Some(node) = current {
            len += 1;
            current = node.next.as_deref();
        }
        len
    }
}

/// A `HashMap` with a fixed hasher, so two maps built from the same
/// inserts iterate (and `Debug`-print) in the same order.
pub type StableMap<K, V> = HashMap<K, V, BuildHasherDefault<DefaultHasher>>;

/// A record that is mostly optional and collection fields.
#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Optionals {
    pub name: Option<String>,
    pub list: Vec<u32>,
    pub blob: Vec<u8>,
    pub map: BTreeMap<u8, u8>,
}

/// A record mixing public and private fields.
#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Secretive {
    pub visible: u32,
    hidden: u32,
    pub(crate) internal: u16,
}

impl Secretive {
    #[must_use]
    pub fn with_private(hidden: u32, internal: u16) -> Self {
        Self {
            visible: 0,
            hidden,
            internal,
        }
    }

    #[must_use]
    pub fn hidden(&self) -> u32 {
        self.hidden
    }

    #[must_use]
    pub fn internal(&self) -> u16 {
        self.internal
    }
}

/// A field type with no `Fill` impl, carried with `#[fill(skip)]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Opaque(pub String);

#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct WithOpaque {
    pub before: u8,
    #[fill(skip)]
    pub opaque: Opaque,
    pub after: u8,
}

/// Everything at once, for determinism and fuzz-style coverage.
#[derive(Clone, Debug, Default, PartialEq, Fill)]
pub struct Everything {
    pub flag: bool,
    pub small: (i8, u8),
    pub wide: (i64, u64),
    pub size: usize,
    pub floats: (f32, f64),
    pub complex: Complex<f32>,
    pub text: String,
    pub bytes: Vec<u8>,
    pub points: Vec<Point>,
    pub lookup: StableMap<u16, String>,
    pub ordered: BTreeMap<i8, Vec<u8>>,
    pub grid: [[u8; 3]; 2],
    pub tree: Option<Tree>,
    pub list: Option<Box<Node>>,
    secret: Secretive,
}

impl Everything {
    #[must_use]
    pub fn secret(&self) -> &Secretive {
        &self.secret
    }
}

/// A byte that always takes the per-element `Vec` path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Octet(pub u8);

impl Fill for Octet {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        self.0.fill(provider, depth)
    }
}
