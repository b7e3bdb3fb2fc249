//! Identifier management using string interning
//!
//! Logical ids, construct ids and qualified diagram ids are compared and
//! hashed constantly while a stack is resolved. The [`Id`] type interns them
//! once so the reverse lookups on a stack can key on a `Copy` value.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use stratagram_core::identifier::Id;
///
/// let logical_id = Id::new("BaseVPC7D3A1C0F");
/// let container = Id::new("VPCGroup");
///
/// let qualified = logical_id.qualify(container);
/// assert_eq!(qualified, "VPCGroup.BaseVPC7D3A1C0F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagram_core::identifier::Id;
    ///
    /// let construct_id = Id::new("baseVPC");
    /// assert_eq!(construct_id, "baseVPC");
    /// ```
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Places this id inside a container, joining both with a `.`.
    ///
    /// This is the shape D2 uses for nested shapes, so the result can be
    /// written out directly as a node key.
    pub fn qualify(&self, container: Id) -> Self {
        let mut interner = interner();
        let container_str = interner
            .resolve(container.0)
            .expect("Container ID should exist in interner");
        let own_str = interner
            .resolve(self.0)
            .expect("ID should exist in interner");
        let qualified = format!("{container_str}.{own_str}");
        Self(interner.get_or_intern(&qualified))
    }

    /// Returns `true` if this id was created from an empty string.
    pub fn is_empty(&self) -> bool {
        *self == ""
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(str_value)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
