//! Interned, lower-cased identifiers for tags and attribute keys.
//!
//! Names from the VerbNet vocabulary resolve to `'static` strings without
//! allocating. Anything else still becomes a `Symbol`, backed by a shared
//! `Arc<str>`, so normalization never fails on an unexpected tag.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    Shared(Arc<str>),
}

/// A lower-cased element or attribute name.
///
/// Equality, ordering and hashing all go through [`Symbol::as_str`], so a
/// vocabulary symbol and a shared symbol with the same text are equal.
#[derive(Clone)]
pub struct Symbol(Repr);

static VOCABULARY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // document structure
        "vnclass",
        "members",
        "member",
        "themroles",
        "themrole",
        "frames",
        "frame",
        "description",
        "examples",
        "example",
        "syntax",
        "semantics",
        "subclasses",
        // restrictions
        "selrestrs",
        "selrestr",
        "synrestrs",
        "synrestr",
        // syntactic constituents
        "np",
        "verb",
        "prep",
        "adj",
        "adv",
        "lex",
        // semantic predicates
        "pred",
        "args",
        "arg",
        // attribute keys
        "id",
        "name",
        "wn",
        "grouping",
        "features",
        "fn_mapping",
        "verbnet_key",
        "type",
        "value",
        "primary",
        "secondary",
        "descriptionnumber",
        "xtag",
        "logic",
        "bool",
    ]
    .into_iter()
    .collect()
});

impl Symbol {
    pub const VNCLASS: Symbol = Symbol::from_static("vnclass");
    pub const MEMBERS: Symbol = Symbol::from_static("members");
    pub const MEMBER: Symbol = Symbol::from_static("member");
    pub const THEMROLES: Symbol = Symbol::from_static("themroles");
    pub const THEMROLE: Symbol = Symbol::from_static("themrole");
    pub const FRAMES: Symbol = Symbol::from_static("frames");
    pub const FRAME: Symbol = Symbol::from_static("frame");
    pub const DESCRIPTION: Symbol = Symbol::from_static("description");
    pub const EXAMPLES: Symbol = Symbol::from_static("examples");
    pub const EXAMPLE: Symbol = Symbol::from_static("example");
    pub const SYNTAX: Symbol = Symbol::from_static("syntax");
    pub const SEMANTICS: Symbol = Symbol::from_static("semantics");
    pub const SUBCLASSES: Symbol = Symbol::from_static("subclasses");

    const fn from_static(name: &'static str) -> Symbol {
        Symbol(Repr::Static(name))
    }

    /// Lower-cases `name` and interns it.
    pub fn intern(name: &str) -> Symbol {
        let lowered = name.to_lowercase();
        match VOCABULARY.get(lowered.as_str()) {
            Some(&known) => Symbol(Repr::Static(known)),
            None => Symbol(Repr::Shared(Arc::from(lowered))),
        }
    }

    /// Interns raw markup bytes, decoding invalid UTF-8 lossily.
    pub fn intern_bytes(name: &[u8]) -> Symbol {
        Symbol::intern(&String::from_utf8_lossy(name))
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Static(s) => *s,
            Repr::Shared(s) => s.as_ref(),
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Symbol {}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::intern(name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
