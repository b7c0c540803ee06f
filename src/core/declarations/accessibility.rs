use std::fmt;

/// Access level of a declaration, from most to least restrictive.
///
/// The derived ordering follows declaration order, so `Private < Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessibility {
    Private,
    FilePrivate,
    Internal,
    Public,
    Open,
}

impl Accessibility {
    pub const ALL: [Accessibility; 5] = [
        Accessibility::Private,
        Accessibility::FilePrivate,
        Accessibility::Internal,
        Accessibility::Public,
        Accessibility::Open,
    ];

    /// Parse an export accessibility tag, e.g. `source.lang.swift.accessibility.public`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.tag() == tag)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Accessibility::Private => "source.lang.swift.accessibility.private",
            Accessibility::FilePrivate => "source.lang.swift.accessibility.fileprivate",
            Accessibility::Internal => "source.lang.swift.accessibility.internal",
            Accessibility::Public => "source.lang.swift.accessibility.public",
            Accessibility::Open => "source.lang.swift.accessibility.open",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessibility::Private => write!(f, "private"),
            Accessibility::FilePrivate => write!(f, "fileprivate"),
            Accessibility::Internal => write!(f, "internal"),
            Accessibility::Public => write!(f, "public"),
            Accessibility::Open => write!(f, "open"),
        }
    }
}
