//! Structured object identifiers.
//!
//! An identifier names the object that triggered a command. Its textual form
//! is `type:[//domain/]package[.path...].name`, for example
//! `com:foo.table.users` or `com://admin/foo.controller.user`.
//!
//! The event invoker only reads the `package`, `path` and `name` parts.

use crate::error::IdentifierError;
use std::{fmt, str::FromStr};

/// A parsed object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: String,
    domain: Option<String>,
    package: String,
    path: Vec<String>,
    name: String,
}

impl Identifier {
    /// Create an identifier from its parts.
    pub fn new(
        kind: impl Into<String>,
        package: impl Into<String>,
        path: impl IntoIterator<Item = impl Into<String>>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            domain: None,
            package: package.into(),
            path: path.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }

    /// Set the domain (application) part.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// The identifier type, e.g. `com` or `lib`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The domain, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The package segment.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Path segments between the package and the name.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The last segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, rest)) = s.split_once(':') else {
            return Err(IdentifierError::MissingType(s.to_string()));
        };
        if kind.is_empty() {
            return Err(IdentifierError::MissingType(s.to_string()));
        }

        let (domain, rest) = match rest.strip_prefix("//") {
            Some(tail) => {
                let Some((domain, tail)) = tail.split_once('/') else {
                    return Err(IdentifierError::Malformed(s.to_string()));
                };
                (Some(domain.to_string()), tail)
            }
            None => (None, rest),
        };

        if rest.is_empty() {
            return Err(IdentifierError::MissingPackage(s.to_string()));
        }

        let mut segments: Vec<String> = rest.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(IdentifierError::Malformed(s.to_string()));
        }

        let package = segments.remove(0);
        let name = segments.pop().unwrap_or_default();

        Ok(Self {
            kind: kind.to_string(),
            domain,
            package,
            path: segments,
            name,
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind)?;
        if let Some(domain) = &self.domain {
            write!(f, "//{}/", domain)?;
        }
        f.write_str(&self.package)?;
        for segment in &self.path {
            write!(f, ".{}", segment)?;
        }
        if !self.name.is_empty() {
            write!(f, ".{}", self.name)?;
        }
        Ok(())
    }
}

/// An object that can be the subject of a command.
pub trait Identifiable: Send + Sync {
    /// The identifier of this object.
    fn identifier(&self) -> &Identifier;
}

impl Identifiable for Identifier {
    fn identifier(&self) -> &Identifier {
        self
    }
}
