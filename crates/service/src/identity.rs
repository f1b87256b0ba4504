use std::fmt;

/// Authenticated caller, as issued by the external identity provider.
///
/// Built once by the transport after the bearer token is verified and passed
/// to every service call explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self { Self(subject.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
