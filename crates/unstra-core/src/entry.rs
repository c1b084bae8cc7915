//! Waitlist entry domain types.
//!
//! An entry is an email address plus two pieces of attribution captured at
//! submission time: where the visitor came from and what client they used.
//! Ids and timestamps belong to the store.

use std::borrow::Cow;
use std::fmt;

use unstra_storage::NewEntry;

use crate::error::SignupError;

/// Sentinel user agent for submissions that carry none.
pub const UNKNOWN_USER_AGENT: &str = "Server";

/// Query parameter that carries the referral marker.
const REFERRAL_PARAM: &str = "ref";

/// Referral marker value for LinkedIn traffic.
const LINKEDIN_MARKER: &str = "linkedin";

/// Longest address accepted (RFC 5321 path limit).
const MAX_EMAIL_LEN: usize = 254;

/// A normalized, syntactically valid email address.
///
/// Normalization trims surrounding whitespace and lowercases the address,
/// so case variants of one mailbox collide on the store's uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize a raw address.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Validation`] describing the first rule the
    /// address breaks.
    pub fn parse(raw: &str) -> Result<Self, SignupError> {
        let invalid = |reason: &str| SignupError::Validation {
            reason: reason.to_owned(),
        };

        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(invalid("address is empty"));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(invalid("address is too long"));
        }
        if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("address contains whitespace"));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(invalid("address is missing '@'"));
        };
        if local.is_empty() {
            return Err(invalid("address is missing the part before '@'"));
        }
        if domain.contains('@') {
            return Err(invalid("address contains more than one '@'"));
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(invalid("domain is not valid"));
        }

        Ok(Self(email))
    }

    /// The part after `@`, used for log fields instead of the full address.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a signup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The page URL carried `ref=linkedin`.
    Linkedin,
    /// Anything else.
    Direct,
}

impl Source {
    /// Derive the source from the URL of the page the form was submitted on.
    ///
    /// Accepts a full URL (`https://unstra.com/?ref=linkedin`), a path with a
    /// query (`/?ref=linkedin`), or a bare query string (`ref=linkedin`).
    /// Keys and values are percent-decoded and compared exactly, so
    /// `ref=LinkedIn` is not a match. A missing URL means [`Source::Direct`].
    #[must_use]
    pub fn from_page_url(url: Option<&str>) -> Self {
        let Some(url) = url else {
            return Self::Direct;
        };

        let without_fragment = url.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None if without_fragment.contains('/') => return Self::Direct,
            None => without_fragment,
        };

        let referred = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| {
                decode_component(key) == REFERRAL_PARAM
                    && decode_component(value) == LINKEDIN_MARKER
            });

        if referred { Self::Linkedin } else { Self::Direct }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Direct => "direct",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| spaced.clone())
}

/// One signup, ready to hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub email: EmailAddress,
    pub source: Source,
    pub user_agent: String,
}

impl WaitlistEntry {
    /// Build an entry, substituting [`UNKNOWN_USER_AGENT`] for a missing
    /// or blank user agent.
    #[must_use]
    pub fn new(email: EmailAddress, source: Source, user_agent: Option<&str>) -> Self {
        let user_agent = user_agent
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .unwrap_or(UNKNOWN_USER_AGENT)
            .to_owned();

        Self {
            email,
            source,
            user_agent,
        }
    }

    /// Convert into the store's row shape.
    #[must_use]
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            email: self.email.as_str().to_owned(),
            source: self.source.as_str().to_owned(),
            user_agent: self.user_agent.clone(),
        }
    }
}
