//! Domain definitions.

/// Defines a validated textual newtype.
///
/// The generated type is constructible only via its `new()` (or [`FromStr`])
/// constructor, which runs the provided check, and is (de)serialized and
/// stored as a plain string.
///
/// [`FromStr`]: std::str::FromStr
macro_rules! define_text {
    (
        $(#[$meta:meta])*
        $name:ident, |$s:ident| $check:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Deserialize,
            ::serde::Serialize,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent)
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = ::core::concat!(
                "Creates a new [`", ::core::stringify!($name),
                "`] if the given `value` is valid.",
            )]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            #[doc = ::core::concat!(
                "Checks whether the given `value` is a valid [`",
                ::core::stringify!($name), "`].",
            )]
            #[must_use]
            pub fn check($s: &str) -> bool {
                $check
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }

        impl TryFrom<String> for $name {
            type Error = &'static str;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Checks whether the given single-line `s` is trimmed, non-empty and fits
/// into `max` bytes.
fn is_trimmed_line(s: &str, max: usize) -> bool {
    s.trim() == s && !s.is_empty() && s.len() <= max && !s.contains('\n')
}

/// Checks whether the given multiline `s` is trimmed, non-empty and fits into
/// `max` bytes.
fn is_trimmed_text(s: &str, max: usize) -> bool {
    s.trim() == s && !s.is_empty() && s.len() <= max
}

pub mod client;
pub mod contact;
pub mod development;
pub mod image;
pub mod lead;
pub mod property;
pub mod rates;
pub mod user;

pub use self::{
    client::Client, development::Development, lead::Lead, property::Property,
    rates::Rates,
};
