//! Contact details shared by leads, listings, brokers and developments.

use std::sync::LazyLock;

use regex::Regex;

define_text! {
    /// Name of a person to contact.
    Name, |s| super::is_trimmed_line(s, 256)
}

define_text! {
    /// Email address to contact.
    Email, |s| {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        s.len() <= 320 && REGEX.is_match(s)
    }
}

define_text! {
    /// Phone number to contact (WhatsApp numbers included).
    Phone, |s| {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[0-9][0-9\s\-().]{6,22}[0-9]$")
                .expect("valid regex")
        });

        REGEX.is_match(s)
    }
}

impl Email {
    /// Returns the domain part of this [`Email`] address.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Name, Phone};

    #[test]
    fn email() {
        assert!(Email::new("buyer@example.com").is_some());
        assert!(Email::new("first.last+tag@mail.example.mx").is_some());

        assert!(Email::new("buyer@").is_none());
        assert!(Email::new("buyer example.com").is_none());
        assert!(Email::new("buyer@example").is_none());
        assert_eq!(
            Email::new("buyer@example.com").unwrap().domain(),
            "example.com",
        );
    }

    #[test]
    fn phone() {
        assert!(Phone::new("+52 415 123 4567").is_some());
        assert!(Phone::new("(415) 123-4567").is_none());
        assert!(Phone::new("415-123-4567").is_some());

        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("call me").is_none());
    }

    #[test]
    fn name() {
        assert!(Name::new("María José").is_some());
        assert!(Name::new(" María").is_none());
        assert!(Name::new("").is_none());
    }
}
