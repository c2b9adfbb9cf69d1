//! Publicly retrievable image references.

use url::Url;

define_text! {
    /// Absolute `http(s)` URL of an image uploaded to the object storage.
    ImageUrl, |s| {
        s.len() <= 2048
            && Url::parse(s).is_ok_and(|url| {
                matches!(url.scheme(), "http" | "https") && url.has_host()
            })
    }
}

#[cfg(test)]
mod spec {
    use super::ImageUrl;

    #[test]
    fn accepts_only_absolute_http_urls() {
        assert!(ImageUrl::new(
            "https://cdn.example.com/storage/v1/object/public/photos/1.jpg"
        )
        .is_some());
        assert!(ImageUrl::new("http://localhost:9000/photo.webp").is_some());

        assert!(ImageUrl::new("/photos/1.jpg").is_none());
        assert!(ImageUrl::new("ftp://example.com/1.jpg").is_none());
        assert!(ImageUrl::new("data:image/png;base64,AAAA").is_none());
    }
}
