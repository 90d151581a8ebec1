use ostap::services::url_normalizer::{has_scheme, normalize_input, search_location};
use ostap::types::settings::NavigationSettings;
use rstest::rstest;

#[rstest]
#[case("example.com", "https://example.com")]
#[case("  example.com  ", "https://example.com")]
#[case("docs.rs/tokio", "https://docs.rs/tokio")]
#[case("hello world", "https://www.google.com/search?q=hello%20world")]
#[case("rust", "https://www.google.com/search?q=rust")]
#[case("ostap://newtab", "ostap://newtab")]
#[case("http://insecure.test", "http://insecure.test")]
#[case("about:blank", "about:blank")]
#[case("", "ostap://newtab")]
#[case("   ", "ostap://newtab")]
fn test_normalize_input(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_input(raw, &NavigationSettings::default()), expected);
}

#[rstest]
#[case("https://a.com", true)]
#[case("file:///tmp/x.html", true)]
#[case("mailto:someone@example.com", true)]
#[case("example.com", false)]
#[case("1http://x", false)]
fn test_has_scheme(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(has_scheme(input), expected);
}

#[test]
fn test_search_encodes_reserved_characters() {
    let location = search_location("a&b=c?", &NavigationSettings::default());
    assert_eq!(location, "https://www.google.com/search?q=a%26b%3Dc%3F");
}

#[test]
fn test_custom_default_scheme() {
    let settings = NavigationSettings {
        search_url: "https://www.google.com/search?q=".to_string(),
        default_scheme: "http".to_string(),
    };
    assert_eq!(normalize_input("intranet.local", &settings), "http://intranet.local");
}
