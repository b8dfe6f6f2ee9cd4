//! Website shortcuts opened in the system browser.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SITES: &[Site] = &[
    Site { name: "google", url: "https://google.com" },
    Site { name: "spotify", url: "https://open.spotify.com" },
    Site { name: "youtube", url: "https://youtube.com" },
    Site { name: "facebook", url: "https://facebook.com" },
    Site { name: "instagram", url: "https://instagram.com" },
    Site { name: "linkedin", url: "https://linkedin.com" },
];

/// Finds the first site whose `open <name>` phrase occurs in `command`.
/// `command` must already be lower-cased.
pub fn find_site(command: &str) -> Option<Site> {
    SITES
        .iter()
        .find(|site| command.contains(&format!("open {}", site.name)))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_site_by_phrase() {
        assert_eq!(find_site("please open youtube now").map(|s| s.name), Some("youtube"));
        assert_eq!(
            find_site("open spotify").map(|s| s.url),
            Some("https://open.spotify.com")
        );
    }

    #[test]
    fn bare_name_is_not_enough() {
        assert_eq!(find_site("youtube"), None);
        assert_eq!(find_site("open twitter"), None);
    }
}
