//! License banner prepended to minified scripts.

use appbuild_core::ProjectMetadata;
use chrono::{DateTime, Datelike, Local};

/// Render a timestamp the way the banners show it, e.g.
/// `Thu Oct 16 2026 09:41:07 GMT+0200`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Build the `@licstart`/`@licend` notice placed at the top of the minified bundle.
pub fn license_preamble(metadata: &ProjectMetadata, at: &DateTime<Local>) -> String {
    let mut lines = vec![
        "/**".to_string(),
        " * ".to_string(),
        format!(" * @source: {}", metadata.sources),
        " * ".to_string(),
        " * @licstart  The following is the entire license notice for the".to_string(),
        " * JavaScript code in this page.".to_string(),
        " * ".to_string(),
        format!(" * {} - version {}", metadata.name, metadata.version),
        format!(" * Build {} - {}", metadata.build_number, format_timestamp(at)),
    ];

    if let Some(author) = metadata.author_name() {
        lines.push(format!(" * Copyright {} {}", at.year(), author));
    }

    lines.push(format!(" * License: {}", metadata.license));
    lines.extend(
        [
            " * ",
            " * The JavaScript code in this page is free software: you can",
            " * redistribute it and/or modify it under the terms of the GNU",
            " * General Public License (GNU GPL) as published by the Free Software",
            " * Foundation, either version 3 of the License, or (at your option)",
            " * any later version.  The code is distributed WITHOUT ANY WARRANTY;",
            " * without even the implied warranty of MERCHANTABILITY or FITNESS",
            " * FOR A PARTICULAR PURPOSE.  See the GNU GPL for more details.",
            " * ",
            " * As additional permission under GNU GPL version 3 section 7, you",
            " * may distribute non-source (e.g., minimized or compacted) forms of",
            " * that code without the copy of the GNU GPL normally required by",
            " * section 4, provided you include this license notice and a URL",
            " * through which recipients can access the Corresponding Source.",
            " * ",
            " * @licend  The above is the entire license notice",
            " * for the JavaScript code in this page.",
            " * ",
            " */",
        ]
        .map(String::from),
    );

    let mut preamble = lines.join("\n");
    preamble.push_str("\n\n");
    preamble
}

#[cfg(test)]
mod tests {
    use super::*;
    use appbuild_core::Author;
    use chrono::TimeZone;

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            name: "EncryptDecrypt".to_string(),
            version: "2.1.0".to_string(),
            license: "GPL-3.0".to_string(),
            sources: "https://github.com/wwwouaiebe/EncryptDecrypt".to_string(),
            build_number: 42,
            author: None,
        }
    }

    #[test]
    fn test_preamble_content() {
        let at = Local.with_ymd_and_hms(2026, 10, 16, 9, 41, 7).unwrap();
        let preamble = license_preamble(&metadata(), &at);

        assert!(preamble.starts_with("/**\n"));
        assert!(preamble.ends_with(" */\n\n"));
        assert!(preamble.contains(" * @source: https://github.com/wwwouaiebe/EncryptDecrypt\n"));
        assert!(preamble.contains(" * EncryptDecrypt - version 2.1.0\n"));
        assert!(preamble.contains(" * Build 42 - Fri Oct 16 2026 09:41:07 GMT"));
        assert!(preamble.contains(" * License: GPL-3.0\n"));
        assert!(preamble.contains("@licend"));
        assert!(!preamble.contains("Copyright"));
    }

    #[test]
    fn test_preamble_copyright() {
        let at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut metadata = metadata();
        metadata.author = Some(Author::Short("wwwouaiebe".to_string()));

        let preamble = license_preamble(&metadata, &at);
        assert!(preamble.contains(" * Copyright 2026 wwwouaiebe\n"));
    }
}
