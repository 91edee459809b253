//! Output sanitization for bookmarks leaving the service.

use crate::model::Bookmark;

/// Returns a copy of `bookmark` that is safe to embed in HTML. Only the free
/// text fields are touched; `url` and `rating` go out exactly as stored.
pub fn serialize_bookmark(bookmark: &Bookmark) -> Bookmark {
    Bookmark {
        id: bookmark.id,
        title: sanitize_text(&bookmark.title),
        url: bookmark.url.clone(),
        description: sanitize_text(&bookmark.description),
        rating: bookmark.rating.clone(),
    }
}

/// Escapes markup characters. An `&` that already starts a character
/// reference is left alone, so sanitizing sanitized text is a no-op.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '&' if starts_char_ref(&input[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            c => out.push(c),
        }
    }

    out
}

/// Matches `&name;`, `&#123;` and `&#x7b;` at the start of `s`.
fn starts_char_ref(s: &str) -> bool {
    let Some(body) = s.strip_prefix('&') else {
        return false;
    };
    let Some(end) = body.find(';') else {
        return false;
    };
    let name = &body[..end];

    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        !hex.is_empty() && hex.len() <= 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = name.strip_prefix('#') {
        !dec.is_empty() && dec.len() <= 7 && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        !name.is_empty()
            && name.len() <= 32
            && name.starts_with(|c: char| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
