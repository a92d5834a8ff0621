//! Agency slug generation.

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 48;

/// Derive a URL-safe slug from an agency name.
///
/// Latin accents are folded (`ê` -> `e`, `ç` -> `c`), anything that is not
/// ASCII alphanumeric becomes a single `-`, and leading/trailing dashes are
/// dropped. An empty result falls back to `"agencia"`.
///
/// ```
/// use agencia_core::naming::slugify;
///
/// assert_eq!(slugify("Agência Criativa & Cia"), "agencia-criativa-cia");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(ch);
        if folded.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(folded);
        } else {
            pending_dash = true;
        }
        if slug.len() >= MAX_SLUG_LENGTH {
            break;
        }
    }

    if slug.is_empty() {
        "agencia".to_string()
    } else {
        slug
    }
}

/// Append a numeric suffix to disambiguate a slug that is already taken.
pub fn with_suffix(slug: &str, n: u32) -> String {
    format!("{slug}-{n}")
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
