fn transliterate(c: char) -> Option<&'static str> {
    let s = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ą' => "A",
        'æ' => "ae",
        'Æ' => "AE",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'è' | 'é' | 'ê' | 'ë' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ę' | 'Ě' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ł' => "l",
        'Ł' => "L",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ś' | 'š' => "s",
        'Ś' | 'Š' => "S",
        'ß' => "ss",
        'ù' | 'ú' | 'û' | 'ü' | 'ů' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ů' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        '&' => "and",
        '$' => "dollar",
        '%' => "percent",
        '|' => "or",
        '<' => "less",
        '>' => "greater",
        _ => return None,
    };
    Some(s)
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || "_$*+~.()'\"!-:@".contains(c)
}

/// URL slug: known symbols are transliterated, other punctuation dropped, and whitespace runs become dashes.
///
/// Case is preserved; callers lowercase when they need a key.
pub(crate) fn slugify(input: &str) -> String {
    let mut kept = String::with_capacity(input.len());
    for c in input.chars() {
        match transliterate(c) {
            Some(s) => kept.push_str(s),
            None if c == '-' => kept.push(' '),
            None if is_slug_char(c) => kept.push(c),
            None => {}
        }
    }

    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Lowercased slug, or `None` when nothing sluggable remains.
pub(crate) fn slug_key(input: &str) -> Option<String> {
    let slug = slugify(input).to_lowercase();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}
