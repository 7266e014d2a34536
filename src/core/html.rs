// src/core/html.rs
//
// Tolerant, case-insensitive scanning over raw HTML. Good enough for the
// plain server-rendered tables we read; not a general parser.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// `<tr` must not match `<track`, `<th` must not match `<thead`.
fn is_tag_boundary(rest: &[u8]) -> bool {
    matches!(rest.first(), None | Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n'))
}

/// Find the next `open … close` block at or after `from`, case-insensitively.
/// Returns byte offsets `(start_of_open_tag, end_of_close_tag)`.
pub fn next_tag_block_ci(s: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    find_block(s, &to_lower(s), &to_lower(open), &to_lower(close), from)
}

/// All `open … close` blocks, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, open: &str, close: &str) -> Vec<&'a str> {
    // Lower-case once; `to_lower` only touches ASCII so offsets line up.
    let lc = to_lower(s);
    let (ol, cl) = (to_lower(open), to_lower(close));

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = find_block(s, &lc, &ol, &cl, pos) {
        out.push(&s[b_s..b_e]);
        pos = b_e;
    }
    out
}

fn find_block(s: &str, lc: &str, ol: &str, cl: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    let start = loop {
        let at = lc.get(search..)?.find(ol)? + search;
        if is_tag_boundary(&lc.as_bytes()[at + ol.len()..]) {
            break at;
        }
        search = at + ol.len();
    };
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(cl)?;
    Some((start, open_end + end_rel + cl.len()))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Visible text of one cell block: tags dropped, entities decoded,
/// whitespace collapsed.
pub fn cell_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    let text = strip_tags(&inner);
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&text))
}
