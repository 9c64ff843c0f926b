use crate::alignment::symbols::{
    canonicalize, is_null_segment, LINK, PAIR_SEPARATOR, TAG_SEPARATOR,
};
use crate::error::ScoringError;
use crate::types::{AlignmentPair, Phone};

/// Parses `target↔actual,target↔actual,...` into pairs, left to right.
///
/// Each side may carry a `:tag` suffix and may be wrapped in one pair of
/// parentheses; the whole alignment may be wrapped in one pair as well.
/// No partial recovery: the first structural problem fails the whole string.
pub fn parse_alignment(raw: &str) -> Result<Vec<AlignmentPair>, ScoringError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScoringError::malformed("empty alignment"));
    }
    check_balanced(trimmed)?;
    let body = strip_group(trimmed).trim();
    if body.is_empty() {
        return Err(ScoringError::malformed("alignment contains no pair-tokens"));
    }

    let mut pairs = Vec::new();
    for (position, token) in body.split(PAIR_SEPARATOR).enumerate() {
        let token = token.trim();
        if token.is_empty() {
            return Err(ScoringError::malformed(format!(
                "empty pair-token at position {position}"
            )));
        }
        pairs.push(parse_pair_token(token, position)?);
    }

    tracing::debug!(pairs = pairs.len(), "parser: parsed alignment");
    Ok(pairs)
}

fn parse_pair_token(token: &str, position: usize) -> Result<AlignmentPair, ScoringError> {
    let mut sides = token.split(LINK);
    let (Some(target), Some(actual)) = (sides.next(), sides.next()) else {
        return Err(ScoringError::malformed(format!(
            "token '{token}' at position {position} has no link separator"
        )));
    };
    if sides.next().is_some() {
        return Err(ScoringError::malformed(format!(
            "token '{token}' at position {position} has more than one link separator"
        )));
    }

    let (target, target_tag) = parse_side(target, token)?;
    let (actual, actual_tag) = parse_side(actual, token)?;
    if target.is_none() && actual.is_none() {
        return Err(ScoringError::malformed(format!(
            "token '{token}' at position {position} has no segment on either side"
        )));
    }

    Ok(AlignmentPair {
        target,
        actual,
        target_tag,
        actual_tag,
    })
}

fn parse_side(side: &str, token: &str) -> Result<(Option<Phone>, Option<String>), ScoringError> {
    let side = strip_group(side.trim()).trim();
    let (phone, tag) = match side.rsplit_once(TAG_SEPARATOR) {
        Some((phone, tag)) => {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(ScoringError::malformed(format!(
                    "token '{token}' has an empty position tag"
                )));
            }
            (phone, Some(tag.to_string()))
        }
        None => (side, None),
    };

    let phone = strip_group(phone.trim()).trim();
    if phone.contains(['(', ')']) {
        return Err(ScoringError::malformed(format!(
            "token '{token}' has parentheses inside a segment"
        )));
    }
    if phone.is_empty() {
        return Err(ScoringError::malformed(format!(
            "token '{token}' has an empty side"
        )));
    }
    if is_null_segment(phone) {
        return Ok((None, tag));
    }

    Ok((
        Some(Phone {
            raw: phone.to_string(),
            canonical: canonicalize(phone),
        }),
        tag,
    ))
}

fn check_balanced(text: &str) -> Result<(), ScoringError> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ScoringError::malformed(format!("unbalanced ')' in '{text}'"))
                })?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ScoringError::malformed(format!("unbalanced '(' in '{text}'")));
    }
    Ok(())
}

/// Removes one pair of parentheses when they enclose the whole text.
fn strip_group(text: &str) -> &str {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    // "(a)(b)": the leading '(' closes before the end
                    return text;
                }
            }
            _ => {}
        }
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(pairs: &[AlignmentPair]) -> Vec<(Option<&str>, Option<&str>)> {
        pairs.iter().map(|p| (p.raw_target(), p.raw_actual())).collect()
    }

    fn assert_malformed(raw: &str) {
        match parse_alignment(raw) {
            Err(ScoringError::MalformedAlignment { .. }) => {}
            other => panic!("expected MalformedAlignment for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn tagged_cluster_with_deletion() {
        let pairs = parse_alignment("s:L↔s:L,p:O↔p:O,ɹ:O↔∅:O").unwrap();
        assert_eq!(
            phones(&pairs),
            [
                (Some("s"), Some("s")),
                (Some("p"), Some("p")),
                (Some("ɹ"), None)
            ]
        );
        assert_eq!(pairs[0].target_tag.as_deref(), Some("L"));
        assert_eq!(pairs[2].actual_tag.as_deref(), Some("O"));
    }

    #[test]
    fn untagged_tokens_and_whitespace() {
        let pairs = parse_alignment(" k↔t , æ↔æ ").unwrap();
        assert_eq!(phones(&pairs), [(Some("k"), Some("t")), (Some("æ"), Some("æ"))]);
        assert!(pairs[0].target_tag.is_none());
    }

    #[test]
    fn insertion_has_absent_target() {
        let pairs = parse_alignment("∅↔ə,p↔p").unwrap();
        assert!(pairs[0].target.is_none());
        assert_eq!(pairs[0].raw_actual(), Some("ə"));
    }

    #[test]
    fn legacy_symbols_expand_but_raw_is_kept() {
        let pairs = parse_alignment("ʧ↔t͡ʃ,g↔ɡ").unwrap();
        let target = pairs[0].target.as_ref().unwrap();
        assert_eq!(target.raw, "ʧ");
        assert_eq!(target.canonical, "t͡ʃ");
        let actual = pairs[0].actual.as_ref().unwrap();
        assert_eq!(actual.raw, actual.canonical);
        assert_eq!(pairs[1].target.as_ref().unwrap().canonical, "ɡ");
    }

    #[test]
    fn parentheses_around_alignment_and_segments_are_stripped() {
        let pairs = parse_alignment("(s↔s,(ɹ)↔∅)").unwrap();
        assert_eq!(phones(&pairs), [(Some("s"), Some("s")), (Some("ɹ"), None)]);
        let pairs = parse_alignment("(ɹ:O)↔w:O").unwrap();
        assert_eq!(phones(&pairs), [(Some("ɹ"), Some("w"))]);
        assert_eq!(pairs[0].target_tag.as_deref(), Some("O"));
    }

    #[test]
    fn order_is_preserved() {
        let pairs = parse_alignment("a↔b,c↔d,e↔f,h↔i").unwrap();
        assert_eq!(
            phones(&pairs),
            [
                (Some("a"), Some("b")),
                (Some("c"), Some("d")),
                (Some("e"), Some("f")),
                (Some("h"), Some("i"))
            ]
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        assert_malformed("");
        assert_malformed("   ");
        assert_malformed("()");
        assert_malformed("sp");
        assert_malformed("s↔s,p");
        assert_malformed("s↔s,,p↔p");
        assert_malformed("s↔s,");
        assert_malformed("s↔s↔s");
        assert_malformed("↔s");
        assert_malformed("s↔");
        assert_malformed("s:↔s");
        assert_malformed("∅↔∅");
        assert_malformed("(s↔s");
        assert_malformed("s↔s)");
        assert_malformed("s(x)↔s");
        assert_malformed(")s↔s(");
    }

    #[test]
    fn strip_group_only_removes_enclosing_pair() {
        assert_eq!(strip_group("(a)"), "a");
        assert_eq!(strip_group("(a)(b)"), "(a)(b)");
        assert_eq!(strip_group("a"), "a");
        assert_eq!(strip_group("((a))"), "(a)");
    }
}
