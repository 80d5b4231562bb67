const ELLIPSIS: &str = "...";
const MAX_LINES: usize = 2;

/// Greedily packs words into at most two lines of `max_chars`.
///
/// Whatever does not fit is dropped and the second line ends in `...`.
/// A word longer than a whole line is cut, never split across lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflow = false;

    for word in &words {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current.is_empty() {
            if word_len > max_chars {
                current = truncate_chars(word, max_chars);
            } else {
                current.push_str(word);
            }
            continue;
        }
        if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        lines.push(std::mem::take(&mut current));
        if lines.len() == MAX_LINES {
            overflow = true;
            break;
        }
        current = if word_len > max_chars {
            truncate_chars(word, max_chars)
        } else {
            word.to_string()
        };
    }

    if !current.is_empty() && lines.len() < MAX_LINES {
        lines.push(current);
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, max_chars);
        }
    }
    lines
}

fn truncate_chars(word: &str, max_chars: usize) -> String {
    if word.chars().count() <= max_chars {
        return word.to_string();
    }
    if max_chars > ELLIPSIS.len() {
        let kept: String = word.chars().take(max_chars - ELLIPSIS.len()).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        word.chars().take(max_chars).collect()
    }
}

fn with_ellipsis(line: &str, max_chars: usize) -> String {
    if line.ends_with(ELLIPSIS) {
        return line.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return ".".repeat(max_chars);
    }
    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let kept: String = line.chars().take(budget).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

/// Compact count: `950`, `1.5k`, `2m`.
pub fn format_number(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    let thousands = rounded_tenths(value, 1_000);
    if thousands < 10_000 {
        return format!("{}k", tenths_to_string(thousands));
    }
    format!("{}m", tenths_to_string(rounded_tenths(value, 1_000_000)))
}

fn rounded_tenths(value: u64, unit: u64) -> u64 {
    // half-up in integer space; u128 keeps u64::MAX * 10 in range
    ((value as u128 * 10 + unit as u128 / 2) / unit as u128) as u64
}

fn tenths_to_string(tenths: u64) -> String {
    if tenths % 10 == 0 {
        format!("{}", tenths / 10)
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Title-cases a snake_case key: `contributed_to` -> `Contributed To`.
pub fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_fits_on_one_line_with_ample_width() {
        assert_eq!(wrap_text("word1 word2 word3", 100), vec!["word1 word2 word3"]);
    }

    #[test]
    fn wrap_splits_into_two_lines() {
        assert_eq!(
            wrap_text("distributed event store", 12),
            vec!["distributed", "event store"]
        );
    }

    #[test]
    fn wrap_truncates_overflow_on_second_line() {
        let long = "a fast embedded key value store with pluggable codecs and replication built in";
        let lines = wrap_text(long, 20);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
    }

    #[test]
    fn wrap_hard_truncates_oversized_word() {
        let lines = wrap_text("supercalifragilisticexpialidocious", 10);
        assert_eq!(lines, vec!["superca..."]);
    }

    #[test]
    fn wrap_keeps_ellipsis_within_narrow_widths() {
        assert_eq!(wrap_text("aa bb cc dd ee", 2), vec!["aa", ".."]);
        for width in 1..=3 {
            let lines = wrap_text("aa bb cc dd ee", width);
            assert!(lines.iter().all(|line| line.chars().count() <= width), "{lines:?}");
        }
    }

    #[test]
    fn wrap_empty_text_has_no_lines() {
        assert!(wrap_text("   ", 30).is_empty());
    }

    #[test]
    fn format_number_examples() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(950), "950");
        assert_eq!(format_number(1000), "1k");
        assert_eq!(format_number(1500), "1.5k");
        assert_eq!(format_number(1234), "1.2k");
        assert_eq!(format_number(2_000_000), "2m");
        assert_eq!(format_number(2_450_000), "2.5m");
    }

    #[test]
    fn format_number_promotes_rounding_edge() {
        assert_eq!(format_number(999_949), "999.9k");
        assert_eq!(format_number(999_950), "1m");
        assert!(!format_number(u64::MAX).is_empty());
    }

    #[test]
    fn escape_xml_escapes_markup() {
        assert_eq!(escape_xml("<a>&</a>"), "&lt;a&gt;&amp;&lt;/a&gt;");
        assert_eq!(escape_xml("say \"hi\" it's"), "say &quot;hi&quot; it&apos;s");
    }

    #[test]
    fn title_case_keys() {
        assert_eq!(title_case("contributed_to"), "Contributed To");
        assert_eq!(title_case("stars"), "Stars");
    }
}
