use chrono::{DateTime, Datelike, Utc};

use super::types::FieldRecord;

/// Number of tokens every dissector line is normalised to.
pub const TOKENS_PER_LINE: usize = 6;

/// Converts a seconds-since-epoch token into an ISO-8601 UTC instant.
///
/// The value is rounded to microseconds; the fractional part is printed only
/// when non-zero. Anything that is not a finite number inside years
/// 1..=9999 yields an empty string.
pub fn epoch_to_iso8601(token: &str) -> String {
    let Ok(value) = token.trim().parse::<f64>() else {
        return String::new();
    };
    if !value.is_finite() {
        return String::new();
    }

    let mut secs = value.trunc();
    let mut micros = ((value - secs) * 1e6).round_ties_even();
    if micros >= 1e6 {
        secs += 1.0;
        micros -= 1e6;
    } else if micros < 0.0 {
        secs -= 1.0;
        micros += 1e6;
    }
    if secs.abs() > i64::MAX as f64 {
        return String::new();
    }

    let micros = micros as u32;
    let Some(instant) = DateTime::<Utc>::from_timestamp(secs as i64, micros * 1_000) else {
        return String::new();
    };
    if !(1..=9999).contains(&instant.year()) {
        return String::new();
    }

    let mut out = instant.format("%Y-%m-%dT%H:%M:%S").to_string();
    if micros != 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out.push('Z');
    out
}

/// Removes one pair of surrounding double quotes, as added by `quote=d`.
fn unquote(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Parses one dissector output line into a record.
///
/// Missing trailing tokens count as empty strings and tokens past the sixth
/// are ignored, so this never fails.
pub fn parse_line(line: &str, separator: char) -> FieldRecord {
    let mut tokens: Vec<&str> = line.split(separator).map(unquote).collect();
    if tokens.len() < TOKENS_PER_LINE {
        tokens.resize(TOKENS_PER_LINE, "");
    }

    FieldRecord {
        time: epoch_to_iso8601(tokens[0]),
        src: tokens[1].to_string(),
        dst: tokens[2].to_string(),
        protocol: tokens[3].to_string(),
        length: tokens[4].to_string(),
        info: tokens[5].to_string(),
    }
}

/// Parses the whole dissector output, one record per line, in line order.
///
/// Blank lines are not skipped; they produce all-empty records.
pub fn parse_output(text: &str, separator: char) -> Vec<FieldRecord> {
    text.lines().map(|line| parse_line(line, separator)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        time: &str,
        src: &str,
        dst: &str,
        protocol: &str,
        length: &str,
        info: &str,
    ) -> FieldRecord {
        FieldRecord {
            time: time.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            protocol: protocol.to_string(),
            length: length.to_string(),
            info: info.to_string(),
        }
    }

    #[test]
    fn full_line() {
        let rec = parse_line("1700000000.0|10.0.0.1|10.0.0.2|TCP|60|SYN", '|');
        assert_eq!(
            rec,
            record("2023-11-14T22:13:20Z", "10.0.0.1", "10.0.0.2", "TCP", "60", "SYN")
        );
    }

    #[test]
    fn short_lines_are_padded() {
        let inputs = [
            "",
            "1700000000",
            "1700000000|a",
            "1700000000|a|b",
            "1700000000|a|b|UDP",
            "1700000000|a|b|UDP|42",
            "1700000000|a|b|UDP|42|query",
        ];
        let full = ["a", "b", "UDP", "42", "query"];

        for (count, line) in inputs.iter().enumerate() {
            let rec = parse_line(line, '|');
            let got = [&rec.src, &rec.dst, &rec.protocol, &rec.length, &rec.info];
            for (i, value) in got.iter().enumerate() {
                let expected = if i + 1 < count { full[i] } else { "" };
                assert_eq!(value.as_str(), expected, "line {:?} field {}", line, i);
            }
        }
    }

    #[test]
    fn empty_line_gives_empty_record() {
        assert_eq!(parse_line("", '|'), FieldRecord::default());
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let rec = parse_line("1700000000|a|b|TCP|60|Info|extra|more", '|');
        assert_eq!(rec.info, "Info");
    }

    #[test]
    fn quoted_tokens_are_unquoted() {
        let rec = parse_line(
            "\"1700000000.000000000\"|\"10.0.0.1\"|\"10.0.0.2\"|\"DNS\"|\"74\"|\"Standard query\"",
            '|',
        );
        assert_eq!(
            rec,
            record("2023-11-14T22:13:20Z", "10.0.0.1", "10.0.0.2", "DNS", "74", "Standard query")
        );
    }

    #[test]
    fn fractional_seconds_keep_microseconds() {
        assert_eq!(epoch_to_iso8601("1700000000.123456"), "2023-11-14T22:13:20.123456Z");
        assert_eq!(epoch_to_iso8601("1700000000.5"), "2023-11-14T22:13:20.500000Z");
        assert_eq!(epoch_to_iso8601("0"), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn unparsable_timestamps_are_empty() {
        for token in ["", "NaN-ish", "abc", "nan", "inf", "-inf", "1e300"] {
            assert_eq!(epoch_to_iso8601(token), "", "token {:?}", token);
        }
    }

    #[test]
    fn output_keeps_line_order_and_blank_lines() {
        let text = "1700000000|a|b|TCP|60|first\n\n1700000001|c|d|UDP|70|second\n";
        let records = parse_output(text, '|');

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].info, "first");
        assert_eq!(records[1], FieldRecord::default());
        assert_eq!(records[2].time, "2023-11-14T22:13:21Z");
        assert_eq!(records[2].info, "second");
    }

    #[test]
    fn crlf_output_is_accepted() {
        let records = parse_output("1700000000|a|b|TCP|60|SYN\r\n", '|');
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].info, "SYN");
    }

    #[test]
    fn empty_output_has_no_records() {
        assert!(parse_output("", '|').is_empty());
    }
}
