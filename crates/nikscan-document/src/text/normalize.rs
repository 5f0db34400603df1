// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line cleanup for raw OCR output from identity cards.

/// How the engine tends to read the colon after the `NIK` label: a closing
/// curly quote followed by an em dash.
pub const COLON_ARTIFACT: &str = "\u{201D}\u{2014}";

/// Field label marking the line that carries the NIK. Case-sensitive.
pub const NIK_LABEL: &str = "NIK";

/// Letter/digit confusions corrected on label lines.
const DIGIT_CONFUSIONS: [(char, char); 2] = [('D', '0'), ('?', '7')];

/// Fix the known OCR artifacts in one line.
///
/// The colon artifact is replaced everywhere. On lines containing
/// [`NIK_LABEL`], `D` becomes `0` and `?` becomes `7` across the *whole* line,
/// including any other field that shares it.
pub fn clean_line(line: &str) -> String {
    let line = line.replace(COLON_ARTIFACT, ":");
    if !line.contains(NIK_LABEL) {
        return line;
    }
    line.chars()
        .map(|c| {
            DIGIT_CONFUSIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect()
}

/// Split OCR output on `\n`, clean every line, and drop the blank ones.
///
/// Order is preserved and nothing is deduplicated. Kept lines are not trimmed.
pub fn clean_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(clean_line)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_line_gets_colon_and_digit_fixes() {
        assert_eq!(
            clean_line("NIK\u{201D}\u{2014}3271D4567890123?"),
            "NIK:3271045678901237"
        );
    }

    #[test]
    fn other_lines_keep_their_letters() {
        assert_eq!(clean_line("Nama : DEDI?"), "Nama : DEDI?");
        // The colon artifact is fixed on every line, label or not.
        assert_eq!(clean_line("Agama\u{201D}\u{2014}ISLAM"), "Agama:ISLAM");
    }

    #[test]
    fn label_match_is_case_sensitive() {
        assert_eq!(clean_line("nik D?"), "nik D?");
        assert_eq!(clean_line("Nik D?"), "Nik D?");
    }

    #[test]
    fn known_limitation_rewrites_whole_label_line() {
        // A name sharing the label line is corrupted too: D -> 0, ? -> 7.
        assert_eq!(
            clean_line("NIK 3271045678901237 DEDI?"),
            "NIK 3271045678901237 0E0I7"
        );
    }

    #[test]
    fn lone_quote_or_dash_is_left_alone() {
        assert_eq!(clean_line("a\u{201D} b\u{2014}"), "a\u{201D} b\u{2014}");
    }

    #[test]
    fn blank_lines_are_dropped_and_order_kept() {
        let raw = "PROVINSI JAWA BARAT\n\n   \nKOTA BOGOR\n\t\nNIK : 3271D45678901237\nPROVINSI JAWA BARAT\n";
        assert_eq!(
            clean_lines(raw),
            vec![
                "PROVINSI JAWA BARAT".to_string(),
                "KOTA BOGOR".to_string(),
                "NIK : 3271045678901237".to_string(),
                "PROVINSI JAWA BARAT".to_string(),
            ]
        );
    }

    #[test]
    fn kept_lines_are_not_trimmed() {
        assert_eq!(clean_lines("  Nama  \r\n"), vec!["  Nama  \r".to_string()]);
    }

    #[test]
    fn every_kept_line_has_content() {
        let raw = "\n \n\u{201D}\u{2014}\nNIK\n\t \n x";
        for line in clean_lines(raw) {
            assert!(!line.trim().is_empty(), "blank line survived: {line:?}");
        }
    }
}
