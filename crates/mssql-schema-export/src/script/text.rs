//! Script text normalization.

/// Collapse runs of blank lines in generated script text.
///
/// Line terminators (`\r\n`, `\r`, `\n`) are first unified to `\n`, then any
/// run of two or more consecutive `\n` characters is replaced with exactly
/// one blank line (`\n\n`). Leading and trailing blank-line runs collapse
/// the same way, so input that ends in a blank-line run ends in `\n\n`.
///
/// The function is pure and idempotent.
pub fn normalize(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");

    // Split on runs of >= 2 newlines, keeping empty boundary fragments.
    let bytes = unified.as_bytes();
    let mut fragments: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            if i - run_start >= 2 {
                fragments.push(&unified[start..run_start]);
                start = i;
            }
        } else {
            i += 1;
        }
    }
    fragments.push(&unified[start..]);

    fragments.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending_invariance() {
        assert_eq!(normalize("a\r\nb"), "a\nb");
        assert_eq!(normalize("a\rb"), "a\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_blank_run_collapse() {
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_mixed_terminator_runs() {
        assert_eq!(normalize("a\r\n\r\n\r\nb"), "a\n\nb");
        assert_eq!(normalize("a\r\rb"), "a\n\nb");
    }

    #[test]
    fn test_leading_and_trailing_runs() {
        assert_eq!(normalize("\n\n\na"), "\n\na");
        assert_eq!(normalize("a\n\n\n"), "a\n\n");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "",
            "a",
            "a\nb",
            "a\n\n\n\nb\r\n\r\nc",
            "\n\n\n",
            "x\r\ny\rz\n\n",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_and_single_newline() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n"), "\n");
        assert_eq!(normalize("\n\n"), "\n\n");
    }
}
