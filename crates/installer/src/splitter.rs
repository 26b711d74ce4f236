//! Statement splitting
//!
//! Scripts are decomposed on the `;` terminator. This is a simplicity
//! tradeoff, not a parser: a `;` inside a string literal or comment is
//! treated as a terminator, so scripts must avoid them.

/// Split a script into its executable statements, in order.
///
/// Whitespace-only fragments are dropped; kept fragments are returned as
/// written, with surrounding whitespace intact.
pub fn split(script: &str) -> Vec<&str> {
    script
        .split(';')
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_in_order() {
        let script = "CREATE TABLE a (id INT);CREATE TABLE b (id INT);DROP TABLE a";
        assert_eq!(
            split(script),
            vec![
                "CREATE TABLE a (id INT)",
                "CREATE TABLE b (id INT)",
                "DROP TABLE a"
            ]
        );
    }

    #[test]
    fn test_drops_empty_fragments() {
        assert_eq!(split("A;;B;  \n ;"), vec!["A", "B"]);
        assert!(split("").is_empty());
        assert!(split(" ;\n; ").is_empty());
    }

    #[test]
    fn test_does_not_trim_fragments() {
        let fragments = split("\nCREATE TABLE a (id INT);\nDROP TABLE a;\n");
        assert_eq!(fragments, vec!["\nCREATE TABLE a (id INT)", "\nDROP TABLE a"]);
    }

    #[test]
    fn test_no_literal_awareness() {
        // Embedded ';' in a literal still splits: documented limitation.
        let fragments = split("INSERT INTO t VALUES ('a;b')");
        assert_eq!(fragments.len(), 2);
    }
}
