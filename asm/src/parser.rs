//! Splits a source line into an optional label definition and an optional
//! instruction.

/// One source line with its origin.
#[derive(Debug, Clone)]
pub struct Line {
    path: String,
    idx: usize,
    raw: String,
}

impl Line {
    pub fn new(path: &str, idx: usize, raw: &str) -> Self {
        Self {
            path: path.to_string(),
            idx,
            raw: raw.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Strips the `#` comment, then takes a leading `name:` as a label
    /// definition and the rest as `mnemonic arg, arg, ...`.
    pub fn parse(&self) -> (Option<String>, Option<(String, Vec<String>)>) {
        let code = match self.raw.split_once('#') {
            Some((code, _comment)) => code,
            None => self.raw.as_str(),
        };

        let mut tokens = code
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        let mut label = None;
        let mut head = tokens.next();
        if let Some(tok) = head {
            if let Some(name) = tok.strip_suffix(':') {
                label = Some(name.to_string());
                head = tokens.next();
            }
        }

        let inst = head.map(|name| {
            let args: Vec<String> = tokens.map(str::to_string).collect();
            (name.to_string(), args)
        });

        (label, inst)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Line {
        Line::new("main.s", 0, raw)
    }

    #[test]
    fn plain_instruction() {
        let (label, inst) = line("addiu $t0, $t0, 1").parse();
        assert_eq!(label, None);
        let (name, args) = inst.unwrap();
        assert_eq!(name, "addiu");
        assert_eq!(args, vec!["$t0", "$t0", "1"]);
    }

    #[test]
    fn label_and_instruction_share_a_line() {
        let (label, inst) = line("loop: beq $t0, $t1, end # spin").parse();
        assert_eq!(label.as_deref(), Some("loop"));
        let (name, args) = inst.unwrap();
        assert_eq!(name, "beq");
        assert_eq!(args, vec!["$t0", "$t1", "end"]);
    }

    #[test]
    fn label_alone() {
        let (label, inst) = line("end:").parse();
        assert_eq!(label.as_deref(), Some("end"));
        assert!(inst.is_none());
    }

    #[test]
    fn comment_and_blank_lines_are_empty() {
        assert_eq!(line("# nothing here").parse(), (None, None));
        assert_eq!(line("   ").parse(), (None, None));
    }
}
