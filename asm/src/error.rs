use color_print::cprintln;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("Expected {expected} arguments, found {found}")]
    WrongArgCount { expected: usize, found: usize },

    #[error("Cannot parse `{0}` as a register")]
    UnknownRegister(String),

    #[error("Cannot parse `{0}` as a number")]
    BadLiteral(String),

    #[error("Value {value} is outside [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("`{0}` is not a label")]
    NotALabel(String),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Address {0} is not a multiple of 4")]
    Misaligned(u32),

    #[error("Name `{0}` already exists in table")]
    Redefined(String),

    #[error("Failed to write output")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Print the error against the source line it came from.
    pub fn print_diag(&self, files: &IndexMap<String, Vec<String>>, file: &str, line_idx: usize) {
        cprintln!("<red,bold>error</>: {}", self);

        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        let line_content = files
            .get(file)
            .and_then(|lines| lines.get(line_idx))
            .map(|s| s.as_str())
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
