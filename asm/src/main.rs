mod error;
mod msg;
mod num;
mod parser;
mod pass1;
mod pass2;
mod table;

use arch::inst::Inst;
use color_print::{cformat, cprintln};
use indexmap::IndexMap;

use crate::pass2::OnUndefined;
use crate::table::{Mode, SymbolTable};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(default_value = "main.s")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "main.hex")]
    output: String,

    /// Write the expanded intermediate stream
    #[clap(short, long)]
    intermediate: Option<String>,

    /// Write the symbol table
    #[clap(short, long)]
    symbols: Option<String>,

    /// Write the relocation table
    #[clap(short, long)]
    relocation: Option<String>,

    /// Defer undefined branch/jump targets to the linker instead of failing
    #[clap(long)]
    relocate: bool,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    use std::io::BufRead;

    let args: Args = Args::parse();
    let mut errcnt: usize = 0;

    println!("1. Read Files");
    let mut files: IndexMap<String, Vec<String>> = IndexMap::new();
    for path in &args.input {
        println!("  < {}", path);
        let file =
            std::fs::File::open(path).expect(&cformat!("<r,s>Failed to open file</>: {}", path));
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .collect::<Result<_, _>>()
            .expect(&cformat!("<r,s>Failed to read file</>: {}", path));
        files.insert(path.clone(), lines);
    }

    println!("2. Expand Pseudo-Instructions & Collect Labels");
    let mut symtbl = SymbolTable::new(Mode::Unique);
    let mut expanded: Vec<u8> = Vec::new();
    let mut offset: u32 = 0;
    for (path, lines) in &files {
        for (idx, raw) in lines.iter().enumerate() {
            let line = parser::Line::new(path, idx, raw);
            let (label, inst) = line.parse();
            if let Some(name) = label {
                if let Err(e) = symtbl.add(&name, offset) {
                    e.print_diag(&files, line.path(), line.idx());
                    errcnt += 1;
                }
            }
            if let Some((name, argv)) = inst {
                let argv: Vec<&str> = argv.iter().map(String::as_str).collect();
                match pass1::write_pass_one(&mut expanded, &name, &argv) {
                    Ok(n) => offset += 4 * n,
                    Err(e) => {
                        e.print_diag(&files, line.path(), line.idx());
                        errcnt += 1;
                    }
                }
            }
        }
    }
    let expanded = String::from_utf8(expanded).expect("expanded stream is utf-8");

    println!("3. Encode Instructions");
    let policy = if args.relocate {
        OnUndefined::Relocate
    } else {
        OnUndefined::Fail
    };
    let mut reltbl = SymbolTable::new(Mode::NonUnique);
    let mut words: Vec<u8> = Vec::new();
    let mut listing: Vec<(u32, Option<Inst>, String)> = Vec::new();
    for (idx, line) in expanded.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => continue,
        };
        let argv: Vec<&str> = tokens.collect();
        let addr = 4 * idx as u32;
        match pass2::translate_inst(&mut words, name, &argv, addr, &symtbl, &mut reltbl, policy) {
            Ok(inst) => listing.push((addr, Some(inst), line.to_string())),
            Err(e) => {
                msg::Msg::Error(format!("{}", e)).print(("<expanded>", idx, line));
                errcnt += 1;
                listing.push((addr, None, line.to_string()));
            }
        }
    }

    for sym in reltbl.iter() {
        let idx = (sym.addr() / 4) as usize;
        let raw = expanded.lines().nth(idx).unwrap_or("");
        msg::Msg::Note(format!("`{}` deferred to link time", sym.name()))
            .print(("<expanded>", idx, raw));
    }
    if args.relocation.is_none() {
        if let Some(sym) = reltbl.iter().next() {
            let idx = (sym.addr() / 4) as usize;
            let raw = expanded.lines().nth(idx).unwrap_or("");
            msg::Msg::Warn(format!(
                "{} deferred reference(s) but no relocation file requested",
                reltbl.len()
            ))
            .print(("<expanded>", idx, raw));
        }
    }

    if errcnt > 0 {
        cprintln!("<red,bold>error</>: {} error(s), no output written", errcnt);
        std::process::exit(1);
    }

    println!("4. Write Output");
    println!("  > {}", &args.output);
    std::fs::write(&args.output, &words)
        .expect(&cformat!("<r,s>Failed to write file</>: {}", &args.output));
    if let Some(path) = &args.intermediate {
        println!("  > {}", path);
        std::fs::write(path, expanded.as_bytes())
            .expect(&cformat!("<r,s>Failed to write file</>: {}", path));
    }
    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        let mut file =
            std::fs::File::create(path).expect(&cformat!("<r,s>Failed to create file</>: {}", path));
        symtbl
            .write(&mut file)
            .expect(&cformat!("<r,s>Failed to write file</>: {}", path));
    }
    if let Some(path) = &args.relocation {
        println!("  > {}", path);
        let mut file =
            std::fs::File::create(path).expect(&cformat!("<r,s>Failed to create file</>: {}", path));
        reltbl
            .write(&mut file)
            .expect(&cformat!("<r,s>Failed to write file</>: {}", path));
    }

    if args.dump {
        for (addr, inst, raw) in &listing {
            match inst {
                Some(inst) => println!("[{:04X}] {:08X} | {}", addr, inst.to_bin(), inst.cformat()),
                None => println!("[{:04X}] ???????? | {}", addr, raw),
            }
        }
        println!("-------------------+-----------------------------------------------------");
    }
}
