//! Pass one: pseudo-instruction expansion.
//!
//! Real instructions pass through untouched; `li` and `blt` expand into
//! their shortest real equivalents. Label addresses depend on the returned
//! instruction counts, so the counts here must match what pass two encodes.

use std::io::Write;

use crate::error::Error;
use crate::num::parse_literal;

/// Writes the expansion of one source instruction, one instruction per
/// line, and returns how many were written. On error nothing is written.
pub fn write_pass_one<W: Write>(out: &mut W, name: &str, args: &[&str]) -> Result<u32, Error> {
    match name {
        "li" => {
            if args.len() != 2 {
                return Err(Error::WrongArgCount {
                    expected: 2,
                    found: args.len(),
                });
            }
            // Representable in 32 bits, signed or unsigned; work on the
            // two's-complement bit pattern from here on.
            let imm = parse_literal(args[1], i32::MIN as i64, u32::MAX as i64)? as u32;
            if imm <= 0xFFFF {
                writeln!(out, "addiu {} $zero {}", args[0], imm)?;
                Ok(1)
            } else {
                writeln!(out, "lui {} {}", args[0], imm >> 16)?;
                writeln!(out, "ori {} {} {}", args[0], args[0], imm & 0xFFFF)?;
                Ok(2)
            }
        }
        "blt" => {
            if args.len() != 3 {
                return Err(Error::WrongArgCount {
                    expected: 3,
                    found: args.len(),
                });
            }
            // $at is reserved for exactly this; rs and rt stay untouched.
            writeln!(out, "slt $at {} {}", args[0], args[1])?;
            writeln!(out, "bne $at $zero {}", args[2])?;
            Ok(2)
        }
        _ => {
            write!(out, "{}", name)?;
            for arg in args {
                write!(out, " {}", arg)?;
            }
            writeln!(out)?;
            Ok(1)
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(name: &str, args: &[&str]) -> Result<(u32, String), Error> {
        let mut out = Vec::new();
        let n = write_pass_one(&mut out, name, args)?;
        Ok((n, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn real_instruction_passes_through() {
        let (n, text) = expand("addu", &["$t2", "$t0", "$t1"]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(text, "addu $t2 $t0 $t1\n");
    }

    #[test]
    fn li_small_is_one_addiu() {
        let (n, text) = expand("li", &["$t0", "5"]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(text, "addiu $t0 $zero 5\n");
    }

    #[test]
    fn li_boundary_still_fits() {
        let (n, text) = expand("li", &["$t0", "0xFFFF"]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(text, "addiu $t0 $zero 65535\n");
    }

    #[test]
    fn li_large_is_lui_ori_pair() {
        // 100000 = 0x0001_86A0
        let (n, text) = expand("li", &["$t0", "100000"]).unwrap();
        assert_eq!(n, 2);
        assert_eq!(text, "lui $t0 1\nori $t0 $t0 34464\n");
    }

    #[test]
    fn li_negative_keeps_exact_bits() {
        // -1 = 0xFFFF_FFFF, upper half set, so it takes the pair
        let (n, text) = expand("li", &["$t0", "-1"]).unwrap();
        assert_eq!(n, 2);
        assert_eq!(text, "lui $t0 65535\nori $t0 $t0 65535\n");
    }

    #[test]
    fn li_range_checks_32_bits() {
        let err = expand("li", &["$t0", "4294967296"]).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
        let err = expand("li", &["$t0", "-2147483649"]).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
    }

    #[test]
    fn li_wrong_arg_count_writes_nothing() {
        let mut out = Vec::new();
        let err = write_pass_one(&mut out, "li", &["$t0"]).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongArgCount {
                expected: 2,
                found: 1
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn blt_is_slt_then_bne() {
        let (n, text) = expand("blt", &["$t0", "$t1", "foo"]).unwrap();
        assert_eq!(n, 2);
        assert_eq!(text, "slt $at $t0 $t1\nbne $at $zero foo\n");
    }

    #[test]
    fn blt_wrong_arg_count_writes_nothing() {
        let mut out = Vec::new();
        let err = write_pass_one(&mut out, "blt", &["$t0", "$t1"]).unwrap_err();
        assert!(matches!(err, Error::WrongArgCount { .. }));
        assert!(out.is_empty());
    }
}
