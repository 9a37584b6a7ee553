//! Pass two: encodes the expanded stream into 32-bit words.

use std::io::Write;

use arch::inst::Inst;
use arch::op::OpKind;
use arch::reg::Reg;

use crate::error::Error;
use crate::num::{check_range, is_label, parse_literal};
use crate::table::SymbolTable;

/// What to do when a branch or jump names a symbol the table does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnUndefined {
    /// Fail the instruction.
    #[default]
    Fail,
    /// Emit a zero target and record the reference for the linker.
    Relocate,
}

/// Encodes one instruction and writes its word as a lowercase 8-digit hex
/// line. `addr` is the byte offset of the instruction. Nothing is written
/// unless every operand validates.
pub fn translate_inst<W: Write>(
    out: &mut W,
    name: &str,
    args: &[&str],
    addr: u32,
    symtbl: &SymbolTable,
    reltbl: &mut SymbolTable,
    policy: OnUndefined,
) -> Result<Inst, Error> {
    let op = OpKind::parse(name).map_err(|_| Error::UnknownMnemonic(name.to_string()))?;
    let inst = encode(op, args, addr, symtbl, reltbl, policy)?;
    writeln!(out, "{:08x}", inst.to_bin())?;
    Ok(inst)
}

fn encode(
    op: OpKind,
    args: &[&str],
    addr: u32,
    symtbl: &SymbolTable,
    reltbl: &mut SymbolTable,
    policy: OnUndefined,
) -> Result<Inst, Error> {
    let expected = op.format().arity();
    if args.len() != expected {
        return Err(Error::WrongArgCount {
            expected,
            found: args.len(),
        });
    }
    match op {
        OpKind::ADDU => Ok(Inst::ADDU(reg(args[0])?, reg(args[1])?, reg(args[2])?)),
        OpKind::OR => Ok(Inst::OR(reg(args[0])?, reg(args[1])?, reg(args[2])?)),
        OpKind::SLT => Ok(Inst::SLT(reg(args[0])?, reg(args[1])?, reg(args[2])?)),
        OpKind::SLTU => Ok(Inst::SLTU(reg(args[0])?, reg(args[1])?, reg(args[2])?)),
        OpKind::SLL => Ok(Inst::SLL(
            reg(args[0])?,
            reg(args[1])?,
            parse_literal(args[2], 0, 31)? as u8,
        )),
        OpKind::JR => Ok(Inst::JR(reg(args[0])?)),
        OpKind::ADDIU => Ok(Inst::ADDIU(reg(args[0])?, reg(args[1])?, imm16(args[2])?)),
        OpKind::ORI => Ok(Inst::ORI(reg(args[0])?, reg(args[1])?, imm16(args[2])?)),
        OpKind::LUI => Ok(Inst::LUI(reg(args[0])?, imm16(args[1])?)),
        OpKind::LB => Ok(Inst::LB(reg(args[0])?, reg(args[2])?, imm16(args[1])?)),
        OpKind::LBU => Ok(Inst::LBU(reg(args[0])?, reg(args[2])?, imm16(args[1])?)),
        OpKind::LW => Ok(Inst::LW(reg(args[0])?, reg(args[2])?, imm16(args[1])?)),
        OpKind::SB => Ok(Inst::SB(reg(args[0])?, reg(args[2])?, imm16(args[1])?)),
        OpKind::SW => Ok(Inst::SW(reg(args[0])?, reg(args[2])?, imm16(args[1])?)),
        OpKind::BEQ | OpKind::BNE => {
            let rt = reg(args[0])?;
            let rs = reg(args[1])?;
            let target = lookup(args[2], addr, symtbl, reltbl, policy, 0xFFFF)? as u16;
            Ok(match op {
                OpKind::BEQ => Inst::BEQ(rs, rt, target),
                _ => Inst::BNE(rs, rt, target),
            })
        }
        OpKind::J | OpKind::JAL => {
            let target = lookup(args[0], addr, symtbl, reltbl, policy, 0x03FF_FFFF)?;
            Ok(match op {
                OpKind::J => Inst::J(target),
                _ => Inst::JAL(target),
            })
        }
    }
}

fn reg(s: &str) -> Result<Reg, Error> {
    Reg::parse(s).map_err(|_| Error::UnknownRegister(s.to_string()))
}

fn imm16(s: &str) -> Result<u16, Error> {
    Ok(parse_literal(s, 0, 0xFFFF)? as u16)
}

/// Resolves a label operand to its target-field value, deferring to the
/// relocation table when the policy allows it.
fn lookup(
    name: &str,
    addr: u32,
    symtbl: &SymbolTable,
    reltbl: &mut SymbolTable,
    policy: OnUndefined,
    max: i64,
) -> Result<u32, Error> {
    if !is_label(name) {
        return Err(Error::NotALabel(name.to_string()));
    }
    match symtbl.get(name) {
        Some(found) => Ok(check_range(found as i64, 0, max)? as u32),
        None => match policy {
            OnUndefined::Fail => Err(Error::UndefinedSymbol(name.to_string())),
            OnUndefined::Relocate => {
                reltbl.add(name, addr)?;
                Ok(0)
            }
        },
    }
}

// ----------------------------------------------------------------------------
