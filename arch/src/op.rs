use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OpKind {
    ADDU,
    OR,
    SLT,
    SLTU,
    SLL,
    JR,
    ADDIU,
    ORI,
    LUI,
    LB,
    LBU,
    LW,
    SB,
    SW,
    BEQ,
    BNE,
    J,
    JAL,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Selector placed in the top six bits of the word.
    pub fn opcode(&self) -> u8 {
        use OpKind::*;
        match self {
            SLL => 0x00,
            J => 0x02,
            JAL => 0x03,
            BEQ => 0x04,
            BNE => 0x05,
            JR => 0x08,
            ADDIU => 0x09,
            ORI => 0x0d,
            LUI => 0x0f,
            LB => 0x20,
            ADDU => 0x21,
            LW => 0x23,
            LBU => 0x24,
            OR => 0x25,
            SB => 0x28,
            SLT => 0x2a,
            // sw and sltu share a selector; the formats differ
            SLTU | SW => 0x2b,
        }
    }

    pub fn format(&self) -> Format {
        use OpKind::*;
        match self {
            ADDU | OR | SLT | SLTU => Format::Register,
            SLL => Format::Shift,
            JR => Format::JumpReg,
            ADDIU | ORI => Format::Imm,
            LUI => Format::UpperImm,
            LB | LBU | LW | SB | SW => Format::Mem,
            BEQ | BNE => Format::Branch,
            J | JAL => Format::Jump,
        }
    }
}

/// The eight word layouts, most significant field first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// opcode(6) rs(5) rt(5) rd(5), low 11 bits zero. Args: `rd rs rt`
    Register,
    /// opcode(6) zero(5) rt(5) rd(5) shamt(5), low 6 bits zero. Args: `rd rt shamt`
    Shift,
    /// opcode(6) rs(5), low 21 bits zero. Args: `rs`
    JumpReg,
    /// opcode(6) rs(5) rt(5) imm(16). Args: `rt rs imm`
    Imm,
    /// opcode(6) zero(5) rt(5) imm(16). Args: `rt imm`
    UpperImm,
    /// opcode(6) base(5) rt(5) offset(16). Args: `rt offset base`
    Mem,
    /// opcode(6) rs(5) rt(5) target(16). Args: `rt rs label`
    Branch,
    /// opcode(6) target(26). Args: `label`
    Jump,
}

impl Format {
    pub fn arity(&self) -> usize {
        use Format::*;
        match self {
            Register | Shift | Imm | Mem | Branch => 3,
            UpperImm => 2,
            JumpReg | Jump => 1,
        }
    }
}

#[test]
fn test() {
    assert_eq!(OpKind::parse("addu"), Ok(OpKind::ADDU));
    assert_eq!(OpKind::parse("jal"), Ok(OpKind::JAL));
    assert!(OpKind::parse("li").is_err());
    assert!(OpKind::parse("hoge").is_err());
    assert_eq!(OpKind::ADDU.opcode(), 0x21);
    assert_eq!(OpKind::SW.opcode(), OpKind::SLTU.opcode());
    assert_eq!(OpKind::LUI.format().arity(), 2);
    assert_eq!(OpKind::J.format().arity(), 1);
}
