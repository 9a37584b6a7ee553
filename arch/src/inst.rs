use crate::op::OpKind;
use crate::reg::Reg;

use color_print::cformat;

/// A fully resolved instruction, one 32-bit word each.
///
/// Variant fields are in wire order, not source-operand order; the
/// assembler owns the source-order mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    ADDU(Reg, Reg, Reg), // rd, rs, rt
    OR(Reg, Reg, Reg),
    SLT(Reg, Reg, Reg),
    SLTU(Reg, Reg, Reg),
    SLL(Reg, Reg, u8), // rd, rt, shamt
    JR(Reg),
    ADDIU(Reg, Reg, u16), // rt, rs, imm
    ORI(Reg, Reg, u16),
    LUI(Reg, u16),
    LB(Reg, Reg, u16), // rt, base, offset
    LBU(Reg, Reg, u16),
    LW(Reg, Reg, u16),
    SB(Reg, Reg, u16),
    SW(Reg, Reg, u16),
    BEQ(Reg, Reg, u16), // rs, rt, target
    BNE(Reg, Reg, u16),
    J(u32),
    JAL(u32),
}

// ----------------------------------------------------------------------------

fn enc_register(op: u8, rs: Reg, rt: Reg, rd: Reg) -> u32 {
    ((op as u32) << 26) | (rs.num() << 21) | (rt.num() << 16) | (rd.num() << 11)
}

fn enc_shift(op: u8, rt: Reg, rd: Reg, shamt: u8) -> u32 {
    ((op as u32) << 26) | (rt.num() << 16) | (rd.num() << 11) | ((shamt as u32) << 6)
}

fn enc_imm(op: u8, rs: Reg, rt: Reg, imm: u16) -> u32 {
    ((op as u32) << 26) | (rs.num() << 21) | (rt.num() << 16) | (imm as u32)
}

fn enc_jump(op: u8, target: u32) -> u32 {
    ((op as u32) << 26) | (target & 0x03FF_FFFF)
}

// ----------------------------------------------------------------------------

impl Inst {
    pub fn kind(&self) -> OpKind {
        match self {
            Inst::ADDU(..) => OpKind::ADDU,
            Inst::OR(..) => OpKind::OR,
            Inst::SLT(..) => OpKind::SLT,
            Inst::SLTU(..) => OpKind::SLTU,
            Inst::SLL(..) => OpKind::SLL,
            Inst::JR(..) => OpKind::JR,
            Inst::ADDIU(..) => OpKind::ADDIU,
            Inst::ORI(..) => OpKind::ORI,
            Inst::LUI(..) => OpKind::LUI,
            Inst::LB(..) => OpKind::LB,
            Inst::LBU(..) => OpKind::LBU,
            Inst::LW(..) => OpKind::LW,
            Inst::SB(..) => OpKind::SB,
            Inst::SW(..) => OpKind::SW,
            Inst::BEQ(..) => OpKind::BEQ,
            Inst::BNE(..) => OpKind::BNE,
            Inst::J(..) => OpKind::J,
            Inst::JAL(..) => OpKind::JAL,
        }
    }

    pub fn to_bin(&self) -> u32 {
        let op = self.kind().opcode();
        match *self {
            Inst::ADDU(rd, rs, rt)
            | Inst::OR(rd, rs, rt)
            | Inst::SLT(rd, rs, rt)
            | Inst::SLTU(rd, rs, rt) => enc_register(op, rs, rt, rd),
            Inst::SLL(rd, rt, shamt) => enc_shift(op, rt, rd, shamt),
            Inst::JR(rs) => enc_register(op, rs, Reg::ZERO, Reg::ZERO),
            Inst::ADDIU(rt, rs, imm) | Inst::ORI(rt, rs, imm) => enc_imm(op, rs, rt, imm),
            Inst::LUI(rt, imm) => enc_imm(op, Reg::ZERO, rt, imm),
            Inst::LB(rt, base, off)
            | Inst::LBU(rt, base, off)
            | Inst::LW(rt, base, off)
            | Inst::SB(rt, base, off)
            | Inst::SW(rt, base, off) => enc_imm(op, base, rt, off),
            Inst::BEQ(rs, rt, target) | Inst::BNE(rs, rt, target) => enc_imm(op, rs, rt, target),
            Inst::J(target) | Inst::JAL(target) => enc_jump(op, target),
        }
    }
}

// ----------------------------------------------------------------------------

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! rrr {
            ($name:expr, $a:expr, $b:expr, $c:expr) => {
                cformat!("<r>{:<6}</><b>{:<4} {:<4} {:<4}</>", $name, $a, $b, $c)
            };
        }

        macro_rules! rri {
            ($name:expr, $a:expr, $b:expr, $imm:expr) => {
                cformat!(
                    "<r>{:<6}</><b>{:<4} {:<4} <y>0x{:0>4X}</></>",
                    $name,
                    $a,
                    $b,
                    $imm
                )
            };
        }

        let name = self.kind().to_string();
        match *self {
            Inst::ADDU(rd, rs, rt)
            | Inst::OR(rd, rs, rt)
            | Inst::SLT(rd, rs, rt)
            | Inst::SLTU(rd, rs, rt) => rrr!(name, rd, rs, rt),
            Inst::SLL(rd, rt, shamt) => rri!(name, rd, rt, shamt),
            Inst::JR(rs) => rrr!(name, rs, "", ""),
            Inst::ADDIU(rt, rs, imm) | Inst::ORI(rt, rs, imm) => rri!(name, rt, rs, imm),
            Inst::LUI(rt, imm) => rri!(name, rt, "", imm),
            Inst::LB(rt, base, off)
            | Inst::LBU(rt, base, off)
            | Inst::LW(rt, base, off)
            | Inst::SB(rt, base, off)
            | Inst::SW(rt, base, off) => rri!(name, rt, base, off),
            Inst::BEQ(rs, rt, target) | Inst::BNE(rs, rt, target) => rri!(name, rs, rt, target),
            Inst::J(target) | Inst::JAL(target) => {
                cformat!("<r>{:<6}</><y>0x{:0>7X}</>", name, target)
            }
        }
    }
}

// ----------------------------------------------------------------------------

macro_rules! test_enc {
    ($name:ident, $inst:expr, $bin:expr) => {
        #[test]
        fn $name() {
            let inst = $inst;
            let bin = inst.to_bin();
            println!("{:?} -> {:0>8X}", inst, bin);
            assert_eq!(bin, $bin, "inst: {:?}, bin: {:0>8X}", inst, bin);
        }
    };
}

test_enc!(test_addu, Inst::ADDU(Reg::T2, Reg::T0, Reg::T1), 0x8509_5000);
test_enc!(test_or, Inst::OR(Reg::V0, Reg::A0, Reg::A1), 0x9485_1000);
test_enc!(test_slt, Inst::SLT(Reg::AT, Reg::T0, Reg::T1), 0xA909_0800);
test_enc!(test_sltu, Inst::SLTU(Reg::AT, Reg::T0, Reg::T1), 0xAD09_0800);
test_enc!(test_sll, Inst::SLL(Reg::T0, Reg::T0, 3), 0x0008_40C0);
test_enc!(test_jr, Inst::JR(Reg::RA), 0x23E0_0000);
test_enc!(test_addiu, Inst::ADDIU(Reg::T0, Reg::ZERO, 5), 0x2408_0005);
test_enc!(test_ori, Inst::ORI(Reg::T0, Reg::T0, 0x86A0), 0x3508_86A0);
test_enc!(test_lui, Inst::LUI(Reg::T0, 1), 0x3C08_0001);
test_enc!(test_lb, Inst::LB(Reg::A0, Reg::SP, 3), 0x83A4_0003);
test_enc!(test_lbu, Inst::LBU(Reg::A0, Reg::SP, 3), 0x93A4_0003);
test_enc!(test_lw, Inst::LW(Reg::A0, Reg::SP, 8), 0x8FA4_0008);
test_enc!(test_sb, Inst::SB(Reg::A0, Reg::SP, 3), 0xA3A4_0003);
test_enc!(test_sw, Inst::SW(Reg::A0, Reg::SP, 4), 0xAFA4_0004);
test_enc!(test_beq, Inst::BEQ(Reg::T0, Reg::T1, 8), 0x1109_0008);
test_enc!(test_bne, Inst::BNE(Reg::ZERO, Reg::AT, 0x18), 0x1401_0018);
test_enc!(test_j, Inst::J(4), 0x0800_0004);
test_enc!(test_jal, Inst::JAL(4), 0x0C00_0004);

#[test]
fn test_register_fields_roundtrip() {
    let bin = Inst::ADDU(Reg::T2, Reg::T0, Reg::T1).to_bin();
    assert_eq!((bin >> 26) & 0x3F, 0x21);
    assert_eq!((bin >> 21) & 0x1F, Reg::T0.num());
    assert_eq!((bin >> 16) & 0x1F, Reg::T1.num());
    assert_eq!((bin >> 11) & 0x1F, Reg::T2.num());
    assert_eq!(bin & 0x7FF, 0);
}
