use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
    Eq,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Reg {
    #[default]
    ZERO,
    AT,
    V0,
    V1,
    A0,
    A1,
    A2,
    A3,
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    T8,
    T9,
    K0,
    K1,
    GP,
    SP,
    FP,
    RA,
}

impl Reg {
    /// Accepts both name form (`$t0`) and number form (`$8`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let name = match s.strip_prefix('$') {
            Some(name) => name,
            None => return Err(format!("Unknown reg name: {s}")),
        };
        if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
            let n = name
                .parse::<u8>()
                .map_err(|_| format!("Reg number out of range: {s}"))?;
            return Self::try_from(n).map_err(|_| format!("Reg number out of range: {s}"));
        }
        match name.to_ascii_lowercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    /// Register number as an encoding field value.
    pub fn num(self) -> u32 {
        u8::from(self) as u32
    }
}

#[test]
fn test() {
    assert_eq!(Reg::parse("$t0"), Ok(Reg::T0));
    assert_eq!(Reg::parse("$8"), Ok(Reg::T0));
    assert_eq!(Reg::parse("$zero"), Ok(Reg::ZERO));
    assert_eq!(Reg::parse("$31"), Ok(Reg::RA));
    assert_eq!(Reg::RA.num(), 31);
    assert_eq!(Reg::SP.num(), 29);
    assert!(Reg::parse("t0").is_err());
    assert!(Reg::parse("$32").is_err());
    assert!(Reg::parse("$hoge").is_err());
}
