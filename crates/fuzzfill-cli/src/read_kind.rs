use std::fmt;
use std::str::FromStr;

use fuzzfill::{FillError, TypeProvider};

/// One primitive read requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadKind {
    Byte,
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Usize,
    Isize,
    F32,
    F64,
    String,
    Bytes,
    FixedString(usize),
    NBytes(usize),
}

impl FromStr for ReadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((name, len)) = s.split_once(':') {
            let len: usize = len
                .parse()
                .map_err(|_| format!("invalid length in {s:?}"))?;
            return match name {
                "fstring" => Ok(Self::FixedString(len)),
                "nbytes" => Ok(Self::NBytes(len)),
                _ => Err(format!("{name:?} does not take a length")),
            };
        }

        Ok(match s {
            "byte" => Self::Byte,
            "bool" => Self::Bool,
            "u8" => Self::U8,
            "i8" => Self::I8,
            "u16" => Self::U16,
            "i16" => Self::I16,
            "u32" => Self::U32,
            "i32" => Self::I32,
            "u64" => Self::U64,
            "i64" => Self::I64,
            "usize" => Self::Usize,
            "isize" => Self::Isize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            other => return Err(format!("unknown read kind {other:?}")),
        })
    }
}

impl fmt::Display for ReadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedString(n) => write!(f, "fstring:{n}"),
            Self::NBytes(n) => write!(f, "nbytes:{n}"),
            Self::Byte => f.write_str("byte"),
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::I8 => f.write_str("i8"),
            Self::U16 => f.write_str("u16"),
            Self::I16 => f.write_str("i16"),
            Self::U32 => f.write_str("u32"),
            Self::I32 => f.write_str("i32"),
            Self::U64 => f.write_str("u64"),
            Self::I64 => f.write_str("i64"),
            Self::Usize => f.write_str("usize"),
            Self::Isize => f.write_str("isize"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
        }
    }
}

impl ReadKind {
    /// Perform the read and render the value for display.
    pub fn read(self, provider: &mut TypeProvider<'_>) -> Result<String, FillError> {
        Ok(match self {
            Self::Byte => format!("{:#04x}", provider.get_byte()?),
            Self::Bool => provider.get_bool()?.to_string(),
            Self::U8 => provider.get_u8()?.to_string(),
            Self::I8 => provider.get_i8()?.to_string(),
            Self::U16 => provider.get_u16()?.to_string(),
            Self::I16 => provider.get_i16()?.to_string(),
            Self::U32 => provider.get_u32()?.to_string(),
            Self::I32 => provider.get_i32()?.to_string(),
            Self::U64 => provider.get_u64()?.to_string(),
            Self::I64 => provider.get_i64()?.to_string(),
            Self::Usize => provider.get_usize()?.to_string(),
            Self::Isize => provider.get_isize()?.to_string(),
            Self::F32 => format!("{:e}", provider.get_f32()?),
            Self::F64 => format!("{:e}", provider.get_f64()?),
            Self::String => format!("{:?}", provider.get_string()?),
            Self::FixedString(n) => format!("{:?}", provider.get_fixed_string(n)?),
            Self::Bytes => hex(provider.get_bytes()?),
            Self::NBytes(n) => hex(provider.get_n_bytes(n)?),
        })
    }
}

fn hex(bytes: &[u8]) -> String {
    use fmt::Write;

    let mut out = format!("[{}] ", bytes.len());
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
