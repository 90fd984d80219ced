//! Object identifiers as used by the RMI runtime.
//!
//! An `ObjId` pairs an object number with the `Uid` of the address space that
//! exported it. Well-known objects (registry, activator, DGC) live in the
//! zero address space.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an exporting address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Uid {
    pub unique: i32,
    pub time: i64,
    pub count: i16,
}

impl Uid {
    pub const ZERO: Uid = Uid {
        unique: 0,
        time: 0,
        count: 0,
    };

    /// Creation time encoded in the uid (milliseconds since the epoch)
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time).single()
    }
}

fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    }
}

fn parse_signed_hex(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let magnitude =
        u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{raw}': {e}"))?;
    let magnitude = i128::from(magnitude);
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| format!("hex value '{raw}' out of range"))
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            signed_hex(i64::from(self.unique)),
            signed_hex(self.time),
            signed_hex(i64::from(self.count))
        )
    }
}

impl FromStr for Uid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(format!("uid '{s}' must have the form unique:time:count"));
        }

        let unique = parse_signed_hex(parts[0])?;
        let time = parse_signed_hex(parts[1])?;
        let count = parse_signed_hex(parts[2])?;

        Ok(Uid {
            unique: i32::try_from(unique).map_err(|_| format!("unique '{}' out of range", parts[0]))?,
            time,
            count: i16::try_from(count).map_err(|_| format!("count '{}' out of range", parts[2]))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjId {
    pub obj_num: i64,
    pub space: Uid,
}

impl ObjId {
    pub const REGISTRY: ObjId = ObjId::well_known(0);
    pub const ACTIVATOR: ObjId = ObjId::well_known(1);
    pub const DGC: ObjId = ObjId::well_known(2);

    pub const fn well_known(obj_num: i64) -> Self {
        ObjId {
            obj_num,
            space: Uid::ZERO,
        }
    }

    pub fn is_well_known(&self) -> bool {
        self.space == Uid::ZERO
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.space, self.obj_num)
    }
}

/// Accepts either a plain object number (well-known space) or the bracketed
/// `[unique:time:count, objnum]` form produced by `Display`.
impl FromStr for ObjId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(obj_num) = trimmed.parse::<i64>() {
            return Ok(ObjId::well_known(obj_num));
        }

        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| format!("ObjID '{s}' must be a number or [uid, objnum]"))?;

        let (uid, obj_num) = inner
            .split_once(',')
            .ok_or_else(|| format!("ObjID '{s}' is missing the object number"))?;

        let obj_num = obj_num
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid object number in '{s}': {e}"))?;

        Ok(ObjId {
            obj_num,
            space: uid.trim().parse()?,
        })
    }
}
