//! The closed set of 12 jurisdictions this engine handles. Quebec is
//! deliberately absent: it runs QPP/QPIP through Revenu Québec, which is an
//! explicit non-goal (spec §1).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayrollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    AB,
    BC,
    MB,
    NB,
    NL,
    NS,
    NT,
    NU,
    ON,
    PE,
    SK,
    YT,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 12] = [
        Jurisdiction::AB,
        Jurisdiction::BC,
        Jurisdiction::MB,
        Jurisdiction::NB,
        Jurisdiction::NL,
        Jurisdiction::NS,
        Jurisdiction::NT,
        Jurisdiction::NU,
        Jurisdiction::ON,
        Jurisdiction::PE,
        Jurisdiction::SK,
        Jurisdiction::YT,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Jurisdiction::AB => "AB",
            Jurisdiction::BC => "BC",
            Jurisdiction::MB => "MB",
            Jurisdiction::NB => "NB",
            Jurisdiction::NL => "NL",
            Jurisdiction::NS => "NS",
            Jurisdiction::NT => "NT",
            Jurisdiction::NU => "NU",
            Jurisdiction::ON => "ON",
            Jurisdiction::PE => "PE",
            Jurisdiction::SK => "SK",
            Jurisdiction::YT => "YT",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "AB" => Ok(Jurisdiction::AB),
            "BC" => Ok(Jurisdiction::BC),
            "MB" => Ok(Jurisdiction::MB),
            "NB" => Ok(Jurisdiction::NB),
            "NL" => Ok(Jurisdiction::NL),
            "NS" => Ok(Jurisdiction::NS),
            "NT" => Ok(Jurisdiction::NT),
            "NU" => Ok(Jurisdiction::NU),
            "ON" => Ok(Jurisdiction::ON),
            "PE" => Ok(Jurisdiction::PE),
            "SK" => Ok(Jurisdiction::SK),
            "YT" => Ok(Jurisdiction::YT),
            _ => Err(PayrollError::UnsupportedJurisdiction { code: s.to_string() }),
        }
    }
}
