//! Processor record type stored in the catalog.
//!
//! A [`Processor`] is a plain value: the store copies records in and hands
//! out shared references, never aliasing between slots.

use crate::error::{RecordError, Result};

/// Maximum number of characters in a model name.
///
/// Matches the 20-byte, NUL-terminated name field of the historical
/// catalog format.
pub const MAX_NAME_LEN: usize = 19;

/// A processor specification.
///
/// # Example
///
/// ```rust
/// use chiplist::record::Processor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cpu = Processor {
///     name: "Ryzen 5 5600X".to_string(),
///     cores: 6,
///     threads: 12,
///     node_nm: 7,
///     base_clock_ghz: 3.7,
///     boost_clock_ghz: 4.6,
///     tdp_watts: 65,
///     integrated_graphics: false,
/// };
/// cpu.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Processor {
    /// Model name, at most [`MAX_NAME_LEN`] characters on a single line.
    pub name: String,
    /// Physical core count.
    pub cores: u32,
    /// Hardware thread count.
    pub threads: u32,
    /// Process node size in nanometers.
    pub node_nm: u32,
    /// Base clock in GHz.
    pub base_clock_ghz: f64,
    /// Boost clock in GHz.
    pub boost_clock_ghz: f64,
    /// Thermal design power in watts.
    pub tdp_watts: u32,
    /// Whether the package ships with integrated graphics.
    pub integrated_graphics: bool,
}

impl Processor {
    /// Validates the record before it is written into a store.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the name is empty, too long or spans
    /// several lines, or if a clock is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RecordError::EmptyName.into());
        }

        if self.name.contains(['\n', '\r']) {
            return Err(RecordError::MultiLineName.into());
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(RecordError::NameTooLong {
                name: self.name.clone(),
                max: MAX_NAME_LEN,
            }
            .into());
        }

        check_clock("base clock", self.base_clock_ghz)?;
        check_clock("boost clock", self.boost_clock_ghz)?;

        Ok(())
    }

    /// Returns the single-character form of the integrated-graphics flag.
    pub fn graphics_flag(&self) -> char {
        if self.integrated_graphics { 'y' } else { 'n' }
    }
}

fn check_clock(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::InvalidClock { field, value }.into());
    }
    Ok(())
}

/// Parses the integrated-graphics flag from user or dump input.
///
/// Accepts `y`/`s` (yes, sim) and `n`, case-insensitive, with surrounding
/// whitespace ignored.
///
/// # Errors
///
/// Returns [`RecordError::InvalidGraphicsFlag`] for anything else.
pub fn parse_graphics_flag(input: &str) -> Result<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "s" => Ok(true),
        "n" => Ok(false),
        _ => Err(RecordError::InvalidGraphicsFlag {
            flag: input.trim().to_string(),
        }
        .into()),
    }
}
