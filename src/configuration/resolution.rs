//! Resolution and quality tier tables.
//!
//! Cameras are asked for a concrete pixel size; users pick either a named
//! tier, an explicit width, or an explicit height. The three inputs are
//! mutually exclusive (enforced at the CLI layer). Explicit dimensions assume
//! a 4:3 sensor and derive the missing side in floating point, unrounded.

use serde::{Deserialize, Serialize};

use crate::error_handling::types::ConfigError;

/// Concrete snapshot dimensions requested from a camera.
///
/// Sides are `f64` because a user-supplied width or height derives the other
/// side as `w * 3/4` / `h * 4/3` without rounding. Whole numbers display
/// without a fractional part, so URLs built from tier values stay integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: f64,
    pub height: f64,
}

impl Resolution {
    pub const DEFAULT: Resolution = Resolution { width: 1856.0, height: 1392.0 };
}

/// Named quality/resolution tiers shared by both policies.
///
/// Full names are case-insensitive. Single-letter aliases are `l`, `m`, `h`
/// and `M`; `m`/`M` is the one case-significant pair since both medium and
/// max shorten to the same letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Low,
    Medium,
    High,
    Max,
}

impl Tier {
    fn parse(s: &str) -> Option<Tier> {
        match s {
            "m" => return Some(Tier::Medium),
            "M" => return Some(Tier::Max),
            "l" | "L" => return Some(Tier::Low),
            "h" | "H" => return Some(Tier::High),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Tier::Low),
            "medium" => Some(Tier::Medium),
            "high" => Some(Tier::High),
            "max" => Some(Tier::Max),
            _ => None,
        }
    }
}

/// Maps the user's resolution selection to concrete pixel dimensions.
pub struct ResolutionPolicy;

impl ResolutionPolicy {
    /// Resolve tier / explicit width / explicit height into a `Resolution`.
    ///
    /// With no selection at all the medium tier (1856x1392) applies. An
    /// unrecognized tier string is a fatal configuration error.
    pub fn resolve(
        tier: Option<&str>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Resolution, ConfigError> {
        if let Some(s) = tier {
            return match Tier::parse(s) {
                Some(Tier::Low) => Ok(Resolution { width: 1600.0, height: 1200.0 }),
                Some(Tier::Medium) => Ok(Resolution { width: 1856.0, height: 1392.0 }),
                Some(Tier::High) => Ok(Resolution { width: 2048.0, height: 1536.0 }),
                Some(Tier::Max) => Ok(Resolution { width: 2560.0, height: 1920.0 }),
                None => Err(ConfigError::InvalidResolution(s.to_string())),
            };
        }
        if let Some(w) = width {
            let w = w as f64;
            return Ok(Resolution { width: w, height: w * 3.0 / 4.0 });
        }
        if let Some(h) = height {
            let h = h as f64;
            return Ok(Resolution { width: h * 4.0 / 3.0, height: h });
        }
        Ok(Resolution::DEFAULT)
    }
}

/// Maps the user's quality selection to a JPEG quality value (0-100).
pub struct QualityPolicy;

impl QualityPolicy {
    /// Default quality when optimization is requested without `--quality`.
    pub const DEFAULT: u8 = 40;

    pub fn resolve(quality: Option<&str>) -> Result<u8, ConfigError> {
        let s = match quality {
            Some(s) => s,
            None => return Ok(Self::DEFAULT),
        };
        if let Some(tier) = Tier::parse(s) {
            return Ok(match tier {
                Tier::Low => 25,
                Tier::Medium => 50,
                Tier::High => 75,
                Tier::Max => 100,
            });
        }
        match s.parse::<u8>() {
            Ok(q) if q <= 100 => Ok(q),
            _ => Err(ConfigError::InvalidQuality(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        let cases = [
            ("low", (1600.0, 1200.0)),
            ("medium", (1856.0, 1392.0)),
            ("high", (2048.0, 1536.0)),
            ("max", (2560.0, 1920.0)),
            ("LOW", (1600.0, 1200.0)),
            ("Max", (2560.0, 1920.0)),
            ("l", (1600.0, 1200.0)),
            ("m", (1856.0, 1392.0)),
            ("h", (2048.0, 1536.0)),
            ("M", (2560.0, 1920.0)),
        ];
        for (tier, (w, h)) in cases {
            let res = ResolutionPolicy::resolve(Some(tier), None, None).unwrap();
            assert_eq!(res, Resolution { width: w, height: h }, "tier {}", tier);
        }
    }

    #[test]
    fn test_invalid_tier_is_fatal() {
        assert!(matches!(
            ResolutionPolicy::resolve(Some("ultra"), None, None),
            Err(ConfigError::InvalidResolution(_))
        ));
    }

    #[test]
    fn test_explicit_width_derives_height() {
        let res = ResolutionPolicy::resolve(None, Some(1000), None).unwrap();
        assert_eq!(res.width, 1000.0);
        assert_eq!(res.height, 750.0);

        // Unrounded: 4:3 of an odd width keeps the fraction
        let res = ResolutionPolicy::resolve(None, Some(1001), None).unwrap();
        assert_eq!(res.height, 1001.0 * 3.0 / 4.0);
    }

    #[test]
    fn test_explicit_height_derives_width() {
        let res = ResolutionPolicy::resolve(None, None, Some(900)).unwrap();
        assert_eq!(res.width, 1200.0);
        assert_eq!(res.height, 900.0);
    }

    #[test]
    fn test_no_selection_defaults_to_medium() {
        let res = ResolutionPolicy::resolve(None, None, None).unwrap();
        assert_eq!(res, Resolution::DEFAULT);
    }

    #[test]
    fn test_quality_tiers() {
        assert_eq!(QualityPolicy::resolve(Some("low")).unwrap(), 25);
        assert_eq!(QualityPolicy::resolve(Some("medium")).unwrap(), 50);
        assert_eq!(QualityPolicy::resolve(Some("high")).unwrap(), 75);
        assert_eq!(QualityPolicy::resolve(Some("max")).unwrap(), 100);
        assert_eq!(QualityPolicy::resolve(Some("m")).unwrap(), 50);
        assert_eq!(QualityPolicy::resolve(Some("M")).unwrap(), 100);
    }

    #[test]
    fn test_quality_numeric() {
        assert_eq!(QualityPolicy::resolve(Some("0")).unwrap(), 0);
        assert_eq!(QualityPolicy::resolve(Some("62")).unwrap(), 62);
        assert_eq!(QualityPolicy::resolve(Some("100")).unwrap(), 100);
    }

    #[test]
    fn test_quality_invalid() {
        assert!(matches!(
            QualityPolicy::resolve(Some("101")),
            Err(ConfigError::InvalidQuality(_))
        ));
        assert!(matches!(
            QualityPolicy::resolve(Some("best")),
            Err(ConfigError::InvalidQuality(_))
        ));
        assert!(matches!(
            QualityPolicy::resolve(Some("-1")),
            Err(ConfigError::InvalidQuality(_))
        ));
    }

    #[test]
    fn test_quality_default_without_selection() {
        assert_eq!(QualityPolicy::resolve(None).unwrap(), 40);
    }
}
