//! Temperature display units and conversion.

/// The unit samples are stored and displayed in.
///
/// The unit is a property of the whole window: when it changes, every
/// already-stored sample is rewritten in place (see
/// [`SampleBuffer::convert_units`](crate::SampleBuffer::convert_units)),
/// so the window never mixes units.
///
/// # Example
///
/// ```
/// use stream_temp::DisplayUnit;
///
/// let f = DisplayUnit::Celsius.convert_to(DisplayUnit::Fahrenheit, 100.0);
/// assert_eq!(f, 212.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayUnit {
    /// Degrees Fahrenheit. The default display unit.
    #[default]
    Fahrenheit,
    /// Degrees Celsius. The unit the source device reports in.
    Celsius,
}

impl DisplayUnit {
    /// Converts `value` from this unit into `target`.
    ///
    /// Returns `value` unchanged when the units are equal. The formulas
    /// are fixed: `f = c * 1.8 + 32` and `c = (f - 32) / 1.8`. Round
    /// trips are numerically close but not bit-identical, since the
    /// conversion operates on already-rounded stored values.
    #[must_use]
    pub fn convert_to(self, target: DisplayUnit, value: f64) -> f64 {
        match (self, target) {
            (DisplayUnit::Celsius, DisplayUnit::Fahrenheit) => value * 1.8 + 32.0,
            (DisplayUnit::Fahrenheit, DisplayUnit::Celsius) => (value - 32.0) / 1.8,
            _ => value,
        }
    }

    /// Returns the unit symbol for labeling ("°F" or "°C").
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            DisplayUnit::Fahrenheit => "°F",
            DisplayUnit::Celsius => "°C",
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fahrenheit() {
        assert_eq!(DisplayUnit::default(), DisplayUnit::Fahrenheit);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let f = DisplayUnit::Celsius.convert_to(DisplayUnit::Fahrenheit, 0.0);
        assert_eq!(f, 32.0);
        let f = DisplayUnit::Celsius.convert_to(DisplayUnit::Fahrenheit, 100.0);
        assert_eq!(f, 212.0);
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        let c = DisplayUnit::Fahrenheit.convert_to(DisplayUnit::Celsius, 32.0);
        assert_eq!(c, 0.0);
        let c = DisplayUnit::Fahrenheit.convert_to(DisplayUnit::Celsius, 212.0);
        assert_eq!(c, 100.0);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let v = DisplayUnit::Celsius.convert_to(DisplayUnit::Celsius, 36.6);
        assert_eq!(v, 36.6);
        let v = DisplayUnit::Fahrenheit.convert_to(DisplayUnit::Fahrenheit, 98.6);
        assert_eq!(v, 98.6);
    }

    #[test]
    fn test_round_trip_tolerance() {
        for i in -500..1500 {
            let f = f64::from(i) / 10.0;
            let c = DisplayUnit::Fahrenheit.convert_to(DisplayUnit::Celsius, f);
            let back = DisplayUnit::Celsius.convert_to(DisplayUnit::Fahrenheit, c);
            let tolerance = 1e-9 * f.abs().max(1.0);
            assert!((back - f).abs() <= tolerance, "{f} round-tripped to {back}");
        }
    }

    #[test]
    fn test_symbol() {
        assert_eq!(DisplayUnit::Fahrenheit.symbol(), "°F");
        assert_eq!(DisplayUnit::Celsius.to_string(), "°C");
    }
}
