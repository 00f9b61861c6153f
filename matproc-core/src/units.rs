//! Conversion between free-form `Measurement` unit strings and typed SI quantities.

use matproc_schemas::measurement::Measurement;
use thiserror::Error;
use uom::si::{
    f64::{
        AmountOfSubstance as UomAmountOfSubstance, Mass as UomMass,
        MassDensity as UomMassDensity, MolarConcentration as UomMolarConcentration,
        MolarMass as UomMolarMass, Time as UomTime, Volume as UomVolume,
    },
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    molar_concentration::mole_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    time::second,
    volume::cubic_meter,
};

pub type Volume = UomVolume;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type MolarMass = UomMolarMass;
pub type Amount = UomAmountOfSubstance;
pub type Concentration = UomMolarConcentration;
pub type Time = UomTime;

/// Units written back by the normalizers.
pub const VOLUME_UNIT: &str = "L";
pub const MASS_UNIT: &str = "kg";
pub const DENSITY_UNIT: &str = "kg/L";
pub const CONCENTRATION_UNIT: &str = "mol/L";

const LITER: f64 = 1e-3;

// Factors to the SI base unit of each quantity.
const VOLUME_UNITS: &[(&str, f64)] = &[
    ("m^3", 1.0),
    ("dm^3", 1e-3),
    ("cm^3", 1e-6),
    ("mm^3", 1e-9),
    ("L", LITER),
    ("l", LITER),
    ("liter", LITER),
    ("mL", 1e-6),
    ("ml", 1e-6),
    ("milliliter", 1e-6),
    ("uL", 1e-9),
    ("ul", 1e-9),
    ("microliter", 1e-9),
];

const MASS_UNITS: &[(&str, f64)] = &[
    ("kg", 1.0),
    ("kilogram", 1.0),
    ("g", 1e-3),
    ("gram", 1e-3),
    ("mg", 1e-6),
    ("milligram", 1e-6),
    ("ug", 1e-9),
    ("microgram", 1e-9),
];

const DENSITY_UNITS: &[(&str, f64)] = &[
    ("kg/m^3", 1.0),
    ("kg/L", 1e3),
    ("kg/l", 1e3),
    ("g/mL", 1e3),
    ("g/ml", 1e3),
    ("g/cm^3", 1e3),
    ("g/L", 1.0),
    ("g/l", 1.0),
    ("mg/mL", 1.0),
    ("mg/ml", 1.0),
];

const TIME_UNITS: &[(&str, f64)] = &[
    ("s", 1.0),
    ("second", 1.0),
    ("ms", 1e-3),
    ("min", 60.0),
    ("minute", 60.0),
    ("h", 3600.0),
    ("hour", 3600.0),
    ("d", 86_400.0),
    ("day", 86_400.0),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {quantity} unit '{unit}'")]
pub struct UnitError {
    pub quantity: &'static str,
    pub unit: String,
}

fn to_base(
    measurement: &Measurement,
    table: &[(&str, f64)],
    quantity: &'static str,
) -> Result<f64, UnitError> {
    let unit = measurement.unit.trim().replace(['µ', 'μ'], "u");
    table
        .iter()
        .find(|(symbol, _)| *symbol == unit)
        .map(|(_, factor)| measurement.value * factor)
        .ok_or_else(|| UnitError {
            quantity,
            unit: measurement.unit.clone(),
        })
}

pub fn volume(measurement: &Measurement) -> Result<Volume, UnitError> {
    to_base(measurement, VOLUME_UNITS, "volume").map(Volume::new::<cubic_meter>)
}

pub fn mass(measurement: &Measurement) -> Result<Mass, UnitError> {
    to_base(measurement, MASS_UNITS, "mass").map(Mass::new::<kilogram>)
}

pub fn density(measurement: &Measurement) -> Result<Density, UnitError> {
    to_base(measurement, DENSITY_UNITS, "density").map(Density::new::<kilogram_per_cubic_meter>)
}

pub fn time(measurement: &Measurement) -> Result<Time, UnitError> {
    to_base(measurement, TIME_UNITS, "time").map(Time::new::<second>)
}

/// Molar mass of a substance given its molecular mass in daltons (numerically g/mol).
#[inline]
pub fn molar_mass_from_daltons(daltons: f64) -> MolarMass {
    MolarMass::new::<kilogram_per_mole>(daltons * 1e-3)
}

#[inline]
pub fn liters(value: f64) -> Volume {
    Volume::new::<cubic_meter>(value * LITER)
}

#[inline]
pub fn kilograms(value: f64) -> Mass {
    Mass::new::<kilogram>(value)
}

pub fn volume_measurement(volume: Volume) -> Measurement {
    Measurement::new(volume.get::<cubic_meter>() / LITER, VOLUME_UNIT)
}

pub fn mass_measurement(mass: Mass) -> Measurement {
    Measurement::new(mass.get::<kilogram>(), MASS_UNIT)
}

pub fn density_measurement(density: Density) -> Measurement {
    Measurement::new(density.get::<kilogram_per_cubic_meter>() * LITER, DENSITY_UNIT)
}

pub fn concentration_measurement(concentration: Concentration) -> Measurement {
    Measurement::new(
        concentration.get::<mole_per_cubic_meter>() * LITER,
        CONCENTRATION_UNIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn volume_units_convert_to_liters() {
        let v = volume(&Measurement::new(250.0, "mL")).unwrap();
        assert!(close(volume_measurement(v).value, 0.25));
        let v = volume(&Measurement::new(3.0, "µL")).unwrap();
        assert!(close(volume_measurement(v).value, 3e-6));
    }

    #[test]
    fn density_round_trips_through_kg_per_liter() {
        let d = density(&Measurement::new(1.0, "g/mL")).unwrap();
        let m = density_measurement(d);
        assert_eq!(m.unit, DENSITY_UNIT);
        assert!(close(m.value, 1.0));
    }

    #[test]
    fn volume_times_density_is_a_mass() {
        let v = volume(&Measurement::new(1.0, "L")).unwrap();
        let d = density(&Measurement::new(1.0, "kg/L")).unwrap();
        let m: Mass = v * d;
        assert!(close(mass_measurement(m).value, 1.0));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = mass(&Measurement::new(1.0, "stone")).unwrap_err();
        assert_eq!(err.quantity, "mass");
        assert_eq!(err.unit, "stone");
    }

    #[test]
    fn duration_in_minutes() {
        let t = time(&Measurement::new(2.0, "min")).unwrap();
        assert!(close(t.get::<second>(), 120.0));
    }
}
