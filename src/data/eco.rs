//! Static datasets for the eco-insights page.
//!
//! These mirror the sample datasets shipped with the web dashboard. They are
//! deliberately compiled in rather than fetched: the page renders the same
//! with or without a backend, and the numbers only change with a release.

/// Per-km CO₂ emissions for one transport mode (g CO₂ / km / person).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionRow {
    pub mode: &'static str,
    pub co2: u64,
}

/// Modal share of CBD travel for one year, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalShareRow {
    pub year: &'static str,
    pub walk: f64,
    pub bike: f64,
    pub tram: f64,
    pub train: f64,
    pub bus: f64,
    pub car: f64,
}

pub const EMISSION_PER_KM: &[EmissionRow] = &[
    EmissionRow { mode: "Walking", co2: 0 },
    EmissionRow { mode: "Cycling", co2: 0 },
    EmissionRow { mode: "Tram", co2: 40 },
    EmissionRow { mode: "Train", co2: 25 },
    EmissionRow { mode: "Bus", co2: 75 },
    EmissionRow { mode: "Car (Solo)", co2: 180 },
    EmissionRow { mode: "Car (Shared)", co2: 95 },
];

pub const MODAL_SHARE: &[ModalShareRow] = &[
    ModalShareRow { year: "2014", walk: 8.0, bike: 3.0, tram: 18.0, train: 22.0, bus: 14.0, car: 35.0 },
    ModalShareRow { year: "2016", walk: 9.0, bike: 4.0, tram: 19.0, train: 22.0, bus: 13.0, car: 33.0 },
    ModalShareRow { year: "2018", walk: 10.0, bike: 5.0, tram: 19.0, train: 23.0, bus: 12.0, car: 31.0 },
    ModalShareRow { year: "2020", walk: 11.0, bike: 6.0, tram: 18.0, train: 22.0, bus: 12.0, car: 31.0 },
    ModalShareRow { year: "2022", walk: 10.0, bike: 7.0, tram: 18.0, train: 23.0, bus: 12.0, car: 30.0 },
    ModalShareRow { year: "2024", walk: 11.0, bike: 8.0, tram: 18.0, train: 24.0, bus: 12.0, car: 27.0 },
];

/// The modal-share series in legend order: (name, accessor).
pub const MODAL_SHARE_SERIES: &[(&str, fn(&ModalShareRow) -> f64)] = &[
    ("Walking", |r| r.walk),
    ("Cycling", |r| r.bike),
    ("Tram", |r| r.tram),
    ("Train", |r| r.train),
    ("Bus", |r| r.bus),
    ("Car", |r| r.car),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_modes_emit_nothing() {
        for row in EMISSION_PER_KM {
            if row.mode == "Walking" || row.mode == "Cycling" {
                assert_eq!(row.co2, 0);
            }
        }
    }

    #[test]
    fn modal_share_covers_2014_to_2024() {
        assert_eq!(MODAL_SHARE.first().map(|r| r.year), Some("2014"));
        assert_eq!(MODAL_SHARE.last().map(|r| r.year), Some("2024"));
    }

    #[test]
    fn modal_share_rows_sum_to_a_full_split() {
        // Sample data: each year's shares add up to 100%.
        for row in MODAL_SHARE {
            let total: f64 = MODAL_SHARE_SERIES.iter().map(|(_, get)| get(row)).sum();
            assert!((total - 100.0).abs() < 1e-9, "year {}: {total}", row.year);
        }
    }
}
