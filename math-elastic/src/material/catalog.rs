//! Named real materials and reverse lookup

use super::Material;
use crate::constants::{CATALOG_ATOL, CATALOG_RTOL};
use crate::error::{ElasticError, Result};
use crate::stiffness::StiffnessMatrix;
use crate::symmetry::SymmetryClass;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Named material of the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    /// Display name, chemical formula first
    pub name: &'static str,
    /// Constants and density
    pub material: Material,
}

impl CatalogEntry {
    fn cubic(name: &'static str, density: f64, c11: f64, c12: f64, c44: f64) -> Self {
        Self {
            name,
            material: Material::cubic(density, c11, c12, c44),
        }
    }

    fn hexagonal(
        name: &'static str,
        density: f64,
        [c11, c12, c13, c33, c44]: [f64; 5],
    ) -> Self {
        Self {
            name,
            material: Material::hexagonal(density, c11, c12, c13, c33, c44),
        }
    }
}

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
    use CatalogEntry as E;
    vec![
        E::cubic("Ag (plata)", 10490.0, 124.0, 93.4, 46.1),
        E::cubic("Al (aluminio)", 2700.0, 108.2, 61.3, 28.5),
        E::cubic("Au (oro)", 19300.0, 186.0, 157.0, 42.0),
        E::cubic("Cu (cobre)", 8940.0, 168.4, 121.4, 75.4),
        E::cubic("Ir (iridio)", 22560.0, 580.0, 242.0, 256.0),
        E::cubic("Ni (níquel)", 8900.0, 246.5, 147.3, 124.7),
        E::cubic("Pb (plomo)", 11340.0, 49.5, 42.3, 14.9),
        E::cubic("Pd (paladio)", 12023.0, 227.1, 176.0, 71.7),
        E::cubic("Pt (platino)", 21450.0, 346.7, 250.7, 76.5),
        E::cubic("Cr (cromo)", 7140.0, 339.8, 58.6, 99.0),
        E::cubic("Fe (hierro)", 7870.0, 228.0, 132.0, 116.5),
        E::cubic("K (potasio)", 856.0, 4.14, 2.21, 2.63),
        E::cubic("Li (litio)", 535.0, 13.5, 11.44, 8.78),
        E::cubic("Mo (molibdeno)", 10280.0, 459.0, 176.0, 110.0),
        E::cubic("Na (sodio)", 968.0, 7.32, 6.25, 4.19),
        E::cubic("NaCl (sal)", 2165.0, 48.7, 12.4, 12.6),
        E::cubic("Nb (niobio)", 857.0, 245.5, 139.0, 29.3),
        E::cubic("Ta (tantalio)", 16650.0, 267.0, 161.0, 82.5),
        E::cubic("V (vanadio)", 6110.0, 228.0, 119.0, 42.6),
        E::cubic("W (wolframio/tungsteno)", 19600.0, 501.0, 198.0, 151.4),
        E::hexagonal("C (grafito)", 2100.0, [1160.0, 290.0, 109.0, 46.6, 2.3]),
        E::cubic("C (diamante)", 3515.0, 1076.0, 125.0, 575.8),
        E::cubic("Ge (germanio)", 5323.0, 128.9, 48.3, 67.1),
        E::cubic("Si (silicio)", 2336.0, 165.7, 63.9, 79.6),
        E::cubic("GaAs (arseniuro de galio)", 5317.0, 118.8, 53.7, 59.4),
        E::cubic("GaP (fosfuro de galio)", 4138.0, 141.2, 62.5, 70.5),
        E::cubic("InP (fosfuro de indio)", 4810.0, 102.2, 57.6, 46.0),
        E::cubic("KCl (cloruro de potasio)", 1987.0, 39.5, 4.9, 6.3),
        E::cubic("LiF (fluoruro de litio)", 2640.0, 111.2, 42.0, 62.8),
        E::cubic("MgO (óxido de magnesio)", 3580.0, 289.2, 88.0, 154.6),
        E::hexagonal("Ti (titanio)", 4507.0, [162.4, 92.0, 69.0, 180.7, 46.7]),
        E::cubic("TiC (carburo de titanio)", 4920.0, 500.0, 113.0, 175.0),
        E::hexagonal("Be (berilio)", 1848.0, [292.3, 26.7, 14.0, 336.4, 162.5]),
        E::hexagonal("Cd (cadmio)", 8650.0, [115.8, 39.8, 40.6, 51.4, 20.4]),
        E::hexagonal("Co (cobalto)", 8900.0, [307.1, 165.0, 102.7, 358.1, 78.3]),
        E::hexagonal("Hf (hafnio)", 13310.0, [181.1, 77.2, 66.1, 196.9, 55.7]),
        E::hexagonal("Mg (magnesio)", 1738.0, [59.7, 26.2, 21.7, 61.7, 16.4]),
        E::hexagonal("Re (renio)", 21020.0, [612.5, 270.0, 206.0, 682.7, 162.5]),
        E::hexagonal("Zn (zinc)", 7140.0, [161.0, 34.2, 50.1, 61.0, 38.3]),
        E::hexagonal("ZnO (óxido de zinc)", 5606.0, [209.7, 121.1, 105.1, 210.9, 42.5]),
        E::hexagonal("Zr (zirconio)", 6501.0, [143.4, 72.8, 65.3, 164.8, 32.0]),
    ]
});

/// All catalog entries in table order
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Entry with exactly this name
pub fn find(name: &str) -> Result<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| ElasticError::UnknownMaterial(name.to_string()))
}

/// First entry matching the matrix and density.
///
/// The matrix matches when every entry satisfies
/// `|a - b| <= 1e-8 + 1e-5·|b|` with `b` taken from `stiffness`; the density
/// must be exactly equal.
pub fn classify(stiffness: &StiffnessMatrix, density: f64) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| {
        entry.material.density() == density
            && entry
                .material
                .stiffness()
                .all_close(stiffness, CATALOG_RTOL, CATALOG_ATOL)
    })
}

/// Catalog names grouped by detected symmetry class
pub fn by_symmetry() -> BTreeMap<SymmetryClass, Vec<&'static str>> {
    let mut groups: BTreeMap<SymmetryClass, Vec<&'static str>> = BTreeMap::new();
    for entry in CATALOG.iter() {
        groups
            .entry(entry.material.stiffness().detect())
            .or_default()
            .push(entry.name);
    }
    groups
}
