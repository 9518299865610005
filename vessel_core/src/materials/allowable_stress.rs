//! Built-in allowable stress data (ASME Section II Part D, Table 1A)
//!
//! Maximum allowable stress values for Section VIII Division 1 at the
//! tabulated metal temperatures. The first and last points of each table
//! bound the temperature range the material may be used over; nothing is
//! extrapolated beyond them.

use super::{MaterialCategory, MaterialSpec};

/// (temperature °F, allowable stress psi)
type Points = &'static [(f64, f64)];

const SA_516_70: Points = &[
    (-20.0, 20_000.0),
    (100.0, 20_000.0),
    (200.0, 20_000.0),
    (300.0, 20_000.0),
    (400.0, 20_000.0),
    (500.0, 20_000.0),
    (600.0, 19_400.0),
    (650.0, 18_800.0),
    (700.0, 18_100.0),
    (750.0, 14_800.0),
    (800.0, 12_000.0),
    (850.0, 9_300.0),
    (900.0, 6_700.0),
    (950.0, 4_000.0),
    (1000.0, 2_500.0),
];

const SA_516_60: Points = &[
    (-20.0, 17_100.0),
    (100.0, 17_100.0),
    (200.0, 17_100.0),
    (300.0, 17_100.0),
    (400.0, 17_100.0),
    (500.0, 17_100.0),
    (600.0, 17_100.0),
    (650.0, 17_100.0),
    (700.0, 16_400.0),
    (750.0, 13_000.0),
    (800.0, 10_800.0),
    (850.0, 8_700.0),
    (900.0, 5_900.0),
    (950.0, 4_000.0),
    (1000.0, 2_500.0),
];

const SA_285_C: Points = &[
    (-20.0, 15_700.0),
    (100.0, 15_700.0),
    (200.0, 15_700.0),
    (300.0, 15_700.0),
    (400.0, 15_700.0),
    (500.0, 15_700.0),
    (600.0, 15_700.0),
    (650.0, 15_300.0),
    (700.0, 14_800.0),
    (750.0, 12_000.0),
    (800.0, 10_200.0),
    (850.0, 8_400.0),
    (900.0, 6_500.0),
];

const SA_612: Points = &[
    (-20.0, 20_000.0),
    (100.0, 20_000.0),
    (200.0, 20_000.0),
    (300.0, 20_000.0),
    (400.0, 20_000.0),
    (500.0, 20_000.0),
    (600.0, 20_000.0),
    (650.0, 20_000.0),
];

const SA_106_B: Points = &[
    (-20.0, 17_100.0),
    (100.0, 17_100.0),
    (200.0, 17_100.0),
    (300.0, 17_100.0),
    (400.0, 17_100.0),
    (500.0, 17_100.0),
    (600.0, 17_100.0),
    (650.0, 17_100.0),
    (700.0, 15_600.0),
    (750.0, 13_000.0),
    (800.0, 10_800.0),
    (850.0, 8_700.0),
    (900.0, 5_900.0),
    (950.0, 4_000.0),
    (1000.0, 2_500.0),
];

const SA_105: Points = &[
    (-20.0, 20_000.0),
    (100.0, 20_000.0),
    (200.0, 20_000.0),
    (300.0, 20_000.0),
    (400.0, 20_000.0),
    (500.0, 20_000.0),
    (600.0, 19_400.0),
    (650.0, 18_800.0),
    (700.0, 18_100.0),
    (750.0, 14_800.0),
    (800.0, 12_000.0),
    (850.0, 9_300.0),
    (900.0, 6_700.0),
    (950.0, 4_000.0),
    (1000.0, 2_500.0),
];

const SA_240_304: Points = &[
    (-20.0, 20_000.0),
    (100.0, 20_000.0),
    (200.0, 16_700.0),
    (300.0, 15_000.0),
    (400.0, 13_800.0),
    (500.0, 12_900.0),
    (600.0, 12_300.0),
    (650.0, 12_000.0),
    (700.0, 11_700.0),
    (750.0, 11_500.0),
    (800.0, 11_200.0),
    (850.0, 11_000.0),
    (900.0, 10_800.0),
    (950.0, 10_600.0),
    (1000.0, 10_400.0),
];

const SA_240_304L: Points = &[
    (-20.0, 16_700.0),
    (100.0, 16_700.0),
    (200.0, 14_300.0),
    (300.0, 12_800.0),
    (400.0, 11_700.0),
    (500.0, 10_900.0),
    (600.0, 10_400.0),
    (650.0, 10_200.0),
    (700.0, 10_000.0),
    (750.0, 9_800.0),
    (800.0, 9_600.0),
];

const SA_240_316: Points = &[
    (-20.0, 20_000.0),
    (100.0, 20_000.0),
    (200.0, 17_300.0),
    (300.0, 15_600.0),
    (400.0, 14_300.0),
    (500.0, 13_300.0),
    (600.0, 12_600.0),
    (650.0, 12_300.0),
    (700.0, 12_100.0),
    (750.0, 11_900.0),
    (800.0, 11_800.0),
    (850.0, 11_600.0),
    (900.0, 11_500.0),
    (950.0, 11_400.0),
    (1000.0, 11_300.0),
];

const SA_240_316L: Points = &[
    (-20.0, 16_700.0),
    (100.0, 16_700.0),
    (200.0, 14_200.0),
    (300.0, 12_700.0),
    (400.0, 11_700.0),
    (500.0, 10_900.0),
    (600.0, 10_400.0),
    (650.0, 10_200.0),
    (700.0, 10_000.0),
    (750.0, 9_800.0),
    (800.0, 9_600.0),
    (850.0, 9_400.0),
];

fn spec(
    code: &str,
    aliases: &[&str],
    description: &str,
    category: MaterialCategory,
    min_tensile_psi: f64,
    min_yield_psi: f64,
    points: Points,
) -> MaterialSpec {
    MaterialSpec {
        code: code.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        description: description.to_string(),
        category,
        min_tensile_psi,
        min_yield_psi,
        min_temp_f: points.first().map(|p| p.0).unwrap_or(0.0),
        max_temp_f: points.last().map(|p| p.0).unwrap_or(0.0),
        stress_points: points.to_vec(),
    }
}

/// All materials shipped with the engine.
pub fn builtin_materials() -> Vec<MaterialSpec> {
    use MaterialCategory::*;

    vec![
        spec(
            "SA-516-70",
            &["SA-516 Gr. 70", "SA-516 Grade 70", "A516-70", "516-70"],
            "Carbon steel plate for moderate and lower temperature service",
            CarbonSteelPlate,
            70_000.0,
            38_000.0,
            SA_516_70,
        ),
        spec(
            "SA-516-60",
            &["SA-516 Gr. 60", "SA-516 Grade 60", "A516-60", "516-60"],
            "Carbon steel plate for moderate and lower temperature service",
            CarbonSteelPlate,
            60_000.0,
            32_000.0,
            SA_516_60,
        ),
        spec(
            "SA-515-70",
            &["SA-515 Gr. 70", "SA-515 Grade 70", "A515-70", "515-70"],
            "Carbon steel plate for intermediate and higher temperature service",
            CarbonSteelPlate,
            70_000.0,
            38_000.0,
            SA_516_70,
        ),
        spec(
            "SA-285-C",
            &["SA-285 Gr. C", "SA-285 Grade C", "A285-C", "285C"],
            "Low and intermediate tensile strength carbon steel plate",
            CarbonSteelPlate,
            55_000.0,
            30_000.0,
            SA_285_C,
        ),
        spec(
            "SA-612",
            &["A612", "SA612N"],
            "High strength carbon steel plate for moderate and lower temperature service",
            CarbonSteelPlate,
            81_000.0,
            50_000.0,
            SA_612,
        ),
        spec(
            "SA-106-B",
            &["SA-106 Gr. B", "SA-106 Grade B", "A106-B", "A106B"],
            "Seamless carbon steel pipe for high temperature service",
            CarbonSteelPipe,
            60_000.0,
            35_000.0,
            SA_106_B,
        ),
        spec(
            "SA-53-B",
            &["SA-53 Gr. B", "SA-53 Grade B", "A53-B", "A53B"],
            "Seamless carbon steel pipe",
            CarbonSteelPipe,
            60_000.0,
            35_000.0,
            SA_106_B,
        ),
        spec(
            "SA-105",
            &["A105"],
            "Carbon steel forgings for piping applications",
            CarbonSteelForging,
            70_000.0,
            36_000.0,
            SA_105,
        ),
        spec(
            "SA-240-304",
            &["SA-240 Type 304", "SA-240 TP304", "304 SS", "SS304"],
            "18Cr-8Ni austenitic stainless steel plate",
            StainlessSteel,
            75_000.0,
            30_000.0,
            SA_240_304,
        ),
        spec(
            "SA-240-304L",
            &["SA-240 Type 304L", "SA-240 TP304L", "304L SS", "SS304L"],
            "18Cr-8Ni low carbon austenitic stainless steel plate",
            StainlessSteel,
            70_000.0,
            25_000.0,
            SA_240_304L,
        ),
        spec(
            "SA-240-316",
            &["SA-240 Type 316", "SA-240 TP316", "316 SS", "SS316"],
            "16Cr-12Ni-2Mo austenitic stainless steel plate",
            StainlessSteel,
            75_000.0,
            30_000.0,
            SA_240_316,
        ),
        spec(
            "SA-240-316L",
            &["SA-240 Type 316L", "SA-240 TP316L", "316L SS", "SS316L"],
            "16Cr-12Ni-2Mo low carbon austenitic stainless steel plate",
            StainlessSteel,
            70_000.0,
            25_000.0,
            SA_240_316L,
        ),
    ]
}
