//! Writes a small deterministic `datos_de_entrada.csv` for trying out the
//! dashboard: `;`-separated, ISO-8859-1 encoded, comma decimal separators.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;

/// Minimal deterministic PRNG (splitmix64).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

const HIERARCHY: &[(&str, &[(&str, &[&str])])] = &[
    (
        "JUNÍN",
        &[
            ("CHANCHAMAYO", &["LA MERCED", "SAN RAMÓN"]),
            ("HUANCAYO", &["HUANCAYO", "EL TAMBO"]),
        ],
    ),
    (
        "LIMA",
        &[
            ("LIMA", &["ATE", "MIRAFLORES", "SANTIAGO DE SURCO"]),
            ("CAÑETE", &["SAN VICENTE DE CAÑETE"]),
        ],
    ),
    ("CUSCO", &[("CUSCO", &["CUSCO", "WANCHAQ"])]),
    ("PUNO", &[("PUNO", &["PUNO"])]),
];

const PERIODS: [i32; 5] = [2014, 2016, 2018, 2020, 2022];

/// Comma decimal separator, as in the real source file.
fn decimal(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "datos_de_entrada.csv".to_string());

    let mut rng = SimpleRng::new(20140101);
    let mut text = String::from(
        "DEPARTAMENTO;PROVINCIA;DISTRITO;PERIODO;QRESIDUOS_DOM;QRESIDUOS_NO_DOM;QRESIDUOS_MUN;POB_TOTAL\n",
    );

    for (department, provinces) in HIERARCHY {
        for (province, districts) in *provinces {
            for district in *districts {
                let population = (5_000.0 + rng.next_f64() * 250_000.0) as i64;
                // Per-capita base of roughly 100-250 kg/year in 2014,
                // drifting upward so the growth page has something to show.
                let base = population as f64 * rng.range(0.10, 0.25);
                for period in PERIODS {
                    let drift = 1.0 + 0.06 * (period - PERIODS[0]) as f64;
                    let household = base * drift * rng.range(0.9, 1.1);
                    let non_household = household * rng.range(0.2, 0.5);
                    let municipal = household + non_household;
                    text.push_str(&format!(
                        "{department};{province};{district};{period};{};{};{};{population}\n",
                        decimal(household),
                        decimal(non_household),
                        decimal(municipal),
                    ));
                }
            }
        }
    }

    let (bytes, _, _) = WINDOWS_1252.encode(&text);
    let mut file = File::create(&path).with_context(|| format!("creating {path}"))?;
    file.write_all(&bytes)
        .with_context(|| format!("writing {path}"))?;

    println!("wrote sample dataset to {path}");
    Ok(())
}
