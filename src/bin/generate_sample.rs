//! Generate a synthetic detonation dataset with the raw source headers, for
//! demos and manual testing: `cargo run --bin generate_sample -- 500`.

use std::env;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// (country, test site, lat, lon) – sites stay roughly where history put them.
const SITES: &[(&str, &str, f64, f64)] = &[
    ("USA", "Nts", 37.0, -116.0),
    ("USA", "Bikini", 11.4, 165.2),
    ("USSR", "Semi Kazakh", 50.0, 78.0),
    ("USSR", "Novaya Zemlya", 73.8, 54.8),
    ("UK", "Monte Bello", -20.4, 115.5),
    ("France", "Mururoa", -21.8, -138.9),
    ("China", "Lop Nor", 40.6, 89.6),
    ("India", "Pokhran", 27.1, 71.8),
    ("Pakist", "Chagai", 28.8, 64.9),
];

const PURPOSES: &[&str] = &["Wr", "Wr", "Wr", "We", "Pne", "Se", "Fms", "Sam", "Plo"];
const METHODS: &[&str] = &["Shaft", "Tunnel", "Tower", "Airdrop", "Surface", "Balloon"];

fn main() -> anyhow::Result<()> {
    let n: usize = env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(500);

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path("data/nuclear_explosions.csv")?;

    writer.write_record([
        "WEAPON SOURCE COUNTRY",
        "WEAPON DEPLOYMENT LOCATION",
        "Data.Source",
        "Location.Cordinates.Latitude",
        "Location.Cordinates.Longitude",
        "Location.Cordinates.Depth",
        "Data.Magnitude.Body",
        "Data.Magnitude.Surface",
        "Data.Yeild.Lower",
        "Data.Yeild.Upper",
        "Data.Purpose",
        "Data.Name",
        "Data.Type",
        "Date.Day",
        "Date.Month",
        "Date.Year",
    ])?;

    for i in 0..n {
        let (country, site, lat, lon) = rng.pick(SITES);
        let year = 1945 + (rng.next_u64() % 54) as i64;
        let yield_lower = 10f64.powf(rng.range(0.0, 3.5)).round();
        let yield_upper = yield_lower * rng.range(1.0, 1.5);

        // A few percent of rows get no coordinates, like the real table.
        let (lat_s, lon_s) = if rng.next_f64() < 0.05 {
            (String::new(), String::new())
        } else {
            (
                format!("{:.2}", lat + rng.range(-0.8, 0.8)),
                format!("{:.2}", lon + rng.range(-0.8, 0.8)),
            )
        };

        writer.write_record([
            country.to_string(),
            site.to_string(),
            "GEN".to_string(),
            lat_s,
            lon_s,
            format!("{:.1}", rng.range(-1.0, 2.0)),
            format!("{:.1}", rng.range(0.0, 6.5)),
            "0.0".to_string(),
            format!("{yield_lower}"),
            format!("{yield_upper:.0}"),
            rng.pick(PURPOSES).to_string(),
            format!("Event-{i}"),
            rng.pick(METHODS).to_string(),
            (1 + rng.next_u64() % 28).to_string(),
            (1 + rng.next_u64() % 12).to_string(),
            year.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n} synthetic records to data/nuclear_explosions.csv");
    Ok(())
}
