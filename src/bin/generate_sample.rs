//! Write a synthetic student sheet in the layout `selective-predictor run` expects.
//!
//! Usage: `generate_sample [output.csv] [students]`

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const HEADER: [&str; 11] = [
    "Student name",
    "English",
    "Math",
    "GA",
    "Selective Score",
    "Corr (Python)",
    "Weight (Python)",
    "WAM (Python)",
    "",
    "",
    "",
];

/// Input labels and their starting values, placed in the unlabelled columns.
const SIDE_PANEL: [(&str, &str); 4] = [
    ("Input English", "82"),
    ("Input Math", "77"),
    ("Input GA", "69"),
    ("Output Mark", ""),
];

fn mark(rng: &mut SimpleRng, ability: f64, spread: f64) -> i64 {
    rng.gauss(ability, spread).round().clamp(0.0, 100.0) as i64
}

fn main() {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "sample_sheet.csv".to_string());
    let students: usize = args
        .next()
        .map(|n| n.parse().expect("student count must be a number"))
        .unwrap_or(30);

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
    writer.write_record(HEADER).expect("Failed to write header");

    for i in 0..students.max(SIDE_PANEL.len()) {
        let mut row = vec![String::new(); HEADER.len()];
        if i < students {
            let ability = rng.gauss(70.0, 12.0);
            let english = mark(&mut rng, ability, 6.0);
            let math = mark(&mut rng, ability + 3.0, 8.0);
            let ga = mark(&mut rng, ability - 2.0, 10.0);
            let score = (1.1 * english as f64 + 1.4 * math as f64 + 0.6 * ga as f64
                + rng.gauss(0.0, 8.0))
            .round()
            .max(0.0) as i64;

            row[0] = format!("Student {:02}", i + 1);
            row[1] = english.to_string();
            row[2] = math.to_string();
            row[3] = ga.to_string();
            row[4] = score.to_string();
        }
        // Side panel lives in columns J and K, below no header.
        if let Some((label, value)) = SIDE_PANEL.get(i) {
            row[9] = label.to_string();
            row[10] = value.to_string();
        }
        writer.write_record(&row).expect("Failed to write sheet row");
    }
    writer.flush().expect("Failed to flush output file");

    println!("Wrote {students} students to {output_path}");
}
