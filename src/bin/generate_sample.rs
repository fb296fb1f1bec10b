use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

fn main() {
    let mut rng = SimpleRng::new(42);

    // Indicator variables grouped by category. Within-category pairs get a
    // positive correlation bias so the clusters show up after filtering.
    let variables: Vec<(&str, &str)> = vec![
        ("gdp_per_capita", "economy"),
        ("unemployment_rate", "economy"),
        ("median_income", "economy"),
        ("inflation_rate", "economy"),
        ("life_expectancy", "health"),
        ("infant_mortality", "health"),
        ("hospital_beds", "health"),
        ("school_years", "education"),
        ("literacy_rate", "education"),
        ("tertiary_enrollment", "education"),
        ("co2_per_capita", "environment"),
        ("forest_cover", "environment"),
        ("air_quality_index", "environment"),
    ];

    let mut variable1 = Vec::new();
    let mut variable2 = Vec::new();
    let mut category1 = Vec::new();
    let mut category2 = Vec::new();
    let mut estimates = Vec::new();
    let mut p_values = Vec::new();

    // One row per unordered pair.
    for i in 0..variables.len() {
        for j in (i + 1)..variables.len() {
            let (v1, c1) = variables[i];
            let (v2, c2) = variables[j];

            let r = if c1 == c2 {
                rng.gauss(0.55, 0.20)
            } else {
                rng.gauss(0.0, 0.35)
            }
            .clamp(-0.95, 0.95);

            // Strong correlations land well below the 0.05 cutoff; weak
            // ones scatter across it.
            let p = (rng.next_f64() * (1.0 - r.abs())).powi(2);

            variable1.push(v1.to_string());
            variable2.push(v2.to_string());
            category1.push(c1.to_string());
            category2.push(c2.to_string());
            estimates.push(r);
            p_values.push(p);
        }
    }
    let n_rows = estimates.len();

    // Build Arrow arrays
    let variable1_array =
        StringArray::from(variable1.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let variable2_array =
        StringArray::from(variable2.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let category1_array =
        StringArray::from(category1.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let category2_array =
        StringArray::from(category2.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let estimate_array = Float64Array::from(estimates);
    let p_value_array = Float64Array::from(p_values);

    let schema = Arc::new(Schema::new(vec![
        Field::new("variable1", DataType::Utf8, false),
        Field::new("variable2", DataType::Utf8, false),
        Field::new("category1", DataType::Utf8, false),
        Field::new("category2", DataType::Utf8, false),
        Field::new("correlation_estimate", DataType::Float64, false),
        Field::new("p_value", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(variable1_array),
            Arc::new(variable2_array),
            Arc::new(category1_array),
            Arc::new(category2_array),
            Arc::new(estimate_array),
            Arc::new(p_value_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_correlations.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {n_rows} correlation pairs ({} variables) to {output_path}",
        variables.len()
    );
}
