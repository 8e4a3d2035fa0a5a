use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

const ROWS: u32 = 10_000;
const OUTPUT_PATH: &str = "synthetic_coffee_health.csv";

const COUNTRIES: &[&str] = &[
    "USA", "UK", "Canada", "Germany", "France", "Italy", "Spain", "Brazil", "Mexico", "Japan",
    "China", "South Korea", "India", "Australia", "Norway", "Sweden", "Finland", "Netherlands",
    "Switzerland", "Belgium",
];
const OCCUPATIONS: &[&str] = &["Office", "IT", "Healthcare", "Student", "Service", "Other"];
const GENDERS: &[&str] = &["Male", "Female", "Other"];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Country")]
    country: &'static str,
    #[serde(rename = "Coffee_Intake")]
    coffee_intake: f64,
    #[serde(rename = "Caffeine_mg")]
    caffeine_mg: f64,
    #[serde(rename = "Sleep_Hours")]
    sleep_hours: f64,
    #[serde(rename = "Sleep_Quality")]
    sleep_quality: &'static str,
    #[serde(rename = "BMI")]
    bmi: f64,
    #[serde(rename = "Heart_Rate")]
    heart_rate: u32,
    #[serde(rename = "Stress_Level")]
    stress_level: &'static str,
    #[serde(rename = "Physical_Activity_Hours")]
    physical_activity_hours: f64,
    #[serde(rename = "Health_Issues")]
    health_issues: &'static str,
    #[serde(rename = "Occupation")]
    occupation: &'static str,
    #[serde(rename = "Smoking")]
    smoking: u8,
    #[serde(rename = "Alcohol_Consumption")]
    alcohol_consumption: u8,
}

const SEED: u64 = 42;

fn gauss(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn generate_row(id: u32, rng: &mut impl Rng) -> Row {
    let age = gauss(rng, 41.0, 13.0).clamp(18.0, 80.0).round() as u32;
    let occupation = pick(rng, OCCUPATIONS);
    let coffee = round_to(gauss(rng, 2.5, 1.5).clamp(0.0, 8.0), 1);

    // More coffee → shorter sleep, higher heart rate.
    let sleep = round_to(gauss(rng, 7.5 - 0.25 * coffee, 0.8).clamp(3.0, 10.0), 1);
    let heart_rate = gauss(rng, 65.0 + 2.0 * coffee, 6.0).clamp(50.0, 110.0).round() as u32;
    let stress_level = match sleep {
        s if s < 5.5 => "High",
        s if s < 7.0 => "Medium",
        _ => "Low",
    };
    let sleep_quality = match sleep {
        s if s < 5.0 => "Poor",
        s if s < 6.5 => "Fair",
        s if s < 8.0 => "Good",
        _ => "Excellent",
    };
    let health_issues = match (heart_rate, stress_level) {
        (hr, "High") if hr > 85 => "Severe",
        (_, "High") => "Moderate",
        (hr, _) if hr > 80 => "Mild",
        _ => "",
    };

    Row {
        id,
        age,
        gender: pick(rng, GENDERS),
        country: pick(rng, COUNTRIES),
        coffee_intake: coffee,
        caffeine_mg: round_to(coffee * 95.0 + gauss(rng, 0.0, 5.0), 1).max(0.0),
        sleep_hours: sleep,
        sleep_quality,
        bmi: round_to(gauss(rng, 24.0, 4.0).clamp(15.0, 40.0), 1),
        heart_rate,
        stress_level,
        physical_activity_hours: round_to(rng.gen_range(0.0..15.0), 1),
        health_issues,
        occupation,
        smoking: u8::from(rng.gen_bool(0.2)),
        alcohol_consumption: u8::from(rng.gen_bool(0.3)),
    }
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH).context("creating output file")?;

    for id in 1..=ROWS {
        writer
            .serialize(generate_row(id, &mut rng))
            .with_context(|| format!("writing row {id}"))?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {ROWS} survey rows to {OUTPUT_PATH}");
    Ok(())
}
