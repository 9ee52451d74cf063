//! Writes a synthetic beverage nutrition table to `data/sample_starbucks.csv`
//! and `data/sample_starbucks.parquet`.  Values are deterministic so the
//! files can be regenerated byte-for-byte.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// (category, beverage, calories of a tall 2% serving, sugar share of calories)
const MENU: &[(&str, &str, f64, f64)] = &[
    ("Coffee", "Brewed Coffee", 4.0, 0.0),
    ("Classic Espresso Drinks", "Caffe Latte", 150.0, 0.36),
    ("Classic Espresso Drinks", "Cappuccino", 90.0, 0.36),
    ("Classic Espresso Drinks", "Caffe Mocha", 210.0, 0.5),
    ("Signature Espresso Drinks", "White Chocolate Mocha", 290.0, 0.62),
    ("Signature Espresso Drinks", "Caramel Macchiato", 190.0, 0.53),
    ("Tazo Tea Drinks", "Tazo Chai Tea Latte", 180.0, 0.73),
    ("Tazo Tea Drinks", "Tazo Green Tea Latte", 200.0, 0.64),
    ("Shaken Iced Beverages", "Iced Brewed Coffee", 60.0, 0.93),
    ("Smoothies", "Banana Chocolate Smoothie", 280.0, 0.45),
    ("Frappuccino Blended Coffee", "Coffee", 190.0, 0.84),
    ("Frappuccino Blended Coffee", "Mocha", 220.0, 0.8),
];

/// (preparation, size multiplier)
const PREPS: &[(&str, f64)] = &[("Short", 0.67), ("Tall", 1.0), ("Grande", 1.33), ("Venti", 1.67)];

/// splitmix64; enough to jitter values reproducibly.
struct Jitter(u64);

impl Jitter {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiply by a factor in `[1 - spread, 1 + spread]`.
    fn around(&mut self, value: f64, spread: f64) -> f64 {
        value * (1.0 - spread + 2.0 * spread * self.next_f64())
    }
}

struct Table {
    category: Vec<String>,
    beverage: Vec<String>,
    prep: Vec<String>,
    calories: Vec<i64>,
    total_fat: Vec<f64>,
    sodium: Vec<i64>,
    carbs: Vec<i64>,
    sugars: Vec<i64>,
    protein: Vec<f64>,
    caffeine: Vec<i64>,
}

const HEADERS: [&str; 10] = [
    "Beverage_category",
    "Beverage",
    "Beverage_prep",
    "Calories",
    "Total_Fat_g",
    "Sodium_mg",
    "Total_Carbohydrates_g",
    "Sugars_g",
    "Protein_g",
    "Caffeine_mg",
];

fn generate() -> Table {
    let mut rng = Jitter(42);
    let mut t = Table {
        category: Vec::new(),
        beverage: Vec::new(),
        prep: Vec::new(),
        calories: Vec::new(),
        total_fat: Vec::new(),
        sodium: Vec::new(),
        carbs: Vec::new(),
        sugars: Vec::new(),
        protein: Vec::new(),
        caffeine: Vec::new(),
    };

    for &(category, beverage, base_calories, sugar_share) in MENU {
        for &(prep, size) in PREPS {
            let calories = rng.around(base_calories * size, 0.08).round();
            let sugars = (calories * sugar_share / 4.0).round();
            let carbs = (sugars + rng.around(calories * 0.05, 0.5)).round();
            let fat = (rng.around(calories * 0.03, 0.4) * 10.0).round() / 10.0;
            let protein = (rng.around(calories * 0.05, 0.3) * 10.0).round() / 10.0;

            t.category.push(category.to_string());
            t.beverage.push(beverage.to_string());
            t.prep.push(prep.to_string());
            t.calories.push(calories as i64);
            t.total_fat.push(fat);
            t.sodium.push(rng.around(calories * 0.6, 0.3).round() as i64);
            t.carbs.push(carbs as i64);
            t.sugars.push(sugars as i64);
            t.protein.push(protein);
            t.caffeine.push(rng.around(75.0 * size, 0.5).round() as i64);
        }
    }
    t
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    for i in 0..table.calories.len() {
        writer.write_record([
            table.category[i].clone(),
            table.beverage[i].clone(),
            table.prep[i].clone(),
            table.calories[i].to_string(),
            table.total_fat[i].to_string(),
            table.sodium[i].to_string(),
            table.carbs[i].to_string(),
            table.sugars[i].to_string(),
            table.protein[i].to_string(),
            table.caffeine[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let int = |name: &str| Field::new(name, DataType::Int64, false);
    let float = |name: &str| Field::new(name, DataType::Float64, false);
    let schema = Arc::new(Schema::new(vec![
        text(HEADERS[0]),
        text(HEADERS[1]),
        text(HEADERS[2]),
        int(HEADERS[3]),
        float(HEADERS[4]),
        int(HEADERS[5]),
        int(HEADERS[6]),
        int(HEADERS[7]),
        float(HEADERS[8]),
        int(HEADERS[9]),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(table.category.clone())),
        Arc::new(StringArray::from(table.beverage.clone())),
        Arc::new(StringArray::from(table.prep.clone())),
        Arc::new(Int64Array::from(table.calories.clone())),
        Arc::new(Float64Array::from(table.total_fat.clone())),
        Arc::new(Int64Array::from(table.sodium.clone())),
        Arc::new(Int64Array::from(table.carbs.clone())),
        Arc::new(Int64Array::from(table.sugars.clone())),
        Arc::new(Float64Array::from(table.protein.clone())),
        Arc::new(Int64Array::from(table.caffeine.clone())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;

    let table = generate();
    let csv_path = out_dir.join("sample_starbucks.csv");
    let parquet_path = out_dir.join("sample_starbucks.parquet");
    write_csv(&table, &csv_path)?;
    write_parquet(&table, &parquet_path)?;

    log::info!(
        "Wrote {} rows to {} and {}",
        table.calories.len(),
        csv_path.display(),
        parquet_path.display()
    );
    println!("Wrote {} and {}", csv_path.display(), parquet_path.display());
    Ok(())
}
