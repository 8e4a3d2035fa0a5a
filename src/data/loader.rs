use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CategoricalCell, Dataset, RawRecord, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the published column names
/// * `.json`    – `[{ "Country": "...", "Gender": "...", ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV header
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = validate(raw)?;
    log::info!(
        "Loaded {} records from {} ({} countries)",
        dataset.len(),
        path.display(),
        dataset.countries.len()
    );
    Ok(dataset)
}

/// Turn raw rows into validated records, dropping rows outside the
/// Male/Female scope.
fn validate(raw: Vec<RawRecord>) -> Result<Dataset> {
    let mut records: Vec<Record> = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for (row_no, row) in raw.into_iter().enumerate() {
        match row
            .into_record()
            .with_context(|| format!("Row {row_no}: invalid record"))?
        {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Dropped {skipped} rows with a gender other than Male/Female");
    }
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut rows = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn read_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Text columns may be Utf8 or LargeUtf8, numeric columns any of
/// Int32/Int64/Float32/Float64. Works with files written by both
/// Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = rows.len();
        for row in 0..batch.num_rows() {
            let raw = raw_from_batch(&batch, row)
                .with_context(|| format!("Parquet row {}", offset + row))?;
            rows.push(raw);
        }
    }
    Ok(rows)
}

fn raw_from_batch(batch: &RecordBatch, row: usize) -> Result<RawRecord> {
    let age = number_at(batch, "Age", row)?;
    if age < 0.0 || age.fract() != 0.0 {
        bail!("'Age' must be a non-negative integer, got {age}");
    }

    Ok(RawRecord {
        country: text_at(batch, "Country", row)?,
        gender: text_at(batch, "Gender", row)?,
        age: age as u32,
        occupation: text_at(batch, "Occupation", row)?,
        coffee_intake: number_at(batch, "Coffee_Intake", row)?,
        sleep_hours: number_at(batch, "Sleep_Hours", row)?,
        stress_level: text_at(batch, "Stress_Level", row)?,
        heart_rate: number_at(batch, "Heart_Rate", row)?,
        bmi: number_at(batch, "BMI", row)?,
        smoking: categorical_at(batch, "Smoking", row)?,
        alcohol_consumption: categorical_at(batch, "Alcohol_Consumption", row)?,
        physical_activity_hours: number_at(batch, "Physical_Activity_Hours", row)?,
    })
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str, row: usize) -> Result<&'a Arc<dyn Array>> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))?;
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    Ok(col)
}

fn text_at(batch: &RecordBatch, name: &str, row: usize) -> Result<String> {
    let col = column(batch, name, row)?;
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("'{name}': expected a text column, got {other:?}"),
    }
}

fn number_at(batch: &RecordBatch, name: &str, row: usize) -> Result<f64> {
    let col = column(batch, name, row)?;
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| f64::from(a.value(row))),
        other => bail!("'{name}': expected a numeric column, got {other:?}"),
    };
    value.with_context(|| format!("'{name}': unexpected array layout"))
}

fn categorical_at(batch: &RecordBatch, name: &str, row: usize) -> Result<CategoricalCell> {
    let col = column(batch, name, row)?;
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => Ok(CategoricalCell::Text(text_at(batch, name, row)?)),
        DataType::Int32 | DataType::Int64 => {
            Ok(CategoricalCell::Int(number_at(batch, name, row)? as i64))
        }
        DataType::Float32 | DataType::Float64 => {
            Ok(CategoricalCell::Float(number_at(batch, name, row)?))
        }
        DataType::Boolean => Ok(CategoricalCell::Bool(col.as_boolean().value(row))),
        other => bail!("'{name}': unsupported categorical column type {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::{Gender, StressLevel};

    const CSV_FIXTURE: &str = "\
ID,Age,Gender,Country,Coffee_Intake,Caffeine_mg,Sleep_Hours,Sleep_Quality,BMI,Heart_Rate,Stress_Level,Physical_Activity_Hours,Health_Issues,Occupation,Smoking,Alcohol_Consumption
1,40,Male,Germany,3.5,328.1,7.5,Good,24.9,78,Low,14.5,,Other,0,0
2,33,Male,Germany,1.0,94.1,6.2,Good,20.0,67,Low,11.0,,Service,0,0
3,42,Other,Brazil,5.3,503.7,5.9,Fair,22.7,59,Medium,11.2,Mild,Office,0,0
4,53,Female,USA,2.6,249.2,7.3,Good,24.7,71,High,6.6,Mild,Other,0,1
";

    fn write_fixture(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_and_drops_other_genders() {
        let file = write_fixture(".csv", CSV_FIXTURE);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert!(!ds.countries.contains("Brazil"));
        let last = &ds.records[2];
        assert_eq!(last.country, "USA");
        assert_eq!(last.gender, Gender::Female);
        assert_eq!(last.stress_level, StressLevel::High);
        assert_eq!(last.alcohol_consumption, "1");
        assert_eq!(last.heart_rate, 71.0);
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Country": "Japan", "Gender": "Female", "Age": 29, "Occupation": "Student",
             "Coffee_Intake": 1.2, "Sleep_Hours": 8.0, "Stress_Level": "Medium",
             "Heart_Rate": 64, "BMI": 21.3, "Smoking": 0, "Alcohol_Consumption": 1,
             "Physical_Activity_Hours": 2.0}
        ]"#;
        let file = write_fixture(".json", json);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].smoking, "0");
        assert_eq!(ds.records[0].alcohol_consumption, "1");
        assert_eq!(ds.age_bounds, Some((29, 29)));
    }

    #[test]
    fn loads_parquet_columns() {
        let text = |name: &str| Field::new(name, DataType::Utf8, false);
        let float = |name: &str| Field::new(name, DataType::Float64, false);
        let schema = Arc::new(Schema::new(vec![
            text("Country"),
            text("Gender"),
            Field::new("Age", DataType::Int64, false),
            text("Occupation"),
            float("Coffee_Intake"),
            float("Sleep_Hours"),
            text("Stress_Level"),
            Field::new("Heart_Rate", DataType::Int32, false),
            float("BMI"),
            Field::new("Smoking", DataType::Int64, false),
            text("Alcohol_Consumption"),
            float("Physical_Activity_Hours"),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["UK", "Canada"])),
                Arc::new(StringArray::from(vec!["Male", "Female"])),
                Arc::new(Int64Array::from(vec![61, 24])),
                Arc::new(StringArray::from(vec!["Healthcare", "IT"])),
                Arc::new(Float64Array::from(vec![0.5, 4.0])),
                Arc::new(Float64Array::from(vec![7.1, 5.4])),
                Arc::new(StringArray::from(vec!["Low", "High"])),
                Arc::new(Int32Array::from(vec![66, 82])),
                Arc::new(Float64Array::from(vec![27.0, 19.5])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["0", "1"])),
                Arc::new(Float64Array::from(vec![1.5, 6.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].country, "UK");
        assert_eq!(ds.records[0].age, 61);
        assert_eq!(ds.records[0].smoking, "1");
        assert_eq!(ds.records[1].heart_rate, 82.0);
        assert_eq!(ds.records[1].stress_level, StressLevel::High);
    }

    #[test]
    fn invalid_stress_level_names_the_row() {
        let csv = CSV_FIXTURE.replace("Medium", "Severe").replace("Other,Brazil", "Male,Brazil");
        let file = write_fixture(".csv", &csv);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 2"), "{err:#}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_fixture(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
