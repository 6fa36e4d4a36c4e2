//! Export: JSON and CSV artifacts for a forecast.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: historical and predicted series in one long table
//!
//! Persisted JSON carries a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::output::{ForecastOutput, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ForecastOutput` to pretty JSON.
pub fn export_json(output: &ForecastOutput) -> Result<String> {
    serde_json::to_string_pretty(output).context("failed to serialize ForecastOutput to JSON")
}

/// Deserialize a `ForecastOutput` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ForecastOutput> {
    let output: ForecastOutput =
        serde_json::from_str(json).context("failed to deserialize ForecastOutput from JSON")?;
    if output.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            output.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(output)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export both series as CSV.
///
/// Columns: kind, date, price. `kind` is `historical` or `predicted`;
/// historical rows come first, each part in date order.
pub fn export_series_csv(output: &ForecastOutput) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["kind", "date", "price"])?;

    let rows = output
        .historical
        .iter()
        .map(|p| ("historical", p))
        .chain(output.predicted.iter().map(|p| ("predicted", p)));
    for (kind, point) in rows {
        let date = point.date.format("%Y-%m-%d").to_string();
        let price = format!("{:.2}", point.price);
        wtr.write_record([kind, date.as_str(), price.as_str()])?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

// ─── Artifacts ──────────────────────────────────────────────────────

/// Write a forecast's artifacts into `{output_dir}/{symbol}_{timestamp}/`:
///
/// - `forecast.json`: full output
/// - `series.csv`: historical and predicted prices
///
/// Returns the path to the created directory.
pub fn save_artifacts(output: &ForecastOutput, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        sanitize(&output.symbol),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(output)?;
    std::fs::write(run_dir.join("forecast.json"), &json)?;

    let csv = export_series_csv(output)?;
    std::fs::write(run_dir.join("series.csv"), &csv)?;

    Ok(run_dir)
}

/// Load a `ForecastOutput` from an artifact directory's forecast.json.
pub fn load_artifacts(dir: &Path) -> Result<ForecastOutput> {
    let path = dir.join("forecast.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

/// Symbols such as `M&M` or `BRK/B` are not safe directory names everywhere.
fn sanitize(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}
