// File: crates/tvchart-demo/src/data.rs
// Summary: OHLC CSV loading with header aliases and an optional volume column.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use tvchart_core::OhlcRow;

/// Rows and their volume column, when the file has one.
pub struct Loaded {
    pub rows: Vec<OhlcRow>,
    pub volume: Option<Vec<f64>>,
}

/// Load an OHLC CSV with headers. Prices and volume may use `,` thousands separators.
pub fn load_ohlc_csv(path: &Path, delimiter: u8) -> Result<Loaded> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    debug!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let i_volume = idx(&["volume", "vol", "v"]);

    let (Some(i_time), Some(i_open), Some(i_high), Some(i_low), Some(i_close)) = (i_time, i_open, i_high, i_low, i_close)
    else {
        anyhow::bail!("missing one of time/open/high/low/close columns in {:?}", headers);
    };

    let mut rows = Vec::new();
    let mut volume = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or("");
        let fields = [field(i_time), field(i_open), field(i_high), field(i_low), field(i_close)];
        let row = match OhlcRow::from_fields(&fields) {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping row");
                continue;
            }
        };
        rows.push(row);
        if let Some(i) = i_volume {
            volume.push(field(i).trim().replace(',', "").parse::<f64>().unwrap_or(f64::NAN));
        }
    }
    Ok(Loaded { rows, volume: i_volume.map(|_| volume) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvchart_core::TimeInput;

    #[test]
    fn semicolon_file_with_thousands_separators() {
        let dir = std::env::temp_dir().join("tvchart-demo-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.csv");
        std::fs::write(
            &path,
            "date;open;high;low;close;volume\n\
             Jan 04 2010;1,000.5;1,010;990;1,005;12,000\n\
             Jan 05 2010;oops;1;1;1;1\n\
             Jan 06 2010;1005;1020;1000;1015;9000\n",
        )
        .unwrap();

        let loaded = load_ohlc_csv(&path, b';').unwrap();
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[0].time, TimeInput::Text("Jan 04 2010".into()));
        assert_eq!(loaded.rows[0].open, 1000.5);
        assert_eq!(loaded.volume, Some(vec![12000.0, 9000.0]));
    }

    #[test]
    fn missing_price_column_is_an_error() {
        let dir = std::env::temp_dir().join("tvchart-demo-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("no_close.csv");
        std::fs::write(&path, "time,open,high,low\n1,2,3,4\n").unwrap();
        assert!(load_ohlc_csv(&path, b',').is_err());
    }
}
