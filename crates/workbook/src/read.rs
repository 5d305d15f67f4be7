use crate::error::{Result, WorkbookError};
use calamine::{Data, Range, Reader, Xlsx};
use planboard_model::{Dataset, PlanningFact, Sku, Store};
use std::io::Cursor;

pub(crate) const STORES_SHEET: &str = "Stores";
pub(crate) const SKUS_SHEET: &str = "SKUs";
pub(crate) const PLANNING_SHEET: &str = "Planning";

/// Decode a workbook byte buffer into a dataset.
///
/// All three sheets must be present; a sheet with only a header row
/// decodes to an empty record set.
///
/// # Errors
///
/// Returns error if the buffer is not a readable xlsx workbook, a sheet
/// or column is missing, or a numeric cell does not parse.
pub fn load_dataset(bytes: &[u8]) -> Result<Dataset> {
    let mut workbook: Xlsx<Cursor<&[u8]>> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| WorkbookError::Open(e.to_string()))?;

    let stores = read_stores(&mut workbook)?;
    let skus = read_skus(&mut workbook)?;
    let facts = read_planning(&mut workbook)?;

    tracing::info!(
        stores = stores.len(),
        skus = skus.len(),
        facts = facts.len(),
        "workbook decoded"
    );

    Ok(Dataset::from_parts(stores, skus, facts))
}

fn read_stores(workbook: &mut Xlsx<Cursor<&[u8]>>) -> Result<Vec<Store>> {
    let sheet = SheetRows::open(workbook, STORES_SHEET)?;
    let id = sheet.column("ID")?;
    let sno = sheet.column("Sno")?;
    let label = sheet.column("Label")?;
    let city = sheet.column("City")?;
    let state = sheet.column("State")?;

    let mut stores = Vec::new();
    for (_row_idx, row) in sheet.data_rows() {
        if row_is_blank(row) {
            continue;
        }
        stores.push(Store {
            id: cell_str(row, id),
            sno: cell_str(row, sno),
            label: cell_str(row, label),
            city: cell_str(row, city),
            state: cell_str(row, state),
        });
    }
    Ok(stores)
}

fn read_skus(workbook: &mut Xlsx<Cursor<&[u8]>>) -> Result<Vec<Sku>> {
    let sheet = SheetRows::open(workbook, SKUS_SHEET)?;
    let id = sheet.column("ID")?;
    let label = sheet.column("Label")?;
    let price = sheet.column("Price")?;
    let cost = sheet.column("Cost")?;

    let mut skus = Vec::new();
    for (row_idx, row) in sheet.data_rows() {
        if row_is_blank(row) {
            continue;
        }
        skus.push(Sku {
            id: cell_str(row, id),
            label: cell_str(row, label),
            price: cell_f64(row, price, SKUS_SHEET, row_idx, "Price")?,
            cost: cell_f64(row, cost, SKUS_SHEET, row_idx, "Cost")?,
        });
    }
    Ok(skus)
}

fn read_planning(workbook: &mut Xlsx<Cursor<&[u8]>>) -> Result<Vec<PlanningFact>> {
    let sheet = SheetRows::open(workbook, PLANNING_SHEET)?;
    let store = sheet.column("Store")?;
    let sku = sheet.column("SKU")?;
    let week = sheet.column("Week")?;
    let units = sheet.column("SalesUnits")?;

    let mut facts = Vec::new();
    for (row_idx, row) in sheet.data_rows() {
        if row_is_blank(row) {
            continue;
        }
        facts.push(PlanningFact {
            store: cell_str(row, store),
            sku: cell_str(row, sku),
            week: cell_str(row, week),
            sales_units: cell_f64(row, units, PLANNING_SHEET, row_idx, "SalesUnits")?,
        });
    }
    Ok(facts)
}

/// A named sheet split into a header row and data rows.
struct SheetRows {
    name: String,
    range: Range<Data>,
    headers: Vec<String>,
}

impl SheetRows {
    fn open(workbook: &mut Xlsx<Cursor<&[u8]>>, name: &str) -> Result<Self> {
        if !workbook.sheet_names().iter().any(|n| n == name) {
            return Err(WorkbookError::SheetNotFound {
                name: name.to_string(),
            });
        }
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| WorkbookError::Open(e.to_string()))?;

        let headers = range
            .rows()
            .next()
            .map(|row| row.iter().map(data_to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            range,
            headers,
        })
    }

    /// Index of a column by exact header text.
    fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| WorkbookError::MissingColumn {
                sheet: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Data rows with their 1-based workbook row numbers (header is row 1).
    fn data_rows(&self) -> impl Iterator<Item = (usize, &[Data])> + '_ {
        self.range
            .rows()
            .enumerate()
            .skip(1)
            .map(|(i, row)| (i + 1, row))
    }
}

fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

fn cell_str(row: &[Data], idx: usize) -> String {
    row.get(idx).map(data_to_string).unwrap_or_default()
}

fn cell_f64(
    row: &[Data],
    idx: usize,
    sheet: &str,
    row_num: usize,
    column: &str,
) -> Result<f64> {
    let cell = row.get(idx).unwrap_or(&Data::Empty);
    data_to_f64(cell).ok_or_else(|| WorkbookError::BadCell {
        sheet: sheet.to_string(),
        row: row_num,
        column: column.to_string(),
        value: data_to_string(cell),
    })
}

/// Render a cell as its string label. Whole floats drop the trailing
/// `.0` so a numeric week cell reads back as "1", not "1.0".
fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.trim().to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

fn data_to_f64(data: &Data) -> Option<f64> {
    match data {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
