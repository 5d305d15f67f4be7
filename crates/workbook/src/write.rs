use crate::error::{Result, WorkbookError};
use crate::read::{PLANNING_SHEET, SKUS_SHEET, STORES_SHEET};
use planboard_model::Dataset;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Rebuild the dataset into a full workbook and return it as a byte
/// buffer.
///
/// The output carries the same three sheets and headers the loader
/// expects, so a rebuilt buffer always decodes back to the same dataset.
///
/// # Errors
///
/// Returns error if workbook serialization fails.
pub fn workbook_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(dataset)?;
    workbook
        .save_to_buffer()
        .map_err(|e| WorkbookError::Write(e.to_string()))
}

/// Rebuild the dataset into a workbook file at `path`.
///
/// This is an explicit export: the loaded source is never rewritten in
/// place.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn save_workbook<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut workbook = build_workbook(dataset)?;
    workbook
        .save(path.as_ref())
        .map_err(|e| WorkbookError::Write(e.to_string()))?;
    Ok(())
}

fn build_workbook(dataset: &Dataset) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    let sheet = named_sheet(&mut workbook, STORES_SHEET)?;
    write_headers(sheet, &["ID", "Sno", "Label", "City", "State"])?;
    for (row, store) in dataset.stores.iter().enumerate() {
        let row = row as u32 + 1;
        write_str(sheet, row, 0, &store.id)?;
        write_str(sheet, row, 1, &store.sno)?;
        write_str(sheet, row, 2, &store.label)?;
        write_str(sheet, row, 3, &store.city)?;
        write_str(sheet, row, 4, &store.state)?;
    }

    let sheet = named_sheet(&mut workbook, SKUS_SHEET)?;
    write_headers(sheet, &["ID", "Label", "Price", "Cost"])?;
    for (row, sku) in dataset.skus.iter().enumerate() {
        let row = row as u32 + 1;
        write_str(sheet, row, 0, &sku.id)?;
        write_str(sheet, row, 1, &sku.label)?;
        write_num(sheet, row, 2, sku.price)?;
        write_num(sheet, row, 3, sku.cost)?;
    }

    let sheet = named_sheet(&mut workbook, PLANNING_SHEET)?;
    write_headers(sheet, &["Store", "SKU", "Week", "SalesUnits"])?;
    for (row, fact) in dataset.facts.iter().enumerate() {
        let row = row as u32 + 1;
        write_str(sheet, row, 0, &fact.store)?;
        write_str(sheet, row, 1, &fact.sku)?;
        write_str(sheet, row, 2, &fact.week)?;
        write_num(sheet, row, 3, fact.sales_units)?;
    }

    Ok(workbook)
}

fn named_sheet<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet> {
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(name)
        .map_err(|e| WorkbookError::Write(e.to_string()))?;
    Ok(sheet)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        write_str(sheet, 0, col as u16, header)?;
    }
    Ok(())
}

fn write_str(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    sheet
        .write_string(row, col, value)
        .map_err(|e| WorkbookError::Write(e.to_string()))?;
    Ok(())
}

fn write_num(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    sheet
        .write_number(row, col, value)
        .map_err(|e| WorkbookError::Write(e.to_string()))?;
    Ok(())
}
