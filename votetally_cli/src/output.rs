use anyhow::{anyhow, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use votetally_lib::loader::RawTable;
use votetally_lib::{BillSummaryRow, LegislatorSummaryRow};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct LegislatorRow {
    id: i64,
    name: String,
    num_supported_bills: usize,
    num_opposed_bills: usize,
}

#[derive(Tabled, Serialize)]
struct BillRow {
    id: i64,
    title: String,
    supporter_count: usize,
    opposer_count: usize,
    primary_sponsor: String,
}

// -- Row builders --

fn build_legislator_rows(rows: &[LegislatorSummaryRow]) -> Vec<LegislatorRow> {
    rows.iter()
        .map(|r| LegislatorRow {
            id: r.legislator_id,
            name: r.legislator_name.clone(),
            num_supported_bills: r.num_supported_bills,
            num_opposed_bills: r.num_opposed_bills,
        })
        .collect()
}

fn build_bill_rows(rows: &[BillSummaryRow]) -> Vec<BillRow> {
    rows.iter()
        .map(|r| BillRow {
            id: r.bill_id,
            title: r.bill_title.clone(),
            supporter_count: r.num_supporting,
            opposer_count: r.num_opposing,
            primary_sponsor: r.sponsor_name.clone(),
        })
        .collect()
}

// -- Renderers --

fn table_string<T: Tabled>(rows: &[T], markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    let buf = wtr
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV output: {}", e.error()))?;
    Ok(String::from_utf8(buf)?)
}

fn render_rows<T: Tabled + Serialize>(
    rows: &[T],
    format: &OutputFormat,
    root_tag: &str,
    item_tag: &str,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table_string(rows, false)),
        OutputFormat::Markdown => Ok(table_string(rows, true)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => csv_string(rows),
        OutputFormat::Xml => xml_output::items_to_xml(root_tag, item_tag, rows),
    }
}

pub fn render_legislator_summary(
    rows: &[LegislatorSummaryRow],
    format: &OutputFormat,
) -> Result<String> {
    render_rows(
        &build_legislator_rows(rows),
        format,
        "legislators",
        "legislator",
    )
}

pub fn render_bill_summary(rows: &[BillSummaryRow], format: &OutputFormat) -> Result<String> {
    render_rows(&build_bill_rows(rows), format, "bills", "bill")
}

/// Renders an untyped preview table. JSON and XML emit one object per row
/// keyed by header.
pub fn render_raw_table(table: &RawTable, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table | OutputFormat::Markdown => {
            let mut builder = Builder::default();
            builder.push_record(table.headers.clone());
            for row in &table.rows {
                builder.push_record(row.clone());
            }
            let mut rendered = builder.build();
            if *format == OutputFormat::Markdown {
                rendered.with(Style::markdown());
            }
            Ok(rendered.to_string())
        }
        OutputFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(Vec::new());
            wtr.write_record(&table.headers)?;
            for row in &table.rows {
                wtr.write_record(row)?;
            }
            let buf = wtr
                .into_inner()
                .map_err(|e| anyhow!("flushing CSV output: {}", e.error()))?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&raw_objects(table))?),
        OutputFormat::Xml => xml_output::items_to_xml("rows", "row", &raw_objects(table)),
    }
}

fn raw_objects(table: &RawTable) -> Vec<serde_json::Map<String, serde_json::Value>> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .zip(row)
                .map(|(header, cell)| {
                    (header.clone(), serde_json::Value::String(cell.clone()))
                })
                .collect()
        })
        .collect()
}

// -- Printers --

pub fn print_legislator_summary(
    rows: &[LegislatorSummaryRow],
    format: &OutputFormat,
) -> Result<()> {
    println!("{}", render_legislator_summary(rows, format)?);
    Ok(())
}

pub fn print_bill_summary(rows: &[BillSummaryRow], format: &OutputFormat) -> Result<()> {
    println!("{}", render_bill_summary(rows, format)?);
    Ok(())
}

pub fn print_raw_table(table: &RawTable, format: &OutputFormat) -> Result<()> {
    println!("{}", render_raw_table(table, format)?);
    Ok(())
}
